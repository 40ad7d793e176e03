use thiserror::Error;

/// Every way a batch can fail. `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No files selected")]
    EmptyBatch,

    #[error("Failed to get upload URLs")]
    Allocation,

    #[error("Failed to get upload URLs: expected {expected} targets, received {received}")]
    TargetCountMismatch { expected: usize, received: usize },

    #[error("{message}")]
    Upload { index: usize, message: String },

    #[error("Failed to process files")]
    Processing,

    #[error("Failed to build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UploadError {
    pub(crate) fn upload_status(index: usize, status: reqwest::StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());
        Self::Upload {
            index,
            message: format!("Upload failed: {}", reason),
        }
    }

    pub(crate) fn upload_aborted(index: usize) -> Self {
        Self::Upload {
            index,
            message: "Upload failed".to_string(),
        }
    }

    /// Text written into the status line when a batch ends badly.
    pub fn status_message(&self) -> String {
        format!("Error: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_match_user_facing_text() {
        assert_eq!(
            UploadError::Allocation.status_message(),
            "Error: Failed to get upload URLs"
        );
        assert_eq!(
            UploadError::Processing.status_message(),
            "Error: Failed to process files"
        );
        assert_eq!(
            UploadError::upload_status(2, reqwest::StatusCode::FORBIDDEN).status_message(),
            "Error: Upload failed: Forbidden"
        );
        assert_eq!(
            UploadError::upload_aborted(0).status_message(),
            "Error: Upload failed"
        );
    }

    #[test]
    fn upload_errors_keep_the_failing_index() {
        match UploadError::upload_status(3, reqwest::StatusCode::INTERNAL_SERVER_ERROR) {
            UploadError::Upload { index, message } => {
                assert_eq!(index, 3);
                assert_eq!(message, "Upload failed: Internal Server Error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
