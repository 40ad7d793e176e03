pub const STATUS_STARTING: &str = "Starting upload...";
pub const STATUS_PROCESSING: &str = "Processing files...";
pub const STATUS_COMPLETE: &str = "Complete! Downloading...";

/// Messages the orchestrator sends to whoever renders the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    BatchStarted { files: usize },
    Status(String),
    Progress { file_name: String, percent: u8 },
    Completed { download_url: String },
    Failed { message: String },
    /// Always the last event of a batch.
    Settled,
}
