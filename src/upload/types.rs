use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Where the bytes of a selected file live.
#[derive(Debug, Clone)]
pub enum FilePayload {
    Disk(PathBuf),
    Memory(Bytes),
}

/// A file picked or dropped by the user, ready to be sent.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub payload: FilePayload,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid filename"))?
            .to_string();

        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", name),
            ));
        }

        Ok(Self {
            mime_type: mime_type_for(&name).to_string(),
            name,
            size_bytes: metadata.len(),
            payload: FilePayload::Disk(path.to_path_buf()),
        })
    }

    /// Builds a file from bytes the host already holds in memory.
    /// An empty `mime_type` falls back to the extension lookup.
    pub fn from_bytes(name: impl Into<String>, mime_type: &str, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let mime_type = if mime_type.trim().is_empty() {
            mime_type_for(&name).to_string()
        } else {
            mime_type.to_string()
        };

        Self {
            name,
            mime_type,
            size_bytes: bytes.len() as u64,
            payload: FilePayload::Memory(bytes),
        }
    }

    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size_bytes,
        }
    }
}

/// Content type guessed from the file extension.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let extension = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return FALLBACK_MIME_TYPE,
    };

    match extension.as_str() {
        "zip" => "application/zip",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "json" => "application/json",
        "xml" => "application/xml",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// One line of the allocation manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AllocationRequest {
    pub files: Vec<ManifestEntry>,
}

/// Pre-authorized write endpoint issued for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadTarget {
    #[serde(rename = "url")]
    pub destination_url: String,
    #[serde(rename = "fileName")]
    pub assigned_file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllocationResponse {
    pub upload_urls: Vec<UploadTarget>,
    pub folder: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    pub folder: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessResponse {
    pub download_url: String,
}

/// Files of one submission paired with the targets the server allocated.
#[derive(Debug)]
pub struct Batch<'a> {
    pub folder: String,
    pub entries: Vec<(&'a SelectedFile, UploadTarget)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mime_lookup_covers_accepted_uploads() {
        assert_eq!(mime_type_for("nests.ZIP"), "application/zip");
        assert_eq!(mime_type_for("report.csv"), "text/csv");
        assert_eq!(mime_type_for("scan.pdf"), "application/pdf");
        assert_eq!(mime_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(mime_type_for("plot.png"), "image/png");
        assert_eq!(mime_type_for("README"), "application/octet-stream");
        assert_eq!(mime_type_for("archive.rar"), "application/octet-stream");
    }

    #[test]
    fn from_path_reads_name_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"a,b,c\n1,2,3\n").unwrap();

        let selected = SelectedFile::from_path(&path).unwrap();
        assert_eq!(selected.name, "report.csv");
        assert_eq!(selected.mime_type, "text/csv");
        assert_eq!(selected.size_bytes, 12);
        assert!(matches!(selected.payload, FilePayload::Disk(ref p) if p == &path));
    }

    #[test]
    fn from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SelectedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn from_bytes_prefers_host_mime_type() {
        let file = SelectedFile::from_bytes("data.bin", "image/png", vec![0u8; 4]);
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.size_bytes, 4);

        let guessed = SelectedFile::from_bytes("data.csv", "", Vec::new());
        assert_eq!(guessed.mime_type, "text/csv");
        assert_eq!(guessed.size_bytes, 0);
    }

    #[test]
    fn manifest_serializes_with_wire_names() {
        let request = AllocationRequest {
            files: vec![SelectedFile::from_bytes("report.csv", "text/csv", vec![1u8; 3]).manifest_entry()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"files": [{"name": "report.csv", "type": "text/csv", "size": 3}]})
        );
    }

    #[test]
    fn allocation_response_reads_camel_case() {
        let response: AllocationResponse = serde_json::from_str(
            r#"{"uploadUrls":[{"url":"https://s3/x","fileName":"report_1.csv"}],"folder":"abc123"}"#,
        )
        .unwrap();
        assert_eq!(response.folder, "abc123");
        assert_eq!(
            response.upload_urls,
            vec![UploadTarget {
                destination_url: "https://s3/x".to_string(),
                assigned_file_name: "report_1.csv".to_string(),
            }]
        );
    }
}
