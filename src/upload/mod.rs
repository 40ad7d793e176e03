mod error;
mod events;
mod orchestrator;
mod progress;
mod types;

pub use error::UploadError;
pub use events::{UploadEvent, STATUS_COMPLETE, STATUS_PROCESSING, STATUS_STARTING};
pub use orchestrator::BatchUploader;
pub use progress::{ProgressStream, ProgressTracker};
pub use types::{mime_type_for, Batch, FilePayload, ManifestEntry, SelectedFile, UploadTarget};
