use crate::upload::UploadEvent;
use crate::utils::file_size::batch_summary;

/// Per-file percentages in the order files first reported.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgressState {
    entries: Vec<(String, u8)>,
}

impl ProgressState {
    pub fn set(&mut self, file_name: &str, percent: u8) {
        let percent = percent.min(100);
        match self.entries.iter_mut().find(|(name, _)| name == file_name) {
            Some((_, current)) => *current = percent,
            None => self.entries.push((file_name.to_string(), percent)),
        }
    }

    pub fn get(&self, file_name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, percent)| *percent)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(name, percent)| (name.as_str(), *percent))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Default)]
pub struct WidgetState {
    pub dragging: bool,
    pub uploading: bool,
    pub status_message: String,
    pub progress: ProgressState,
    pub selection_summary: Option<String>,
}

impl WidgetState {
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Marks a batch as in flight. Returns false if one already is.
    pub fn begin_batch(&mut self, sizes: &[u64]) -> bool {
        if self.uploading || sizes.is_empty() {
            return false;
        }
        self.uploading = true;
        self.selection_summary = Some(batch_summary(sizes));
        true
    }

    /// Folds one orchestrator event into the view state. Returns the link to
    /// open when the batch completed.
    pub fn apply(&mut self, event: UploadEvent) -> Option<String> {
        match event {
            UploadEvent::BatchStarted { .. } => {
                self.progress.clear();
                None
            }
            UploadEvent::Status(message) => {
                self.status_message = message;
                None
            }
            UploadEvent::Progress { file_name, percent } => {
                self.progress.set(&file_name, percent);
                None
            }
            UploadEvent::Completed { download_url } => Some(download_url),
            UploadEvent::Failed { .. } => None,
            UploadEvent::Settled => {
                self.uploading = false;
                None
            }
        }
    }

    pub fn report_error(&mut self, message: &str) {
        self.status_message = format!("Error: {}", message);
    }
}
