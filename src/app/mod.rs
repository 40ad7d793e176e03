mod state;
mod ui;

use crate::upload::{BatchUploader, SelectedFile, UploadEvent};
use eframe::{egui, App};
pub use state::{ProgressState, WidgetState};
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

pub const APP_TITLE: &str = "Rosenwald NestMaster 3000";

pub struct BatchUploaderApp {
    uploader: BatchUploader,
    runtime: Runtime,
    state: WidgetState,
    event_receiver: Option<std_mpsc::Receiver<UploadEvent>>,
}

impl BatchUploaderApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, uploader: BatchUploader, runtime: Runtime) -> Self {
        info!(
            allocation = %uploader.endpoints().allocation_url,
            processing = %uploader.endpoints().processing_url,
            "initializing batch uploader"
        );
        Self {
            uploader,
            runtime,
            state: WidgetState::default(),
            event_receiver: None,
        }
    }

    pub fn submit_paths(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match SelectedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read selected file");
                    self.state
                        .report_error(&format!("Could not read {}", path.display()));
                    return;
                }
            }
        }
        self.start_batch(files);
    }

    pub fn start_batch(&mut self, files: Vec<SelectedFile>) {
        let sizes: Vec<u64> = files.iter().map(|f| f.size_bytes).collect();
        if !self.state.begin_batch(&sizes) {
            debug!(files = files.len(), "batch not started");
            return;
        }

        info!(files = files.len(), "starting batch");
        let (sender, receiver) = std_mpsc::channel();
        self.event_receiver = Some(receiver);

        let uploader = self.uploader.clone();
        self.runtime.spawn(async move {
            // The outcome reaches the view through the event channel.
            let _ = uploader.run_batch(files, sender).await;
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let hovering = ctx.input(|inp| !inp.raw.hovered_files.is_empty());
        self.state.set_dragging(hovering);

        let dropped = ctx.input(|inp| inp.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        if self.state.uploading {
            debug!(count = dropped.len(), "ignoring drop while a batch is in flight");
            return;
        }

        let mut files = Vec::with_capacity(dropped.len());
        for dropped_file in dropped {
            if let Some(path) = &dropped_file.path {
                match SelectedFile::from_path(path) {
                    Ok(file) => files.push(file),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "could not read dropped file");
                        self.state
                            .report_error(&format!("Could not read {}", path.display()));
                        return;
                    }
                }
            } else if let Some(bytes) = &dropped_file.bytes {
                files.push(SelectedFile::from_bytes(
                    dropped_file.name.clone(),
                    "",
                    bytes.to_vec(),
                ));
            } else {
                warn!(name = %dropped_file.name, "dropped file has neither path nor bytes");
            }
        }
        self.start_batch(files);
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.event_receiver else {
            return;
        };

        let events: Vec<UploadEvent> = receiver.try_iter().collect();
        let mut settled = false;
        for event in events {
            settled |= matches!(event, UploadEvent::Settled);
            if let Some(download_url) = self.state.apply(event) {
                self.open_download(&download_url);
            }
        }

        if settled {
            self.event_receiver = None;
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn open_download(&mut self, download_url: &str) {
        info!(download_url, "opening download link");
        if let Err(e) = open::that(download_url) {
            error!(download_url, error = %e, "failed to open download link");
            self.state.report_error("Failed to open download link");
        }
    }
}

impl App for BatchUploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.update_state(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_and_heading_share_the_product_title() {
        assert_eq!(APP_TITLE, "Rosenwald NestMaster 3000");
    }
}
