use crate::config::EndpointConfig;
use crate::upload::error::UploadError;
use crate::upload::events::{UploadEvent, STATUS_COMPLETE, STATUS_PROCESSING, STATUS_STARTING};
use crate::upload::progress::{ProgressStream, ProgressTracker};
use crate::upload::types::{
    AllocationRequest, AllocationResponse, Batch, FilePayload, ProcessRequest, ProcessResponse,
    SelectedFile, UploadTarget,
};
use bytes::Bytes;
use futures::stream::{self, Stream};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use std::io;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, warn};

const CHUNK_SIZE: usize = 64 * 1024;

// reqwest only accepts streaming bodies that are `Send + Sync`.
type PayloadStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + Sync>>;

/// Runs the allocate → upload → process sequence for one batch at a time.
#[derive(Clone)]
pub struct BatchUploader {
    client: reqwest::Client,
    endpoints: EndpointConfig,
}

impl BatchUploader {
    pub fn new(endpoints: EndpointConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(endpoints.connect_timeout)
            .build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Top-level entry point used by the widget. Never panics on failure:
    /// the outcome is reported through `events`, ending with `Settled`.
    pub async fn run_batch(
        &self,
        files: Vec<SelectedFile>,
        events: Sender<UploadEvent>,
    ) -> Result<String, UploadError> {
        events
            .send(UploadEvent::BatchStarted { files: files.len() })
            .unwrap_or_default();

        let result = self.submit_batch(&files, &events).await;
        match &result {
            Ok(download_url) => {
                info!(download_url = %download_url, "batch complete");
                events
                    .send(UploadEvent::Completed {
                        download_url: download_url.clone(),
                    })
                    .unwrap_or_default();
            }
            Err(e) => {
                error!(error = ?e, "upload error");
                events
                    .send(UploadEvent::Status(e.status_message()))
                    .unwrap_or_default();
                events
                    .send(UploadEvent::Failed {
                        message: e.to_string(),
                    })
                    .unwrap_or_default();
            }
        }

        events.send(UploadEvent::Settled).unwrap_or_default();
        result
    }

    /// Uploads `files` in order and returns the link to the processed result.
    pub async fn submit_batch(
        &self,
        files: &[SelectedFile],
        events: &Sender<UploadEvent>,
    ) -> Result<String, UploadError> {
        if files.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        events
            .send(UploadEvent::Status(STATUS_STARTING.to_string()))
            .unwrap_or_default();

        let batch = self.request_targets(files).await?;
        info!(folder = %batch.folder, files = batch.entries.len(), "upload targets allocated");

        for (index, (file, target)) in batch.entries.iter().enumerate() {
            self.upload_file(index, file, target, events).await?;
        }

        events
            .send(UploadEvent::Status(STATUS_PROCESSING.to_string()))
            .unwrap_or_default();
        let download_url = self.trigger_processing(&batch.folder).await?;

        events
            .send(UploadEvent::Status(STATUS_COMPLETE.to_string()))
            .unwrap_or_default();
        Ok(download_url)
    }

    async fn request_targets<'a>(&self, files: &'a [SelectedFile]) -> Result<Batch<'a>, UploadError> {
        let request = AllocationRequest {
            files: files.iter().map(SelectedFile::manifest_entry).collect(),
        };

        debug!(url = %self.endpoints.allocation_url, files = files.len(), "requesting upload targets");
        let response = self
            .client
            .post(self.endpoints.allocation_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "allocation request failed");
                UploadError::Allocation
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "allocation endpoint rejected the batch");
            return Err(UploadError::Allocation);
        }

        let allocation = response.json::<AllocationResponse>().await.map_err(|e| {
            warn!(error = %e, "allocation response could not be parsed");
            UploadError::Allocation
        })?;

        if allocation.upload_urls.len() != files.len() {
            return Err(UploadError::TargetCountMismatch {
                expected: files.len(),
                received: allocation.upload_urls.len(),
            });
        }

        Ok(Batch {
            folder: allocation.folder,
            entries: files.iter().zip(allocation.upload_urls).collect(),
        })
    }

    async fn upload_file(
        &self,
        index: usize,
        file: &SelectedFile,
        target: &UploadTarget,
        events: &Sender<UploadEvent>,
    ) -> Result<(), UploadError> {
        info!(
            index,
            name = %file.name,
            assigned = %target.assigned_file_name,
            size = file.size_bytes,
            "uploading file"
        );

        let chunks = open_payload(&file.payload).await.map_err(|e| {
            warn!(index, name = %file.name, error = %e, "failed to read file");
            UploadError::upload_aborted(index)
        })?;

        let mut tracker = ProgressTracker::new(
            target.assigned_file_name.clone(),
            file.size_bytes,
            events.clone(),
        );
        tracker.start();
        let body = reqwest::Body::wrap_stream(ProgressStream::new(chunks, tracker));

        let response = self
            .client
            .put(&target.destination_url)
            .header(CONTENT_TYPE, file.mime_type.as_str())
            .header(CONTENT_LENGTH, file.size_bytes)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(index, name = %file.name, error = %e, "upload request failed");
                UploadError::upload_aborted(index)
            })?;

        match response.status() {
            StatusCode::OK => {
                // Empty payloads never yield a chunk to track.
                if file.size_bytes == 0 {
                    events
                        .send(UploadEvent::Progress {
                            file_name: target.assigned_file_name.clone(),
                            percent: 100,
                        })
                        .unwrap_or_default();
                }
                debug!(index, name = %file.name, "upload accepted");
                Ok(())
            }
            status => {
                warn!(index, name = %file.name, %status, "destination rejected upload");
                Err(UploadError::upload_status(index, status))
            }
        }
    }

    async fn trigger_processing(&self, folder: &str) -> Result<String, UploadError> {
        debug!(url = %self.endpoints.processing_url, folder, "requesting processing");
        let response = self
            .client
            .post(self.endpoints.processing_url.clone())
            .json(&ProcessRequest { folder })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, folder, "processing request failed");
                UploadError::Processing
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, folder, "processing endpoint rejected the folder");
            return Err(UploadError::Processing);
        }

        let processed = response.json::<ProcessResponse>().await.map_err(|e| {
            warn!(error = %e, "processing response could not be parsed");
            UploadError::Processing
        })?;
        Ok(processed.download_url)
    }
}

async fn open_payload(payload: &FilePayload) -> io::Result<PayloadStream> {
    match payload {
        FilePayload::Disk(path) => {
            let file = tokio::fs::File::open(path).await?;
            Ok(Box::pin(ReaderStream::with_capacity(file, CHUNK_SIZE)))
        }
        FilePayload::Memory(bytes) => {
            let chunks: Vec<io::Result<Bytes>> = bytes
                .chunks(CHUNK_SIZE)
                .map(|chunk| Ok(bytes.slice_ref(chunk)))
                .collect();
            Ok(Box::pin(stream::iter(chunks)))
        }
    }
}
