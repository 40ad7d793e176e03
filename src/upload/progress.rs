use crate::upload::events::UploadEvent;
use bytes::Bytes;
use futures::Stream;
use std::io;
use std::pin::Pin;
use std::sync::mpsc::Sender;
use std::task::{Context, Poll};

/// Counts bytes handed to the transport and reports whole percentages.
pub struct ProgressTracker {
    file_name: String,
    bytes_sent: u64,
    total_bytes: u64,
    last_percent: Option<u8>,
    sender: Sender<UploadEvent>,
}

impl ProgressTracker {
    pub fn new(file_name: String, total_bytes: u64, sender: Sender<UploadEvent>) -> Self {
        Self {
            file_name,
            bytes_sent: 0,
            total_bytes,
            last_percent: None,
            sender,
        }
    }

    pub fn track(&mut self, len: u64) {
        self.bytes_sent = self.bytes_sent.saturating_add(len);
        let percent = if self.total_bytes == 0 {
            0
        } else {
            let scaled = (self.bytes_sent as f64 * 100.0 / self.total_bytes as f64).round();
            scaled.clamp(0.0, 100.0) as u8
        };
        self.report(percent);
    }

    /// Puts an empty bar on screen before the first chunk leaves.
    pub fn start(&mut self) {
        self.report(0);
    }

    // Only forward increases so a file's bar never moves backwards.
    fn report(&mut self, percent: u8) {
        if self.last_percent.is_some_and(|last| percent <= last) {
            return;
        }
        self.last_percent = Some(percent);
        self.sender
            .send(UploadEvent::Progress {
                file_name: self.file_name.clone(),
                percent,
            })
            .unwrap_or_default();
    }
}

/// Wraps a byte stream and feeds every chunk it yields to a [`ProgressTracker`].
#[pin_project::pin_project]
pub struct ProgressStream<S> {
    #[pin]
    inner: S,
    tracker: ProgressTracker,
}

impl<S> ProgressStream<S> {
    pub fn new(inner: S, tracker: ProgressTracker) -> Self {
        Self { inner, tracker }
    }
}

impl<S> Stream for ProgressStream<S>
where
    S: Stream<Item = io::Result<Bytes>>,
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.tracker.track(chunk.len() as u64);
                Poll::Ready(Some(Ok(chunk)))
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
