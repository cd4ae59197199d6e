//! Background execution of upload panel jobs.
//!
//! Jobs run on worker threads; outcomes come back through a channel and are
//! collected once per frame with `check_completion()`.

use eframe::egui;
use rtwt::{ApiError, ApiResult, FileListing, UploadApi, UploadJob, UploadKind, UploadOutcome, UploadResponse};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Runs [`UploadJob`]s off the UI thread.
pub struct UploadWorker {
    /// Upload service client shared with worker threads
    api: Arc<dyn UploadApi>,

    /// Number of jobs not yet finished
    pending: Arc<AtomicUsize>,

    sender: Sender<UploadOutcome>,
    receiver: Receiver<UploadOutcome>,
}

impl UploadWorker {
    pub fn new(api: Arc<dyn UploadApi>) -> Self {
        let (sender, receiver) = channel();
        Self {
            api,
            pending: Arc::new(AtomicUsize::new(0)),
            sender,
            receiver,
        }
    }

    /// True while at least one job is running.
    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Starts `job` on a background thread.
    ///
    /// `ctx` is asked to repaint when the job finishes so the outcome is
    /// picked up promptly.
    pub fn start(&self, job: UploadJob, ctx: &egui::Context) {
        let api = Arc::clone(&self.api);
        let pending = Arc::clone(&self.pending);
        let sender = self.sender.clone();
        let ctx_handle = ctx.clone();

        pending.fetch_add(1, Ordering::SeqCst);

        thread::spawn(move || {
            let outcome = job.run(api.as_ref());

            // Receiver only goes away with the app
            let _ = sender.send(outcome);

            pending.fetch_sub(1, Ordering::SeqCst);
            ctx_handle.request_repaint();
        });
    }

    /// Drains every outcome that has arrived since the last call.
    pub fn check_completion(&self) -> Vec<UploadOutcome> {
        self.receiver.try_iter().collect()
    }
}

/// Upload service stand-in used when no client could be built.
///
/// Every operation fails with the reason the client was unavailable, so the
/// panel still reports something meaningful.
pub struct UnavailableUploads {
    reason: String,
}

impl UnavailableUploads {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn error(&self) -> ApiError {
        ApiError::InvalidUrl(self.reason.clone())
    }
}

impl UploadApi for UnavailableUploads {
    fn upload(&self, _kind: UploadKind, _path: &Path) -> ApiResult<UploadResponse> {
        Err(self.error())
    }

    fn list_files(&self) -> ApiResult<FileListing> {
        Err(self.error())
    }

    fn delete(&self, _kind: UploadKind, _name: &str) -> ApiResult<()> {
        Err(self.error())
    }
}
