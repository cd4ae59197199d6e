//! Fire-and-forget delivery of render commands.
//!
//! Each command is sent from its own background thread so the UI never
//! waits on the backend. There is no queue and no deduplication: two quick
//! clicks produce two overlapping requests, and the backend keeps whichever
//! resolves last.

use eframe::egui;
use rtwt::{RenderApi, RenderCommand};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Sends render commands on background threads.
pub struct CommandDispatcher {
    /// Transport used by every worker thread
    api: Arc<dyn RenderApi>,

    /// Number of requests that have not resolved yet
    in_flight: Arc<AtomicUsize>,

    /// Context to wake when a request resolves
    repaint: Option<egui::Context>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn RenderApi>) -> Self {
        Self {
            api,
            in_flight: Arc::new(AtomicUsize::new(0)),
            repaint: None,
        }
    }

    /// Requests a repaint of `ctx` whenever a command resolves.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Number of commands still waiting for the backend.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Sends one command without waiting for the result.
    ///
    /// Failures are logged and otherwise dropped.
    pub fn send(&self, command: RenderCommand) {
        let api = Arc::clone(&self.api);
        let in_flight = Arc::clone(&self.in_flight);
        let repaint = self.repaint.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        log::info!("sending {}", command);

        thread::spawn(move || {
            if let Err(e) = api.request(&command) {
                match command {
                    RenderCommand::SetRenderingMode(_) => log::error!("Error setting rendering mode: {}", e),
                    RenderCommand::Reset => log::error!("Error resetting app: {}", e),
                    _ => log::error!("Error sending {}: {}", command.name(), e),
                }
            }

            in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Sends every command in order of iteration; each on its own thread.
    pub fn send_all(&self, commands: impl IntoIterator<Item = RenderCommand>) {
        for command in commands {
            self.send(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtwt::{RecordingRenderApi, RenderMode};
    use std::time::{Duration, Instant};

    fn wait_idle(dispatcher: &CommandDispatcher) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while dispatcher.in_flight() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(Arc::new(RecordingRenderApi::new()));
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[test]
    fn test_send_reaches_api() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());

        dispatcher.send(RenderCommand::SetRenderingMode(RenderMode::Volume));
        wait_idle(&dispatcher);

        assert_eq!(api.sent(), vec![RenderCommand::SetRenderingMode(RenderMode::Volume)]);
    }

    #[test]
    fn test_send_all_delivers_each() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());

        dispatcher.send_all(vec![RenderCommand::Reset, RenderCommand::SetSlicePos(0.5)]);
        wait_idle(&dispatcher);

        let sent = api.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.contains(&RenderCommand::Reset));
        assert!(sent.contains(&RenderCommand::SetSlicePos(0.5)));
    }
}
