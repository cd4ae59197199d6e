//! Application-level coordination and workflow management.
//!
//! Turns panel interactions into state updates and outbound work: render
//! commands go to the [`CommandDispatcher`], upload panel jobs to the
//! [`UploadWorker`].

use crate::app::AppState;
use crate::io::{CommandDispatcher, UploadWorker};
use eframe::egui;
use rtwt::{
    Attribute, RenderCommand, ScalarRange, SliceAxis, UploadJob, UploadKind, VariantChange, ViewButton,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    // ===== View bar =====

    pub fn click_view_button(state: &mut AppState, dispatcher: &CommandDispatcher, button: ViewButton) {
        let commands = state.scene.view.click(button, Instant::now());
        dispatcher.send_all(commands);
    }

    pub fn hover_view_button(state: &mut AppState, button: ViewButton) {
        state.scene.view.hover_enter(button);
    }

    pub fn leave_flyout(state: &mut AppState, button: ViewButton) {
        state.scene.view.hover_leave(button);
    }

    /// Applies a due Reset clear.
    ///
    /// Returns how long until the next scheduled clear, if one is pending,
    /// so the caller can ask for a repaint at that time.
    pub fn tick_view(state: &mut AppState, now: Instant) -> Option<Duration> {
        state.scene.view.tick(now);
        state
            .scene
            .view
            .pending_clear()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    // ===== Sliders =====

    pub fn drag_speed(state: &mut AppState, value: f64) {
        state.scene.speed.drag(value);
    }

    pub fn commit_speed(state: &mut AppState, dispatcher: &CommandDispatcher, value: f64) {
        dispatcher.send(state.scene.speed.commit(value));
    }

    pub fn select_attribute(state: &mut AppState, dispatcher: &CommandDispatcher, attribute: Attribute) {
        if let Some(command) = state.scene.gradient.select(attribute) {
            dispatcher.send(command);
        }
    }

    pub fn drag_gradient(state: &mut AppState, range: ScalarRange) {
        state.scene.gradient.drag(range.min, range.max);
    }

    pub fn commit_gradient(state: &mut AppState, dispatcher: &CommandDispatcher, range: ScalarRange) {
        dispatcher.send(state.scene.gradient.commit(range.min, range.max));
    }

    // ===== Trace menus =====

    pub fn update_curve_trace_position(
        state: &mut AppState,
        dispatcher: &CommandDispatcher,
        position: [f64; 3],
        commit: bool,
    ) {
        let command = state.scene.curve_trace.set_position(position);
        Self::send_if(dispatcher, command, commit);
    }

    pub fn update_curve_trace_radius(state: &mut AppState, dispatcher: &CommandDispatcher, radius: f64, commit: bool) {
        let command = state.scene.curve_trace.set_radius(radius);
        Self::send_if(dispatcher, command, commit);
    }

    pub fn update_volume_trace_position(
        state: &mut AppState,
        dispatcher: &CommandDispatcher,
        position: [f64; 3],
        commit: bool,
    ) {
        let command = state.scene.volume_trace.set_position(position);
        Self::send_if(dispatcher, command, commit);
    }

    pub fn select_slice_axis(state: &mut AppState, dispatcher: &CommandDispatcher, axis: SliceAxis) {
        if let Some(command) = state.scene.slice.select_axis(axis) {
            dispatcher.send(command);
        }
    }

    pub fn update_slice_position(state: &mut AppState, dispatcher: &CommandDispatcher, position: f64, commit: bool) {
        let command = state.scene.slice.set_position(position);
        Self::send_if(dispatcher, command, commit);
    }

    fn send_if(dispatcher: &CommandDispatcher, command: RenderCommand, commit: bool) {
        if commit {
            dispatcher.send(command);
        }
    }

    // ===== Variants =====

    pub fn change_variant(state: &mut AppState, dispatcher: &CommandDispatcher, change: VariantChange) {
        if let Some(command) = state.scene.variants.apply(change) {
            log::info!("variant index now {}", state.scene.variants.variant_index());
            dispatcher.send(command);
        }
    }

    // ===== Upload panel =====

    pub fn toggle_upload_panel(state: &mut AppState, worker: &UploadWorker, ctx: &egui::Context) {
        if let Some(job) = state.upload.toggle() {
            worker.start(job, ctx);
        }
    }

    pub fn close_upload_panel(state: &mut AppState) {
        state.upload.set_visible(false);
    }

    pub fn pick_upload_file(state: &mut AppState, kind: UploadKind, path: PathBuf) {
        if !state.upload.select_file(kind, path) {
            log::warn!("{}", state.upload.status());
        }
    }

    pub fn start_upload(state: &mut AppState, worker: &UploadWorker, kind: UploadKind, ctx: &egui::Context) {
        if let Some(job) = state.upload.start_upload(kind) {
            worker.start(job, ctx);
        }
    }

    pub fn delete_upload(
        state: &mut AppState,
        worker: &UploadWorker,
        kind: UploadKind,
        name: &str,
        ctx: &egui::Context,
    ) {
        worker.start(state.upload.start_delete(kind, name), ctx);
    }

    pub fn refresh_listing(worker: &UploadWorker, ctx: &egui::Context) {
        worker.start(UploadJob::Refresh, ctx);
    }

    /// Asks the renderer to load a listed file into the scene.
    pub fn load_into_scene(dispatcher: &CommandDispatcher, kind: UploadKind, name: &str) {
        let command = match kind {
            UploadKind::Stl => RenderCommand::LoadUploadedFiles {
                stl_filename: Some(name.to_string()),
                streamlines_filename: None,
            },
            UploadKind::Streamlines => RenderCommand::LoadUploadedFiles {
                stl_filename: None,
                streamlines_filename: Some(name.to_string()),
            },
        };
        dispatcher.send(command);
    }

    /// Folds finished upload jobs into the state and starts their follow-ups.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if any job completed.
    pub fn check_upload_completion(state: &mut AppState, worker: &UploadWorker, ctx: &egui::Context) -> bool {
        let outcomes = worker.check_completion();
        let completed = !outcomes.is_empty();
        for outcome in outcomes {
            if let Some(follow_up) = state.upload.apply(outcome) {
                worker.start(follow_up, ctx);
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtwt::{
        ApiResult, FileListing, RecordingRenderApi, RenderMode, StlFileInfo, UploadApi, UploadResponse,
    };
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Default)]
    struct FakeUploads {
        stored: Mutex<Vec<String>>,
    }

    impl UploadApi for FakeUploads {
        fn upload(&self, _kind: UploadKind, path: &Path) -> ApiResult<UploadResponse> {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            self.stored.lock().unwrap().push(name.clone());
            Ok(UploadResponse { filename: name, num_streamlines: None, size_bytes: Some(10), path: None })
        }

        fn list_files(&self) -> ApiResult<FileListing> {
            let stl_files = self
                .stored
                .lock()
                .unwrap()
                .iter()
                .map(|name| StlFileInfo { name: name.clone(), size: 10, path: None })
                .collect();
            Ok(FileListing { stl_files, streamline_files: vec![] })
        }

        fn delete(&self, _kind: UploadKind, name: &str) -> ApiResult<()> {
            self.stored.lock().unwrap().retain(|n| n != name);
            Ok(())
        }
    }

    fn wait_idle(dispatcher: &CommandDispatcher) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while dispatcher.in_flight() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Polls until every job and its follow-ups have been applied.
    fn drain(state: &mut AppState, worker: &UploadWorker, ctx: &egui::Context) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            ApplicationCoordinator::check_upload_completion(state, worker, ctx);
            if !worker.is_busy() {
                // Outcome is sent before the pending count drops
                ApplicationCoordinator::check_upload_completion(state, worker, ctx);
                if !worker.is_busy() {
                    break;
                }
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_click_sends_rendering_mode() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());
        let mut state = AppState::default();

        ApplicationCoordinator::click_view_button(&mut state, &dispatcher, ViewButton::Slice);
        wait_idle(&dispatcher);

        assert_eq!(api.sent(), vec![RenderCommand::SetRenderingMode(RenderMode::Slice)]);
        assert!(state.scene.view.is_slice_active());
    }

    #[test]
    fn test_tick_view_reports_pending_clear() {
        let dispatcher = CommandDispatcher::new(Arc::new(RecordingRenderApi::new()));
        let mut state = AppState::default();

        ApplicationCoordinator::click_view_button(&mut state, &dispatcher, ViewButton::Reset);
        let now = Instant::now();
        assert!(ApplicationCoordinator::tick_view(&mut state, now).is_some());

        let later = now + Duration::from_secs(1);
        assert_eq!(ApplicationCoordinator::tick_view(&mut state, later), None);
        assert_eq!(state.scene.view.active_button(), None);
    }

    #[test]
    fn test_drag_then_commit_speed() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());
        let mut state = AppState::default();

        ApplicationCoordinator::drag_speed(&mut state, 30.0);
        ApplicationCoordinator::drag_speed(&mut state, 40.0);
        wait_idle(&dispatcher);
        assert!(api.sent().is_empty());

        ApplicationCoordinator::commit_speed(&mut state, &dispatcher, 40.0);
        wait_idle(&dispatcher);
        assert_eq!(api.sent(), vec![RenderCommand::SetWindSpeed { speed: 40.0, point_scale: 1.0 }]);
    }

    #[test]
    fn test_uncommitted_trace_edit_sends_nothing() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());
        let mut state = AppState::default();

        ApplicationCoordinator::update_curve_trace_radius(&mut state, &dispatcher, 0.8, false);
        wait_idle(&dispatcher);
        assert!(api.sent().is_empty());
        assert_eq!(state.scene.curve_trace.radius(), 0.8);

        ApplicationCoordinator::update_curve_trace_radius(&mut state, &dispatcher, 0.8, true);
        wait_idle(&dispatcher);
        assert_eq!(api.sent(), vec![RenderCommand::SetStreamlinesRadius(0.8)]);
    }

    #[test]
    fn test_upload_then_listing_refresh() {
        let worker = UploadWorker::new(Arc::new(FakeUploads::default()));
        let ctx = egui::Context::default();
        let mut state = AppState::default();

        ApplicationCoordinator::pick_upload_file(&mut state, UploadKind::Stl, PathBuf::from("car.stl"));
        ApplicationCoordinator::start_upload(&mut state, &worker, UploadKind::Stl, &ctx);
        drain(&mut state, &worker, &ctx);

        assert_eq!(state.upload.status(), "✓ STL uploaded: car.stl");
        assert!(state.upload.listing().contains(UploadKind::Stl, "car.stl"));
    }

    #[test]
    fn test_load_into_scene_names_one_file() {
        let api = Arc::new(RecordingRenderApi::new());
        let dispatcher = CommandDispatcher::new(api.clone());

        ApplicationCoordinator::load_into_scene(&dispatcher, UploadKind::Streamlines, "lines.json");
        wait_idle(&dispatcher);

        assert_eq!(
            api.sent(),
            vec![RenderCommand::LoadUploadedFiles {
                stl_filename: None,
                streamlines_filename: Some("lines.json".to_string()),
            }]
        );
    }
}
