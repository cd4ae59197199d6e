use anyhow::Result;
use rtwt::{
    ApiError, ApiResult, Attribute, FileListing, GradientState, HttpRenderApi, RecordingRenderApi, RenderApi,
    RenderCommand, RenderMode, StlFileInfo, UploadApi, UploadClient, UploadJob, UploadKind, UploadPanelState,
    UploadResponse, ViewButton, ViewState,
};
use serde_json::json;
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// In-memory upload service that counts every call.
#[derive(Default)]
struct FakeUploadService {
    calls: AtomicUsize,
    stl_files: Mutex<Vec<StlFileInfo>>,
}

impl FakeUploadService {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UploadApi for FakeUploadService {
    fn upload(&self, _kind: UploadKind, path: &Path) -> ApiResult<UploadResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.stl_files.lock().unwrap().push(StlFileInfo { name: name.clone(), size: 2048, path: None });
        Ok(UploadResponse { filename: name, num_streamlines: None, size_bytes: Some(2048), path: None })
    }

    fn list_files(&self) -> ApiResult<FileListing> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FileListing {
            stl_files: self.stl_files.lock().unwrap().clone(),
            streamline_files: vec![],
        })
    }

    fn delete(&self, _kind: UploadKind, name: &str) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut files = self.stl_files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.name != name);
        if files.len() == before {
            return Err(ApiError::Status { status: 404, detail: format!("File '{}' not found", name) });
        }
        Ok(())
    }
}

/// Runs `job` and every follow-up job it produces, like the GUI worker does.
fn run_to_completion(panel: &mut UploadPanelState, api: &dyn UploadApi, job: UploadJob) {
    let mut next = Some(job);
    while let Some(job) = next {
        next = panel.apply(job.run(api));
    }
}

#[test]
fn test_each_render_mode_click_sends_one_command() -> Result<()> {
    let api = RecordingRenderApi::new();
    let cases = [
        (ViewButton::VolumeTrace, RenderMode::VolumeTrace, 0),
        (ViewButton::CurveTrace, RenderMode::CurveTrace, 1),
        (ViewButton::Volume, RenderMode::Volume, 2),
        (ViewButton::Slice, RenderMode::Slice, 3),
    ];

    for (button, mode, code) in cases {
        let mut view = ViewState::new();
        // Start from another active view to check exclusivity
        view.click(ViewButton::View, Instant::now());

        api.clear();
        for command in view.click(button, Instant::now()) {
            api.request(&command)?;
        }

        let sent = api.sent();
        assert_eq!(sent, vec![RenderCommand::SetRenderingMode(mode)]);
        assert_eq!(sent[0].params(), json!({ "mode": code }));
        assert_eq!(view.active_button(), Some(button));

        let highlighted: Vec<ViewButton> = ViewButton::BAR
            .into_iter()
            .filter(|b| view.is_highlighted(*b))
            .collect();
        assert_eq!(highlighted, vec![button]);
    }

    Ok(())
}

#[test]
fn test_reset_clears_after_delay() -> Result<()> {
    let api = RecordingRenderApi::new();
    let mut view = ViewState::with_reset_delay(Duration::from_millis(150));
    let start = Instant::now();

    view.click(ViewButton::Volume, start);
    for command in view.click(ViewButton::Reset, start) {
        api.request(&command)?;
    }

    assert_eq!(api.sent(), vec![RenderCommand::Reset]);
    assert_eq!(api.sent()[0].envelope(), json!({ "event_type": "reset", "payload": {} }));
    assert_eq!(view.active_button(), Some(ViewButton::Reset));

    assert!(!view.tick(start + Duration::from_millis(100)));
    assert_eq!(view.active_button(), Some(ViewButton::Reset));

    assert!(view.tick(start + Duration::from_millis(150)));
    assert_eq!(view.active_button(), None);
    assert_eq!(view.pending_clear(), None);

    Ok(())
}

#[test]
fn test_invalid_extension_never_calls_service() -> Result<()> {
    let service = FakeUploadService::default();
    let mut panel = UploadPanelState::new();

    assert!(!panel.select_file(UploadKind::Stl, PathBuf::from("/tmp/car.obj")));
    assert!(!panel.select_file(UploadKind::Streamlines, PathBuf::from("/tmp/lines.csv")));
    assert!(!panel.can_upload(UploadKind::Stl));
    assert!(!panel.can_upload(UploadKind::Streamlines));

    for kind in [UploadKind::Stl, UploadKind::Streamlines] {
        if let Some(job) = panel.start_upload(kind) {
            run_to_completion(&mut panel, &service, job);
        }
    }

    assert_eq!(service.calls(), 0);
    assert_eq!(panel.status(), "Please select a streamlines JSON file first");

    Ok(())
}

#[test]
fn test_stl_upload_then_refresh_shows_file() -> Result<()> {
    let service = FakeUploadService::default();
    let mut panel = UploadPanelState::new();

    let open = panel.toggle().expect("opening refreshes the listing");
    run_to_completion(&mut panel, &service, open);
    assert!(panel.listing().stl_files.is_empty());

    assert!(!panel.select_file(UploadKind::Stl, PathBuf::from("/tmp/Concept.STL")));
    assert!(!panel.can_upload(UploadKind::Stl));
    assert!(panel.select_file(UploadKind::Stl, PathBuf::from("/tmp/Concept.stl")));
    let job = panel.start_upload(UploadKind::Stl).expect("a file is selected");
    run_to_completion(&mut panel, &service, job);

    assert_eq!(panel.status(), "✓ STL uploaded: Concept.stl");
    assert!(panel.listing().contains(UploadKind::Stl, "Concept.stl"));
    assert!(!panel.is_uploading());

    let delete = panel.start_delete(UploadKind::Stl, "Concept.stl");
    run_to_completion(&mut panel, &service, delete);
    assert_eq!(panel.status(), "✓ Deleted Concept.stl");
    assert!(panel.listing().stl_files.is_empty());

    let missing = panel.start_delete(UploadKind::Stl, "Concept.stl");
    run_to_completion(&mut panel, &service, missing);
    assert_eq!(panel.status(), "✗ Delete failed: File 'Concept.stl' not found");

    Ok(())
}

#[test]
fn test_gradient_endpoints() -> Result<()> {
    let mut gradient = GradientState::new();

    assert_eq!(gradient.commit(0.0, 0.0), RenderCommand::SetGradientScale { min_val: 0.0, max_val: 0.0 });
    assert_eq!(gradient.commit(1.0, 1.0), RenderCommand::SetGradientScale { min_val: 145.0, max_val: 145.0 });

    assert_eq!(
        gradient.select(Attribute::Pressure),
        Some(RenderCommand::SetVisualizationAttribute(Attribute::Pressure))
    );
    assert_eq!(
        gradient.commit(0.0, 0.0),
        RenderCommand::SetGradientScale { min_val: -2000.0, max_val: 1000.0 }
    );
    assert_eq!(gradient.commit(1.0, 1.0), RenderCommand::SetGradientScale { min_val: 0.0, max_val: 0.0 });

    Ok(())
}

// ===== Real HTTP clients against a one-shot local server =====

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Reads one HTTP request: headers plus a Content-Length or chunked body.
fn read_request(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            if headers.contains("transfer-encoding: chunked") {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
                continue;
            }
            let length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    buf
}

/// Serves exactly one request with `status` and a JSON `body`; the join
/// handle yields the raw request.
fn serve_once(status: &'static str, body: &'static str) -> Result<(String, thread::JoinHandle<Vec<u8>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    Ok((format!("http://{}", addr), handle))
}

fn request_body(request: &[u8]) -> &[u8] {
    let end = find_subsequence(request, b"\r\n\r\n").expect("request has headers");
    &request[end + 4..]
}

#[test]
fn test_render_api_posts_envelope() -> Result<()> {
    let (base, server) = serve_once("200 OK", r#"{"status":"ok"}"#)?;
    let api = HttpRenderApi::new(format!("{}/request", base), Some(Duration::from_secs(5)))?;

    api.request(&RenderCommand::SetWindSpeed { speed: 40.0, point_scale: 1.0 })?;

    let request = server.join().unwrap();
    assert!(request.starts_with(b"POST /request HTTP/1.1"));
    let body: serde_json::Value = serde_json::from_slice(request_body(&request))?;
    assert_eq!(
        body,
        json!({ "event_type": "set_wind_speed", "payload": { "speed": 40.0, "point_scale": 1.0 } })
    );

    Ok(())
}

#[test]
fn test_upload_client_posts_multipart_file() -> Result<()> {
    let file = env::temp_dir().join("rtwt_integration_car.stl");
    fs::write(&file, "solid car\nendsolid car\n")?;

    let (base, server) = serve_once(
        "200 OK",
        r#"{"filename":"rtwt_integration_car.stl","path":"/app/uploaded_files/stl/rtwt_integration_car.stl","size_bytes":23}"#,
    )?;
    let client = UploadClient::new(&base, Some(Duration::from_secs(5)))?;

    let response = client.upload(UploadKind::Stl, &file)?;
    assert_eq!(response.filename, "rtwt_integration_car.stl");
    assert_eq!(response.size_bytes, Some(23));

    let request = server.join().unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /upload/stl HTTP/1.1"));
    assert!(text.contains("name=\"file\""));
    assert!(text.contains("filename=\"rtwt_integration_car.stl\""));
    assert!(text.contains("solid car"));

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn test_upload_client_reports_detail_on_rejection() -> Result<()> {
    let file = env::temp_dir().join("rtwt_integration_rejected.stl");
    fs::write(&file, "solid x\nendsolid x\n")?;

    let (base, server) = serve_once("400 Bad Request", r#"{"detail":"Only STL files are allowed"}"#)?;
    let client = UploadClient::new(&base, Some(Duration::from_secs(5)))?;

    let mut panel = UploadPanelState::new();
    panel.select_file(UploadKind::Stl, file.clone());
    let job = panel.start_upload(UploadKind::Stl).expect("a file is selected");
    let follow_up = panel.apply(job.run(&client));

    assert_eq!(follow_up, None);
    assert_eq!(panel.status(), "✗ Upload failed: Only STL files are allowed");
    server.join().unwrap();

    let _ = fs::remove_file(&file);
    Ok(())
}

#[test]
fn test_upload_client_lists_files() -> Result<()> {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"stl_files":[{"name":"car.stl","path":"/x/car.stl","size_bytes":4096}],"streamline_files":[],"total_stl":1,"total_streamlines":0}"#,
    )?;
    let client = UploadClient::new(&base, None)?;

    let listing = client.list_files()?;
    assert_eq!(listing.stl_files.len(), 1);
    assert_eq!(rtwt::format_size_kb(listing.stl_files[0].size), "4.0 KB");

    let request = server.join().unwrap();
    assert!(request.starts_with(b"GET /files HTTP/1.1"));

    Ok(())
}
