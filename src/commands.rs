//! Render API command vocabulary and transport.
//!
//! Every user action that affects the remote renderer is expressed as a
//! [`RenderCommand`]. A command knows its request name and its JSON
//! parameters; a [`RenderApi`] implementation knows how to deliver it.
//!
//! Delivery is fire-and-forget from the panel's point of view: the response
//! payload is never consumed beyond success/failure.

use crate::controls::SliceAxis;
use crate::error::ApiResult;
use crate::gradient::Attribute;
use crate::http;
use crate::variants::VariantChange;
use crate::view::RenderMode;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

/// A single request understood by the render backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Switch the exclusive visualization algorithm
    SetRenderingMode(RenderMode),
    /// Update the inflow speed; triggers a new inference on the backend
    SetWindSpeed { speed: f64, point_scale: f64 },
    /// Set the colormap domain of every visualization
    SetGradientScale { min_val: f64, max_val: f64 },
    /// Restore camera, variants, speed and gradient to their defaults
    Reset,
    /// Choose which field (velocity or pressure) is rendered
    SetVisualizationAttribute(Attribute),
    /// Curve-trace seed sphere position, each component in [-1, 1]
    SetStreamlinesPos([f64; 3]),
    /// Curve-trace seed sphere radius in [0, 1]
    SetStreamlinesRadius(f64),
    /// Volume-trace probe position, each component in [-1, 1]
    SetSmokeprobesPos([f64; 3]),
    /// Select the slicing plane axis
    SetSliceState(SliceAxis),
    /// Position of the slicing plane along its axis
    SetSlicePos(f64),
    /// Change one vehicle variant
    SetVariant(VariantChange),
    /// Load previously uploaded geometry and/or streamlines into the scene
    LoadUploadedFiles {
        stl_filename: Option<String>,
        streamlines_filename: Option<String>,
    },
}

impl RenderCommand {
    /// Request name as registered on the backend.
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommand::SetRenderingMode(_) => "set_rendering_mode",
            RenderCommand::SetWindSpeed { .. } => "set_wind_speed",
            RenderCommand::SetGradientScale { .. } => "set_gradient_scale",
            RenderCommand::Reset => "reset",
            RenderCommand::SetVisualizationAttribute(_) => "set_visualization_attribute_state",
            RenderCommand::SetStreamlinesPos(_) => "set_streamlines_pos",
            RenderCommand::SetStreamlinesRadius(_) => "set_streamlines_radius",
            RenderCommand::SetSmokeprobesPos(_) => "set_smokeprobes_pos",
            RenderCommand::SetSliceState(_) => "set_slice_state",
            RenderCommand::SetSlicePos(_) => "set_slice_pos",
            RenderCommand::SetVariant(change) => change.request_name(),
            RenderCommand::LoadUploadedFiles { .. } => "load_uploaded_files",
        }
    }

    /// Request parameters as a JSON object.
    pub fn params(&self) -> Value {
        match self {
            RenderCommand::SetRenderingMode(mode) => json!({ "mode": mode.code() }),
            RenderCommand::SetWindSpeed { speed, point_scale } => {
                json!({ "speed": speed, "point_scale": point_scale })
            }
            RenderCommand::SetGradientScale { min_val, max_val } => {
                json!({ "min_val": min_val, "max_val": max_val })
            }
            RenderCommand::Reset => json!({}),
            RenderCommand::SetVisualizationAttribute(attr) => json!({ "attribute": attr.code() }),
            RenderCommand::SetStreamlinesPos(pct) | RenderCommand::SetSmokeprobesPos(pct) => {
                json!({ "pct": pct })
            }
            RenderCommand::SetStreamlinesRadius(pct) | RenderCommand::SetSlicePos(pct) => {
                json!({ "pct": pct })
            }
            RenderCommand::SetSliceState(axis) => json!({ "state": axis.as_str() }),
            RenderCommand::SetVariant(change) => json!({ "inference_id": change.inference_id() }),
            RenderCommand::LoadUploadedFiles { stl_filename, streamlines_filename } => {
                let mut params = serde_json::Map::new();
                if let Some(name) = stl_filename {
                    params.insert("stl_filename".to_string(), json!(name));
                }
                if let Some(name) = streamlines_filename {
                    params.insert("streamlines_filename".to_string(), json!(name));
                }
                Value::Object(params)
            }
        }
    }

    /// Wire envelope sent by [`HttpRenderApi`].
    pub fn envelope(&self) -> Value {
        json!({ "event_type": self.name(), "payload": self.params() })
    }
}

impl std::fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.params())
    }
}

/// Delivers render commands to the backend.
///
/// Implementations must be shareable across the worker threads that issue
/// requests concurrently.
pub trait RenderApi: Send + Sync {
    /// Sends one command and waits for the backend's acknowledgement.
    fn request(&self, command: &RenderCommand) -> ApiResult<()>;
}

/// Render API reached over HTTP: each command is POSTed as a JSON envelope
/// `{"event_type": <name>, "payload": <params>}`.
pub struct HttpRenderApi {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRenderApi {
    /// Creates a client for `endpoint`, optionally bounding each request.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> ApiResult<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the URL commands are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RenderApi for HttpRenderApi {
    fn request(&self, command: &RenderCommand) -> ApiResult<()> {
        let response = self.client.post(&self.endpoint).json(&command.envelope()).send()?;
        http::ensure_success(response)?;
        Ok(())
    }
}

/// Render API that only remembers what it was asked to send.
///
/// Used for dry runs and by tests.
#[derive(Default)]
pub struct RecordingRenderApi {
    sent: Mutex<Vec<RenderCommand>>,
}

impl RecordingRenderApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every command received so far, in arrival order.
    pub fn sent(&self) -> Vec<RenderCommand> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Drops the recorded history.
    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.clear();
        }
    }
}

impl RenderApi for RecordingRenderApi {
    fn request(&self, command: &RenderCommand) -> ApiResult<()> {
        log::debug!("recorded {}", command);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(command.clone());
        }
        Ok(())
    }
}
