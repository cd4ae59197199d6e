pub mod error;
mod http;
pub mod commands;
pub mod view;
pub mod gradient;
pub mod controls;
pub mod variants;
pub mod upload;
pub mod config;
pub mod theme;

// Export error types
pub use error::{ApiError, ApiResult};

// Export render command vocabulary and transports
pub use commands::{HttpRenderApi, RecordingRenderApi, RenderApi, RenderCommand};

// Export view button bar
pub use view::{RenderMode, ViewButton, ViewState, DEFAULT_RESET_CLEAR_DELAY};

// Export gradient and speed controls
pub use gradient::{gradient_ticks, Attribute, GradientState, ScalarRange};
pub use controls::{CurveTraceParams, SliceAxis, SliceParams, VolumeTraceParams, WindSpeed};

// Export vehicle variants
pub use variants::{Mirrors, RideHeight, Rim, Spoiler, VariantChange, VehicleVariants};

// Export upload panel
pub use upload::{
    format_size_kb, FileListing, StatusTone, StlFileInfo, StreamlineFileInfo,
    UploadApi, UploadClient, UploadJob, UploadKind, UploadOutcome, UploadPanelState, UploadResponse,
};

// Export configuration
pub use config::PanelConfig;

// Export theme support
pub use theme::{hex_to_color32, Theme, ThemeColors, ThemeManager};
