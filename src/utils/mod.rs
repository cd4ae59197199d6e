//! Utility modules for the control panel.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{display_name, format_memory_mb, get_current_memory_mb};
