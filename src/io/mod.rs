//! Background network work for the panel.

pub mod command_dispatcher;
pub mod upload_worker;

// Re-export commonly used types
pub use command_dispatcher::CommandDispatcher;
pub use upload_worker::{UnavailableUploads, UploadWorker};
