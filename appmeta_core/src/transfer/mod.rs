//! FTP upload of metadata images.
//!
//! This module provides:
//! - The `Connector`/`RemoteSession` seam and its `suppaftp` implementation
//! - The blocking upload pipeline and its stage reporting
//! - A cancellable tokio task wrapper around the pipeline

pub mod constants;
pub mod pipeline;
pub mod session;
pub mod task;

// Re-export public API
pub use constants::CONNECT_TIMEOUT;
pub use pipeline::{UploadReport, UploadRequest, UploadStage, final_status, upload};
pub use session::{Connector, FtpConnector, FtpSession, RemoteSession};
pub use task::spawn_upload;
