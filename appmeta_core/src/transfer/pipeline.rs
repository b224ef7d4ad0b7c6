//! The upload pipeline: validate, encode, connect, change directory, store, close.
//!
//! Everything here is blocking and runs on the calling thread. Stage changes are
//! reported through a callback so a caller can drive a status bar.

use std::fmt;
use std::io::{Cursor, Seek, SeekFrom};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use super::constants::CONNECT_TIMEOUT;
use super::session::{Connector, RemoteSession};
use crate::connection::ConnectionParams;
use crate::error::AppMetaError;
use crate::payload::build_payload;
use crate::preset::TargetSpec;

/// Everything one upload needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Currently loaded image, if any
    pub source: Option<PathBuf>,
    pub target: TargetSpec,
    pub connection: ConnectionParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub app_id: String,
    pub remote_dir: String,
    /// File names stored, in order
    pub stored: Vec<String>,
    /// Size of the PNG written to every file
    pub payload_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStage {
    Validating,
    Encoding,
    Connecting { addr: String },
    ChangingDirectory { path: String },
    Uploading {
        index: usize,
        total: usize,
        file_name: String,
    },
    Closing,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Validating => write!(f, "Validating parameters..."),
            UploadStage::Encoding => write!(f, "Compiling image payload..."),
            UploadStage::Connecting { addr } => write!(f, "Establishing FTP stream to {}...", addr),
            UploadStage::ChangingDirectory { path } => write!(f, "Entering {}...", path),
            UploadStage::Uploading {
                index,
                total,
                file_name,
            } => write!(f, "Injecting {} ({}/{})...", file_name, index + 1, total),
            UploadStage::Closing => write!(f, "Closing FTP stream..."),
        }
    }
}

pub const STATUS_SUCCESS: &str = "Payload delivered successfully.";
pub const STATUS_HALTED: &str = "Operation halted.";
pub const STATUS_FAILED: &str = "Network or transfer failure.";

/// Status bar text once an upload has ended
pub fn final_status(result: &Result<UploadReport, AppMetaError>) -> &'static str {
    match result {
        Ok(_) => STATUS_SUCCESS,
        Err(AppMetaError::Directory { .. }) | Err(AppMetaError::Cancelled) => STATUS_HALTED,
        Err(e) if e.is_warning() => STATUS_HALTED,
        Err(_) => STATUS_FAILED,
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), AppMetaError> {
    if cancel.is_cancelled() {
        return Err(AppMetaError::Cancelled);
    }
    Ok(())
}

/// Run one upload to completion.
///
/// Preconditions are checked before any decode or network I/O: incomplete
/// connection fields first, then a missing source image. Once a session is
/// open it is closed on every exit path.
pub fn upload<C: Connector>(
    request: &UploadRequest,
    connector: &C,
    cancel: &CancellationToken,
    mut on_stage: impl FnMut(&UploadStage),
) -> Result<UploadReport, AppMetaError> {
    on_stage(&UploadStage::Validating);
    let params = &request.connection;
    params.validate()?;
    let source = request.source.as_deref().ok_or(AppMetaError::MissingAsset)?;
    check_cancelled(cancel)?;

    on_stage(&UploadStage::Encoding);
    let payload = build_payload(source, &request.target)?;
    let payload_len = payload.len();
    check_cancelled(cancel)?;

    let addr = params.display_addr();
    on_stage(&UploadStage::Connecting { addr: addr.clone() });
    let port = params.port_number()?;
    let mut session = connector
        .connect(params.host(), port, CONNECT_TIMEOUT)
        .map_err(|e| AppMetaError::Connection {
            addr: addr.clone(),
            message: format!("{:#}", e),
        })?;

    let outcome = run_session(
        &mut session,
        request,
        payload.bytes,
        cancel,
        &addr,
        &mut on_stage,
    );

    match outcome {
        Ok(stored) => {
            on_stage(&UploadStage::Closing);
            session.close().map_err(|e| AppMetaError::Connection {
                addr: addr.clone(),
                message: format!("{:#}", e),
            })?;

            let report = UploadReport {
                app_id: params.app_id(),
                remote_dir: params.remote_dir(),
                stored,
                payload_len,
            };
            tracing::info!(
                "Stored {:?} in {} on {}",
                report.stored,
                report.remote_dir,
                addr
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(close_err) = session.close() {
                tracing::debug!("Ignoring close error after failure: {:#}", close_err);
            }
            tracing::warn!("Upload to {} failed: {}", addr, e);
            Err(e)
        }
    }
}

/// Login, change directory and store every file. The caller closes the session.
fn run_session<S: RemoteSession>(
    session: &mut S,
    request: &UploadRequest,
    bytes: Vec<u8>,
    cancel: &CancellationToken,
    addr: &str,
    on_stage: &mut impl FnMut(&UploadStage),
) -> Result<Vec<String>, AppMetaError> {
    session
        .login_anonymous()
        .map_err(|e| AppMetaError::Login {
            addr: addr.to_string(),
            message: format!("{:#}", e),
        })?;
    check_cancelled(cancel)?;

    let remote_dir = request.connection.remote_dir();
    on_stage(&UploadStage::ChangingDirectory {
        path: remote_dir.clone(),
    });
    if let Err(e) = session.change_dir(&remote_dir) {
        tracing::warn!("{:#}", e);
        return Err(AppMetaError::Directory { path: remote_dir });
    }

    let file_names = request.target.file_names;
    let total = file_names.len();
    let mut buffer = Cursor::new(bytes);
    let mut stored = Vec::with_capacity(total);

    for (index, file_name) in file_names.iter().enumerate() {
        check_cancelled(cancel)?;
        on_stage(&UploadStage::Uploading {
            index,
            total,
            file_name: file_name.to_string(),
        });

        let transfer_err = |message: String| AppMetaError::Transfer {
            file_name: file_name.to_string(),
            message,
        };

        buffer
            .seek(SeekFrom::Start(0))
            .map_err(|e| transfer_err(e.to_string()))?;
        let written = session
            .store(file_name, &mut buffer)
            .map_err(|e| transfer_err(format!("{:#}", e)))?;

        tracing::debug!("Stored {} ({} bytes)", file_name, written);
        stored.push(file_name.to_string());
    }

    Ok(stored)
}
