use crate::AppEvent;
use crate::error::AppMetaError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::pipeline::{UploadReport, UploadRequest, upload};
use super::session::Connector;

/// Run the blocking pipeline on tokio's blocking pool.
///
/// Stage changes are forwarded as [`AppEvent::Stage`]. Cancelling `cancel` stops
/// the pipeline at the next stage boundary; a socket call already in progress
/// runs to completion first.
pub fn spawn_upload<C>(
    request: UploadRequest,
    connector: C,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<Result<UploadReport, AppMetaError>>
where
    C: Connector + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        upload(&request, &connector, &cancel, |stage| {
            // Receiver gone means the UI has shut down; keep going regardless
            let _ = event_tx.blocking_send(AppEvent::Stage(stage.clone()));
        })
    })
}
