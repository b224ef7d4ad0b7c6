use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod connection;
pub mod error;
pub mod payload;
pub mod preset;
pub mod preview;
pub mod transfer;

pub use config::Settings;
pub use connection::ConnectionParams;
pub use error::{AppMetaError, ErrorKind};
pub use preset::{Preset, TargetSpec};
pub use preview::Preview;

use transfer::{Connector, FtpConnector, UploadRequest, UploadStage, final_status, spawn_upload};

/// Title used when a picked image cannot be decoded for preview
pub const RENDER_ERROR_TITLE: &str = "Render Error";

//Command from GUI to Core
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Decode a local image and produce its preview
    LoadImage { path: PathBuf },
    /// Persist the console address
    SaveSettings(Settings),
    /// Resize the loaded image for `preset` and upload it
    Push {
        preset: Preset,
        source: Option<PathBuf>,
        connection: ConnectionParams,
    },
    /// Stop the in-flight upload at its next stage boundary
    CancelUpload,
}

//Report from Core to GUI
#[derive(Debug, Clone)]
pub enum AppEvent {
    Status(String),

    /// A new image is loaded; the GUI should make it current
    ImageLoaded { path: PathBuf, preview: Preview },

    SettingsSaved,

    Stage(UploadStage),

    UploadSucceeded { app_id: String, stored: Vec<String> },

    /// The upload ended without storing everything, shown as a dialog
    UploadFailed {
        title: String,
        message: String,
        warning: bool,
    },

    /// Failure of a non-upload action, shown as a dialog
    Failure {
        title: String,
        message: String,
        /// Validation problems are shown as warnings
        warning: bool,
    },
}

impl AppEvent {
    pub fn failure(err: &AppMetaError) -> Self {
        AppEvent::Failure {
            title: err.title().to_string(),
            message: err.to_string(),
            warning: err.is_warning(),
        }
    }

    pub fn upload_failed(err: &AppMetaError) -> Self {
        AppEvent::UploadFailed {
            title: err.title().to_string(),
            message: err.to_string(),
            warning: err.is_warning(),
        }
    }
}

struct ActiveUpload {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ActiveUpload {
    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

pub async fn run_backend(cmd_rx: mpsc::Receiver<AppCommand>, event_tx: mpsc::Sender<AppEvent>) {
    run_backend_with(FtpConnector, cmd_rx, event_tx).await;
}

/// Backend loop with an injectable connector. Returns when the command channel closes.
pub async fn run_backend_with<C>(
    connector: C,
    mut cmd_rx: mpsc::Receiver<AppCommand>,
    event_tx: mpsc::Sender<AppEvent>,
) where
    C: Connector + Clone + Send + 'static,
{
    let mut active: Option<ActiveUpload> = None;
    // Ticket of the most recent LoadImage; older decodes are discarded
    let latest_load = Arc::new(AtomicU64::new(0));

    // Main loop: Wait for commands from UI
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AppCommand::LoadImage { path } => {
                let ticket = latest_load.fetch_add(1, Ordering::SeqCst) + 1;
                let latest = latest_load.clone();
                let evt = event_tx.clone();
                tokio::spawn(async move {
                    load_image(path, ticket, latest, evt).await;
                });
            }
            AppCommand::SaveSettings(settings) => match settings.save() {
                Ok(()) => {
                    let _ = event_tx.send(AppEvent::SettingsSaved).await;
                    let _ = event_tx
                        .send(AppEvent::Status("Configuration metrics saved.".to_string()))
                        .await;
                }
                Err(e) => {
                    tracing::error!("Failed to save settings: {}", e);
                    let _ = event_tx.send(AppEvent::failure(&e)).await;
                }
            },
            AppCommand::Push {
                preset,
                source,
                connection,
            } => {
                if active.as_ref().is_some_and(ActiveUpload::is_running) {
                    let _ = event_tx
                        .send(AppEvent::Status(
                            "An upload is already in progress.".to_string(),
                        ))
                        .await;
                    continue;
                }

                tracing::info!(
                    "Push ({}) to {} for {}",
                    preset.label(),
                    connection.display_addr(),
                    connection.app_id()
                );
                let request = UploadRequest {
                    source,
                    target: preset.target(),
                    connection,
                };
                let cancel = CancellationToken::new();
                let upload = spawn_upload(request, connector.clone(), cancel.clone(), event_tx.clone());

                let evt = event_tx.clone();
                let handle = tokio::spawn(async move {
                    let result = match upload.await {
                        Ok(result) => result,
                        Err(e) => {
                            tracing::error!("Upload task join error: {}", e);
                            let _ = evt
                                .send(AppEvent::UploadFailed {
                                    title: "Execution Error".to_string(),
                                    message: format!("Upload task failed: {}", e),
                                    warning: false,
                                })
                                .await;
                            return;
                        }
                    };

                    let _ = evt
                        .send(AppEvent::Status(final_status(&result).to_string()))
                        .await;
                    let event = match result {
                        Ok(report) => AppEvent::UploadSucceeded {
                            app_id: report.app_id,
                            stored: report.stored,
                        },
                        Err(e) => AppEvent::upload_failed(&e),
                    };
                    let _ = evt.send(event).await;
                });

                active = Some(ActiveUpload { cancel, handle });
            }
            AppCommand::CancelUpload => match active.as_ref() {
                Some(upload) if upload.is_running() => {
                    upload.cancel.cancel();
                    let _ = event_tx
                        .send(AppEvent::Status(
                            "Cancelling after the current step...".to_string(),
                        ))
                        .await;
                }
                _ => {
                    let _ = event_tx
                        .send(AppEvent::Status("No upload in progress.".to_string()))
                        .await;
                }
            },
        }
    }

    // Let a running upload report before the loop goes away
    if let Some(upload) = active
        && let Err(e) = upload.handle.await
    {
        tracing::error!("Upload watcher failed: {}", e);
    }
}

async fn load_image(
    path: PathBuf,
    ticket: u64,
    latest: Arc<AtomicU64>,
    event_tx: mpsc::Sender<AppEvent>,
) {
    let decode_path = path.clone();
    let result = tokio::task::spawn_blocking(move || preview::load_preview(&decode_path)).await;

    if latest.load(Ordering::SeqCst) != ticket {
        tracing::debug!("Dropping superseded preview of {:?}", path);
        return;
    }

    let event = match result {
        Ok(Ok(preview)) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::info!(
                "Loaded {:?} ({}x{})",
                path,
                preview.source_width,
                preview.source_height
            );
            let _ = event_tx
                .send(AppEvent::Status(format!("Loaded payload: {}", name)))
                .await;
            AppEvent::ImageLoaded { path, preview }
        }
        Ok(Err(e)) => AppEvent::Failure {
            title: RENDER_ERROR_TITLE.to_string(),
            message: e.to_string(),
            warning: false,
        },
        Err(e) => AppEvent::Failure {
            title: RENDER_ERROR_TITLE.to_string(),
            message: format!("Preview task failed: {}", e),
            warning: false,
        },
    };
    let _ = event_tx.send(event).await;
}
