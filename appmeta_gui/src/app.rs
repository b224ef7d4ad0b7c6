use crate::ui;
use crate::ui::connection::ConnectionForm;
use crate::ui::dialog::Dialog;
use crate::ui::preset_tab::TabAction;
use appmeta_core::{AppCommand, AppEvent, Preset, Preview, Settings};
use eframe::egui;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

pub struct MyApp {
    // Channels
    cmd_sender: mpsc::Sender<AppCommand>,
    event_receiver: mpsc::Receiver<AppEvent>,

    form: ConnectionForm,
    active_tab: Preset,

    /// Image pushed by either tab; only replaced by a successful load
    current_image: Option<PathBuf>,
    previews: HashMap<Preset, egui::TextureHandle>,
    /// Tab that asked for the image currently being decoded
    loading_for: Option<Preset>,

    status: String,
    dialog: Option<Dialog>,
    uploading: bool,
}

impl MyApp {
    pub fn new(tx: mpsc::Sender<AppCommand>, rx: mpsc::Receiver<AppEvent>) -> Self {
        Self {
            cmd_sender: tx,
            event_receiver: rx,
            form: ConnectionForm::from_settings(Settings::load()),
            active_tab: Preset::External,
            current_image: None,
            previews: HashMap::new(),
            loading_for: None,
            status: "System Ready".to_string(),
            dialog: None,
            uploading: false,
        }
    }

    fn send(&self, cmd: AppCommand) {
        if let Err(e) = self.cmd_sender.blocking_send(cmd) {
            tracing::error!("Backend is gone: {}", e);
        }
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: AppEvent) {
        match event {
            AppEvent::Status(msg) => {
                self.status = msg;
            }
            AppEvent::Stage(stage) => {
                self.status = stage.to_string();
            }
            AppEvent::ImageLoaded { path, preview } => {
                let tab = self.loading_for.take().unwrap_or(self.active_tab);
                let texture = preview_texture(ctx, &path, &preview);
                self.previews.insert(tab, texture);
                self.current_image = Some(path);
            }
            AppEvent::SettingsSaved => {
                tracing::debug!("Settings persisted");
            }
            AppEvent::UploadSucceeded { app_id, stored } => {
                self.uploading = false;
                tracing::info!("Stored {:?} for {}", stored, app_id);
                self.dialog = Some(Dialog::info(
                    "Success",
                    format!("Modifications applied to {}.", app_id),
                ));
            }
            AppEvent::UploadFailed {
                title,
                message,
                warning,
            } => {
                self.uploading = false;
                self.dialog = Some(Dialog::failure(title, message, warning));
            }
            AppEvent::Failure {
                title,
                message,
                warning,
            } => {
                self.loading_for = None;
                self.dialog = Some(Dialog::failure(title, message, warning));
            }
        }
    }

    fn handle_tab_action(&mut self, preset: Preset, action: TabAction) {
        match action {
            TabAction::None => {}
            TabAction::LoadImage => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image Resources", &["png", "jpg", "jpeg"])
                    .pick_file()
                {
                    self.loading_for = Some(preset);
                    self.send(AppCommand::LoadImage { path });
                }
            }
            TabAction::Push => {
                self.uploading = true;
                self.send(AppCommand::Push {
                    preset,
                    source: self.current_image.clone(),
                    connection: self.form.params(),
                });
            }
            TabAction::Cancel => {
                self.send(AppCommand::CancelUpload);
            }
        }
    }
}

fn preview_texture(ctx: &egui::Context, path: &Path, preview: &Preview) -> egui::TextureHandle {
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [preview.width as usize, preview.height as usize],
        &preview.rgba,
    );
    ctx.load_texture(
        format!("preview:{}", path.display()),
        image,
        egui::TextureOptions::LINEAR,
    )
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(ctx, event);
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        let modal_open = self.dialog.is_some();
        let mut save_clicked = false;
        let mut tab_action = TabAction::None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                save_clicked = ui::connection::show(ui, &mut self.form);
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    for preset in Preset::ALL {
                        ui.selectable_value(&mut self.active_tab, preset, preset.tab_title());
                    }
                });
                ui.separator();

                tab_action = ui::preset_tab::show(
                    ui,
                    self.active_tab,
                    self.previews.get(&self.active_tab),
                    self.uploading,
                );
            });
        });

        if save_clicked {
            self.send(AppCommand::SaveSettings(self.form.settings()));
        }
        let tab = self.active_tab;
        self.handle_tab_action(tab, tab_action);

        ui::dialog::show(ctx, &mut self.dialog);

        // Keep polling backend events while nothing else triggers a repaint
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
