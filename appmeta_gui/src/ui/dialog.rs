use eframe::egui;
use egui_phosphor::regular::{CHECK_CIRCLE, WARNING, X_CIRCLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

/// Modal message box, replaces the whole form until dismissed
#[derive(Debug, Clone)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub level: DialogLevel,
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: DialogLevel::Info,
        }
    }

    pub fn failure(title: String, message: String, warning: bool) -> Self {
        Self {
            title,
            message,
            level: if warning {
                DialogLevel::Warning
            } else {
                DialogLevel::Error
            },
        }
    }
}

/// Render the dialog, if any. Pressing OK clears `state`.
pub fn show(ctx: &egui::Context, state: &mut Option<Dialog>) {
    let mut should_close = false;

    if let Some(dialog) = state.as_ref() {
        let (icon, color) = match dialog.level {
            DialogLevel::Info => (CHECK_CIRCLE, egui::Color32::from_rgb(100, 200, 100)),
            DialogLevel::Warning => (WARNING, egui::Color32::from_rgb(255, 200, 100)),
            DialogLevel::Error => (X_CIRCLE, egui::Color32::from_rgb(255, 100, 100)),
        };

        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, egui::RichText::new(icon).size(28.0));
                    ui.label(dialog.message.as_str());
                });
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });
    }

    if should_close {
        *state = None;
    }
}
