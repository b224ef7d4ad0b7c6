use appmeta_core::{ConnectionParams, Settings};
use eframe::egui;
use egui_phosphor::regular::FLOPPY_DISK;

/// Raw form fields, edited in place by the text boxes
#[derive(Debug, Clone, Default)]
pub struct ConnectionForm {
    pub ip: String,
    pub port: String,
    pub cusa: String,
}

impl ConnectionForm {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            ip: settings.ip,
            port: settings.port,
            cusa: String::new(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            ip: self.ip.clone(),
            port: self.port.clone(),
        }
    }

    pub fn params(&self) -> ConnectionParams {
        ConnectionParams::new(&self.ip, &self.port, &self.cusa)
    }
}

/// Draw the "Connection Parameters" group. Returns true when "Save IP/Port" was clicked.
pub fn show(ui: &mut egui::Ui, form: &mut ConnectionForm) -> bool {
    let mut save_clicked = false;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Connection Parameters").strong());
        ui.add_space(5.0);

        egui::Grid::new("connection_grid")
            .num_columns(4)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Console IP:");
                ui.add(egui::TextEdit::singleline(&mut form.ip).desired_width(160.0));
                ui.label("FTP Port:");
                ui.add(egui::TextEdit::singleline(&mut form.port).desired_width(80.0));
                ui.end_row();

                ui.label("CUSA ID:");
                ui.add(
                    egui::TextEdit::singleline(&mut form.cusa)
                        .desired_width(160.0)
                        .hint_text("CUSA00000"),
                );
                ui.label("");
                if ui
                    .button(format!("{} Save IP/Port", FLOPPY_DISK))
                    .clicked()
                {
                    save_clicked = true;
                }
                ui.end_row();
            });
    });

    save_clicked
}
