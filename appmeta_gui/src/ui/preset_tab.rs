use appmeta_core::Preset;
use eframe::egui;
use egui_phosphor::regular::{IMAGE, UPLOAD_SIMPLE, X};

const PREVIEW_FRAME: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    None,
    LoadImage,
    Push,
    Cancel,
}

/// Draw one preset tab: target info, preview frame and the action buttons
pub fn show(
    ui: &mut egui::Ui,
    preset: Preset,
    preview: Option<&egui::TextureHandle>,
    busy: bool,
) -> TabAction {
    let mut action = TabAction::None;
    let target = preset.target();

    ui.vertical_centered(|ui| {
        ui.add_space(10.0);
        ui.label(
            egui::RichText::new(format!(
                "Target Dimensions: {}x{} px\nTarget Files: {}",
                target.width,
                target.height,
                preset.target_files()
            ))
            .strong(),
        );
        ui.add_space(15.0);

        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(PREVIEW_FRAME, PREVIEW_FRAME),
            egui::Sense::hover(),
        );
        ui.painter().rect_stroke(
            rect,
            2.0,
            egui::Stroke::new(1.0, egui::Color32::GRAY),
            egui::StrokeKind::Inside,
        );
        match preview {
            Some(texture) => {
                let image_rect = egui::Rect::from_center_size(rect.center(), texture.size_vec2());
                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "[ Image Preview ]",
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
            }
        }

        ui.add_space(20.0);
        ui.horizontal(|ui| {
            // Center the button row under the preview
            ui.add_space((ui.available_width() - 340.0).max(0.0) / 2.0);

            if ui
                .add_enabled(!busy, egui::Button::new(format!("{} Load Local Image", IMAGE)))
                .clicked()
            {
                action = TabAction::LoadImage;
            }

            if busy {
                ui.spinner();
                if ui.button(format!("{} Cancel", X)).clicked() {
                    action = TabAction::Cancel;
                }
            } else if ui
                .button(format!("{} Push to PS4 ({})", UPLOAD_SIMPLE, preset.label()))
                .clicked()
            {
                action = TabAction::Push;
            }
        });
    });

    action
}
