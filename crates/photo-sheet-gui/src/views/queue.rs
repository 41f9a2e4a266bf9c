use eframe::egui;
use photo_sheet::{ImageId, ImageQueue};

use super::SlotTexture;

const THUMB_SIZE: f32 = 48.0;

/// List the queued uploads in sheet order with a remove button each
pub fn show_queue(ui: &mut egui::Ui, queue: &ImageQueue<SlotTexture>, removed: &mut Vec<ImageId>) {
    egui::CollapsingHeader::new(format!("🖼 Photos ({})", queue.len()))
        .default_open(true)
        .show(ui, |ui| {
            if queue.is_empty() {
                ui.label("No photos yet");
                ui.label("Add photos or drop image files onto the window");
                return;
            }

            for (position, entry) in queue.entries().iter().enumerate() {
                ui.horizontal(|ui| {
                    match &entry.display {
                        Some(texture) => {
                            let size = texture.size_vec2();
                            let scale = THUMB_SIZE / size.x.max(size.y).max(1.0);
                            ui.add(egui::Image::new((texture.id(), size * scale)));
                        }
                        None => {
                            ui.add_sized([THUMB_SIZE, THUMB_SIZE], egui::Label::new("?"));
                        }
                    }

                    ui.vertical(|ui| {
                        ui.label(format!("{}. {}", position + 1, entry.image.name));
                        if entry.image.has_dimensions() {
                            ui.weak(format!("{}×{}", entry.image.width, entry.image.height));
                        } else {
                            ui.weak("unreadable");
                        }
                    });

                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        removed.push(entry.image.id.clone());
                    }
                });
            }
        });
}
