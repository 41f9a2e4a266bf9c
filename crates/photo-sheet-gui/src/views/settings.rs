use eframe::egui;
use photo_sheet::{FitMode, MAX_OVERSAMPLING, SheetOptions, SheetStatistics};
use std::path::PathBuf;

use crate::ui_components::{DragValueBuilder, button_group, color_row};

/// Configuration file requests from the settings panel
pub enum SettingsAction {
    Save(PathBuf),
    Load(PathBuf),
}

pub fn show_settings(
    ui: &mut egui::Ui,
    options: &mut SheetOptions,
    default_fit: &mut FitMode,
    stats: &SheetStatistics,
    actions: &mut Vec<SettingsAction>,
) {
    egui::CollapsingHeader::new("⚙ Export Settings")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Brand:");
                ui.text_edit_singleline(&mut options.brand);
            });
            if options.brand.trim().is_empty() {
                ui.colored_label(egui::Color32::RED, "Brand must not be empty");
            }

            ui.horizontal(|ui| {
                ui.label("Oversampling:");
                DragValueBuilder::new(&mut options.oversampling)
                    .range(1.0..=MAX_OVERSAMPLING)
                    .speed(0.1)
                    .suffix("×")
                    .show(ui);
            });
            let (width, height) = photo_sheet::render::sheet_pixel_size(options);
            ui.weak(format!("Sheet images: {width}×{height} px"));

            ui.add_space(5.0);
            ui.label("New photos:");
            button_group(
                ui,
                default_fit,
                &[(FitMode::Cover, "Fill slot"), (FitMode::Contain, "Fit whole photo")],
            );
        });

    egui::CollapsingHeader::new("🎨 Appearance")
        .default_open(false)
        .show(ui, |ui| {
            color_row(ui, "Page background", &mut options.page_background);
            color_row(ui, "Slot background", &mut options.slot_background);
            color_row(ui, "Slot border", &mut options.border_color);
            color_row(ui, "Footer rule", &mut options.footer_color);
            ui.checkbox(&mut options.draw_slot_borders, "Draw slot borders");
            ui.checkbox(&mut options.draw_footer_rule, "Draw footer rule");

            ui.add_space(5.0);
            ui.checkbox(&mut options.draw_header, "Print header");
            ui.add_enabled_ui(options.draw_header, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut options.header_title);
                });
                ui.horizontal(|ui| {
                    ui.label("Reference prefix:");
                    ui.add(
                        egui::TextEdit::singleline(&mut options.reference_prefix)
                            .desired_width(60.0),
                    );
                });
                ui.weak(options.sheet_reference(1));
            });

            ui.checkbox(&mut options.draw_wordmark, "Print wordmark");
            ui.add_enabled_ui(options.draw_wordmark, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut options.wordmark_primary)
                            .desired_width(90.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut options.wordmark_secondary)
                            .desired_width(90.0),
                    );
                });
            });

            if ui.button("↺ Reset to defaults").clicked() {
                let brand = std::mem::take(&mut options.brand);
                *options = SheetOptions {
                    brand,
                    ..SheetOptions::default()
                };
            }
        });

    egui::CollapsingHeader::new("💾 Configuration")
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Save…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .set_file_name("photo-sheet.json")
                        .save_file()
                    {
                        actions.push(SettingsAction::Save(path));
                    }
                }
                if ui.button("Load…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                    {
                        actions.push(SettingsAction::Load(path));
                    }
                }
            });
        });

    egui::CollapsingHeader::new("📊 Statistics")
        .default_open(true)
        .show(ui, |ui| {
            if stats.images == 0 {
                ui.label("No statistics available");
                return;
            }
            ui.label(format!("Photos: {}", stats.images));
            ui.label(format!("Sheets: {}", stats.sheets));
            ui.label(format!("Filled slots: {}", stats.filled_slots));
            if stats.empty_slots > 0 {
                ui.label(format!("Empty slots: {}", stats.empty_slots));
            }
            if stats.unsized_images > 0 {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("Unreadable photos: {}", stats.unsized_images),
                );
            }
        });
}
