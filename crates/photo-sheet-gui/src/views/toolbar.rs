use eframe::egui;
use std::path::PathBuf;

/// Bulk actions requested from the toolbar
pub enum ToolbarAction {
    AddPhotos(Vec<PathBuf>),
    ClearAll,
    ExportArchive,
    ExportPrint,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

pub fn show_toolbar(
    ui: &mut egui::Ui,
    sheet_count: usize,
    busy: bool,
    actions: &mut Vec<ToolbarAction>,
) {
    ui.horizontal(|ui| {
        if ui.button("➕ Add Photos").clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_files()
            {
                actions.push(ToolbarAction::AddPhotos(paths));
            }
        }

        if ui
            .add_enabled(sheet_count > 0, egui::Button::new("🗑 Clear All"))
            .clicked()
        {
            actions.push(ToolbarAction::ClearAll);
        }

        ui.separator();

        let can_export = sheet_count > 0 && !busy;
        if ui
            .add_enabled(can_export, egui::Button::new("📦 Download All (zip)"))
            .clicked()
        {
            actions.push(ToolbarAction::ExportArchive);
        }
        if ui
            .add_enabled(can_export, egui::Button::new("🖨 Print (PDF)"))
            .clicked()
        {
            actions.push(ToolbarAction::ExportPrint);
        }

        ui.separator();
        ui.label(match sheet_count {
            0 => "No sheets".to_string(),
            1 => "1 sheet".to_string(),
            n => format!("{n} sheets"),
        });
    });
}
