use photo_sheet::{export_archive, export_print, export_sheet};
use photo_sheet_runtime::{SheetData, SheetOptions, SheetUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_export_sheet(
    sheet: SheetData,
    options: SheetOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<SheetUpdate>,
) {
    match export_sheet(&sheet, &options, &output_path).await {
        Ok(path) => {
            let _ = update_tx.send(SheetUpdate::SheetExported {
                sheet_id: sheet.id,
                path,
            });
        }
        Err(e) => {
            log::error!("Sheet {} export failed: {}", sheet.id, e);
            let _ = update_tx.send(SheetUpdate::Error {
                message: "Export failed".to_string(),
            });
        }
    }
}

pub async fn handle_export_archive(
    sheets: Vec<SheetData>,
    options: SheetOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<SheetUpdate>,
) {
    let sheet_count = sheets.len();
    let _ = update_tx.send(SheetUpdate::Progress {
        operation: format!("Rendering {} sheets", sheet_count),
        current: 0,
        total: sheet_count,
    });

    match export_archive(&sheets, &options, &output_path).await {
        Ok(path) => {
            let _ = update_tx.send(SheetUpdate::ArchiveExported { path, sheet_count });
        }
        Err(e) => {
            log::error!("Archive export failed: {}", e);
            let _ = update_tx.send(SheetUpdate::Error {
                message: "Export failed".to_string(),
            });
        }
    }
}

pub async fn handle_export_print(
    sheets: Vec<SheetData>,
    options: SheetOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<SheetUpdate>,
) {
    let page_count = sheets.len();
    let _ = update_tx.send(SheetUpdate::Progress {
        operation: format!("Building {} print pages", page_count),
        current: 0,
        total: page_count,
    });

    match export_print(&sheets, &options, &output_path).await {
        Ok(path) => {
            let _ = update_tx.send(SheetUpdate::PrintExported { path, page_count });
        }
        Err(e) => {
            log::error!("Print export failed: {}", e);
            let _ = update_tx.send(SheetUpdate::Error {
                message: "Export failed".to_string(),
            });
        }
    }
}
