use photo_sheet_runtime::{SheetCommand, SheetUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes sheet commands and sends updates.
///
/// Commands run strictly one after another, so bulk exports never overlap
/// and rasterize their sheets in sequence.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<SheetCommand>,
    update_tx: mpsc::UnboundedSender<SheetUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        log::debug!("Worker running: {}", cmd.name());
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: SheetCommand, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    match cmd {
        SheetCommand::LoadImages { paths } => {
            handlers::upload::handle_load_images(paths, update_tx).await;
        }
        SheetCommand::ExportSheet {
            sheet,
            options,
            output_path,
        } => {
            handlers::export::handle_export_sheet(sheet, options, output_path, update_tx).await;
        }
        SheetCommand::ExportArchive {
            sheets,
            options,
            output_path,
        } => {
            handlers::export::handle_export_archive(sheets, options, output_path, update_tx).await;
        }
        SheetCommand::ExportPrint {
            sheets,
            options,
            output_path,
        } => {
            handlers::export::handle_export_print(sheets, options, output_path, update_tx).await;
        }
        SheetCommand::LoadConfig { path } => {
            handlers::config::handle_load_config(path, update_tx).await;
        }
        SheetCommand::SaveConfig { options, path } => {
            handlers::config::handle_save_config(options, path, update_tx).await;
        }
    }
}
