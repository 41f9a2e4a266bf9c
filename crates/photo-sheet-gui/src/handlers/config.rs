use photo_sheet_runtime::{SheetOptions, SheetUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    match SheetOptions::load(&path).await {
        Ok(options) => {
            log::info!("Configuration loaded from {}", path.display());
            let _ = update_tx.send(SheetUpdate::ConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(SheetUpdate::Error {
                message: format!("Failed to load configuration: {e}"),
            });
        }
    }
}

pub async fn handle_save_config(
    options: SheetOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<SheetUpdate>,
) {
    match options.save(&path).await {
        Ok(()) => {
            log::info!("Configuration saved to {}", path.display());
            let _ = update_tx.send(SheetUpdate::ConfigSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(SheetUpdate::Error {
                message: format!("Failed to save configuration: {e}"),
            });
        }
    }
}
