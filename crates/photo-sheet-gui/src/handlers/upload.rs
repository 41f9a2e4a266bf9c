use photo_sheet::{load_images, make_thumbnail};
use photo_sheet_runtime::{LoadedImage, PREVIEW_MAX_SIDE, SheetUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load_images(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    let total = paths.len();
    let _ = update_tx.send(SheetUpdate::Progress {
        operation: format!("Reading {} photos", total),
        current: 0,
        total,
    });

    let images = match load_images(&paths).await {
        Ok(images) => images,
        Err(e) => {
            let _ = update_tx.send(SheetUpdate::Error {
                message: format!("Failed to read photos: {e}"),
            });
            return;
        }
    };

    // Decode previews off the async threads, reporting each one
    let mut loaded = Vec::with_capacity(images.len());
    for (i, image) in images.into_iter().enumerate() {
        let _ = update_tx.send(SheetUpdate::Progress {
            operation: format!("Preparing preview for {}", image.name),
            current: i,
            total,
        });

        let thumbnail = if image.has_dimensions() {
            let source = image.clone();
            match tokio::task::spawn_blocking(move || make_thumbnail(&source, PREVIEW_MAX_SIDE))
                .await
            {
                Ok(Ok(thumb)) => Some(thumb),
                Ok(Err(e)) => {
                    log::warn!("No preview for {}: {}", image.name, e);
                    None
                }
                Err(e) => {
                    log::error!("Preview task for {} failed: {}", image.name, e);
                    None
                }
            }
        } else {
            None
        };

        loaded.push(LoadedImage { image, thumbnail });
    }

    let _ = update_tx.send(SheetUpdate::ImagesLoaded { images: loaded });
}
