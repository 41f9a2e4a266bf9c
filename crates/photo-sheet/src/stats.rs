use crate::constants::SLOTS_PER_SHEET;
use crate::layout::sheet_count;
use crate::types::*;

/// Calculate statistics for a queue of images
pub fn calculate_statistics(images: &[UploadedImage]) -> SheetStatistics {
    let sheets = sheet_count(images.len(), SLOTS_PER_SHEET);
    let total_slots = sheets * SLOTS_PER_SHEET;

    SheetStatistics {
        images: images.len(),
        sheets,
        filled_slots: images.len(),
        empty_slots: total_slots - images.len(),
        unsized_images: images.iter().filter(|img| !img.has_dimensions()).count(),
    }
}
