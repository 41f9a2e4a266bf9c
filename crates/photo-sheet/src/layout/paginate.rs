//! Splitting the image queue into sheets

use crate::types::{SheetData, UploadedImage};

/// Split images into sheets of `page_size`, preserving order.
///
/// Sheet ids are 1-based. The last sheet may hold fewer than `page_size`
/// images; its remaining slots are empty. A `page_size` of zero is treated
/// as one.
pub fn paginate(images: &[UploadedImage], page_size: usize) -> Vec<SheetData> {
    images
        .chunks(page_size.max(1))
        .enumerate()
        .map(|(i, chunk)| SheetData {
            id: i + 1,
            images: chunk.to_vec(),
        })
        .collect()
}

/// Number of sheets needed for `image_count` images
pub fn sheet_count(image_count: usize, page_size: usize) -> usize {
    image_count.div_ceil(page_size.max(1))
}
