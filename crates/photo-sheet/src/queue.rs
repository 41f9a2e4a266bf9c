//! The ordered upload queue
//!
//! The queue is the single source of truth for images and their
//! adjustments. Each entry owns a display handle of type `H` (a GUI texture,
//! for instance). Handles are released by `Drop` when their image leaves
//! the queue, so every acquisition is paired with exactly one release.

use crate::constants::SLOTS_PER_SHEET;
use crate::layout::paginate;
use crate::types::{ImageAdjustment, ImageId, SheetData, UploadedImage};

/// One queued image together with its display handle
#[derive(Debug)]
pub struct QueueEntry<H> {
    pub image: UploadedImage,
    pub display: H,
}

/// Ordered collection of uploaded images
#[derive(Debug)]
pub struct ImageQueue<H = ()> {
    entries: Vec<QueueEntry<H>>,
}

impl<H> Default for ImageQueue<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ImageQueue<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an upload batch in its source order.
    ///
    /// Every appended image starts centred at scale 1. The fit mode is taken
    /// from the incoming image instead of being forced to `Cover`: uploads
    /// built with `UploadedImage::from_bytes` are `Cover`, and front-ends
    /// that offer a different starting fit (the GUI's default fit, the
    /// CLI's `--fit`) set it on the image before appending.
    pub fn append(&mut self, batch: impl IntoIterator<Item = (UploadedImage, H)>) {
        self.entries
            .extend(batch.into_iter().map(|(mut image, display)| {
                image.adjustment = ImageAdjustment::with_fit_mode(image.adjustment.fit_mode);
                QueueEntry { image, display }
            }));
    }

    /// Replace the adjustment of an image.
    ///
    /// Returns `false` without doing anything if the image is no longer
    /// queued, so late updates from an in-flight gesture are harmless.
    pub fn update_adjustment(&mut self, id: &ImageId, adjustment: ImageAdjustment) -> bool {
        match self.entries.iter_mut().find(|e| &e.image.id == id) {
            Some(entry) => {
                entry.image.adjustment = adjustment;
                true
            }
            None => false,
        }
    }

    /// Remove an image, releasing its display handle.
    ///
    /// Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: &ImageId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.image.id != id);
        let removed = self.entries.len() != before;
        if removed {
            log::debug!("Removed image {} from queue", id);
        }
        removed
    }

    /// Remove every image, releasing all display handles
    pub fn clear(&mut self) {
        log::debug!("Clearing {} images from queue", self.entries.len());
        self.entries.clear();
    }

    pub fn get(&self, id: &ImageId) -> Option<&UploadedImage> {
        self.entries
            .iter()
            .find(|e| &e.image.id == id)
            .map(|e| &e.image)
    }

    pub fn display(&self, id: &ImageId) -> Option<&H> {
        self.entries
            .iter()
            .find(|e| &e.image.id == id)
            .map(|e| &e.display)
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.entries.iter().any(|e| &e.image.id == id)
    }

    pub fn entries(&self) -> &[QueueEntry<H>] {
        &self.entries
    }

    pub fn images(&self) -> impl Iterator<Item = &UploadedImage> {
        self.entries.iter().map(|e| &e.image)
    }

    /// Snapshot of the queued images in order
    pub fn snapshot(&self) -> Vec<UploadedImage> {
        self.images().cloned().collect()
    }

    /// Sheets for the current queue, recomputed from scratch
    pub fn sheets(&self) -> Vec<SheetData> {
        paginate(&self.snapshot(), SLOTS_PER_SHEET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FitMode, SourceBytes};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandle(Arc<AtomicUsize>);

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn image(name: &str) -> UploadedImage {
        UploadedImage {
            id: ImageId::from(name),
            name: name.to_string(),
            source: SourceBytes::default(),
            width: 600,
            height: 800,
            adjustment: ImageAdjustment {
                scale: 3.0,
                x: 1.0,
                y: 2.0,
                fit_mode: FitMode::Cover,
            },
        }
    }

    #[test]
    fn test_append_defaults_adjustment() {
        let mut queue = ImageQueue::new();
        queue.append([(image("a"), ())]);
        assert_eq!(
            queue.get(&ImageId::from("a")).unwrap().adjustment,
            ImageAdjustment::default()
        );
    }

    #[test]
    fn test_append_keeps_requested_fit_mode() {
        let mut queue = ImageQueue::new();
        let mut img = image("a");
        img.adjustment.fit_mode = FitMode::Contain;
        queue.append([(img, ())]);
        assert_eq!(
            queue.get(&ImageId::from("a")).unwrap().adjustment,
            ImageAdjustment::with_fit_mode(FitMode::Contain)
        );
    }

    #[test]
    fn test_update_adjustment_replaces_value() {
        let mut queue = ImageQueue::new();
        queue.append([(image("a"), ()), (image("b"), ())]);

        let adj = ImageAdjustment::default().with_offset(10.0, 90.0);
        assert!(queue.update_adjustment(&ImageId::from("b"), adj));
        assert_eq!(queue.get(&ImageId::from("b")).unwrap().adjustment, adj);
        assert_eq!(
            queue.get(&ImageId::from("a")).unwrap().adjustment,
            ImageAdjustment::default()
        );
    }

    #[test]
    fn test_stale_update_is_noop() {
        let mut queue = ImageQueue::new();
        queue.append([(image("a"), ())]);
        assert!(queue.remove(&ImageId::from("a")));

        let adj = ImageAdjustment::default().with_scale(2.0);
        assert!(!queue.update_adjustment(&ImageId::from("a"), adj));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_releases_only_that_handle() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut queue = ImageQueue::new();
        queue.append([
            (image("a"), CountingHandle(released.clone())),
            (image("b"), CountingHandle(released.clone())),
        ]);

        assert!(queue.remove(&ImageId::from("a")));
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(!queue.contains(&ImageId::from("a")));
        assert!(queue.display(&ImageId::from("b")).is_some());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut queue = ImageQueue::new();
        queue.append([(image("a"), CountingHandle(released.clone()))]);

        assert!(!queue.remove(&ImageId::from("zzz")));
        assert_eq!(queue.len(), 1);
        assert_eq!(released.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_releases_every_handle() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut queue = ImageQueue::new();
        queue.append((0..4).map(|i| {
            (
                image(&format!("img{i}")),
                CountingHandle(released.clone()),
            )
        }));

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(released.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_removed_image_leaves_sheets() {
        let mut queue = ImageQueue::new();
        queue.append((0..6).map(|i| (image(&format!("img{i}")), ())));
        assert_eq!(queue.sheets().len(), 2);

        queue.remove(&ImageId::from("img2"));
        let sheets = queue.sheets();
        assert_eq!(sheets.len(), 1);
        assert!(
            sheets[0]
                .images
                .iter()
                .all(|img| img.id != ImageId::from("img2"))
        );
    }
}
