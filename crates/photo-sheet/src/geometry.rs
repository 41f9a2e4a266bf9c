//! Fit calculation for an image inside a slot
//!
//! The calculator works in the slot's unrotated ("logical") space. For the
//! landscape slot the caller passes the swapped working-area size, and the
//! renderer rotates the result onto the sheet.
//!
//! The result is expressed the same way a layout engine would style it:
//! one axis is pinned to 100% of the slot and the other follows the image
//! aspect ratio, the image centre is anchored at `(x%, y%)` of the slot, and
//! a uniform scale is applied around that centre.

use crate::types::{FitMode, ImageAdjustment};

/// Which slot axis the image's base size is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillAxis {
    /// Width is 100% of the slot, height follows the aspect ratio
    Width,
    /// Height is 100% of the slot, width follows the aspect ratio
    Height,
}

/// Display box descriptor for an image in a slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBox {
    pub fill_axis: FillAxis,
    /// Horizontal anchor of the image centre, percent of slot width
    pub left_pct: f32,
    /// Vertical anchor of the image centre, percent of slot height
    pub top_pct: f32,
    /// Uniform scale applied around the image centre
    pub scale: f32,
    /// Natural width / height of the image
    pub image_ratio: f32,
}

/// Concrete placement of an image in slot units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub center_x: f32,
    pub center_y: f32,
    /// Rendered width including the adjustment scale
    pub width: f32,
    /// Rendered height including the adjustment scale
    pub height: f32,
}

impl PlacedImage {
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center_y - self.height / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center_y + self.height / 2.0
    }

    /// Whether the image covers the whole `slot_w` x `slot_h` box
    pub fn covers(&self, slot_w: f32, slot_h: f32) -> bool {
        const EPS: f32 = 1e-3;
        self.left() <= EPS
            && self.top() <= EPS
            && self.right() >= slot_w - EPS
            && self.bottom() >= slot_h - EPS
    }
}

/// Decide which axis the base fit pins to 100% of the slot
pub fn fill_axis(image_ratio: f32, slot_ratio: f32, fit_mode: FitMode) -> FillAxis {
    let image_is_wider = image_ratio > slot_ratio;
    match (fit_mode, image_is_wider) {
        // Cover: pin the axis that leaves the other one overflowing
        (FitMode::Cover, true) => FillAxis::Height,
        (FitMode::Cover, false) => FillAxis::Width,
        // Contain: pin the axis that leaves the other one inside the slot
        (FitMode::Contain, true) => FillAxis::Width,
        (FitMode::Contain, false) => FillAxis::Height,
    }
}

/// Compute the display box for an image.
///
/// Returns `None` when there is nothing to position: missing natural
/// dimensions or a degenerate slot.
pub fn compute_display_box(
    natural_width: u32,
    natural_height: u32,
    slot_width: f32,
    slot_height: f32,
    adjustment: &ImageAdjustment,
) -> Option<DisplayBox> {
    if natural_width == 0 || natural_height == 0 || slot_width <= 0.0 || slot_height <= 0.0 {
        return None;
    }

    let slot_ratio = slot_width / slot_height;
    let image_ratio = natural_width as f32 / natural_height as f32;

    Some(DisplayBox {
        fill_axis: fill_axis(image_ratio, slot_ratio, adjustment.fit_mode),
        left_pct: adjustment.x,
        top_pct: adjustment.y,
        scale: adjustment.scale,
        image_ratio,
    })
}

impl DisplayBox {
    /// Base (unscaled) size of the image in slot units
    pub fn base_size(&self, slot_width: f32, slot_height: f32) -> (f32, f32) {
        match self.fill_axis {
            FillAxis::Width => (slot_width, slot_width / self.image_ratio),
            FillAxis::Height => (slot_height * self.image_ratio, slot_height),
        }
    }

    /// Resolve the descriptor against a concrete slot size
    pub fn resolve(&self, slot_width: f32, slot_height: f32) -> PlacedImage {
        let (base_w, base_h) = self.base_size(slot_width, slot_height);
        PlacedImage {
            center_x: slot_width * self.left_pct / 100.0,
            center_y: slot_height * self.top_pct / 100.0,
            width: base_w * self.scale,
            height: base_h * self.scale,
        }
    }
}

/// Convenience: compute and resolve in one step
pub fn place_image(
    natural_width: u32,
    natural_height: u32,
    slot_width: f32,
    slot_height: f32,
    adjustment: &ImageAdjustment,
) -> Option<PlacedImage> {
    compute_display_box(
        natural_width,
        natural_height,
        slot_width,
        slot_height,
        adjustment,
    )
    .map(|b| b.resolve(slot_width, slot_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_cover_wide_image_pins_height() {
        let adj = ImageAdjustment::default();
        let b = compute_display_box(4000, 3000, 70.0, 100.0, &adj).unwrap();
        assert_eq!(b.fill_axis, FillAxis::Height);

        let placed = b.resolve(70.0, 100.0);
        assert!(approx(placed.height, 100.0));
        assert!(approx(placed.width, 100.0 * 4.0 / 3.0));
    }

    #[test]
    fn test_cover_tall_image_pins_width() {
        let adj = ImageAdjustment::default();
        let b = compute_display_box(1000, 3000, 70.0, 100.0, &adj).unwrap();
        assert_eq!(b.fill_axis, FillAxis::Width);
        let placed = b.resolve(70.0, 100.0);
        assert!(approx(placed.width, 70.0));
        assert!(approx(placed.height, 210.0));
    }

    #[test]
    fn test_contain_inverts_axis() {
        let adj = ImageAdjustment::with_fit_mode(FitMode::Contain);
        let wide = compute_display_box(4000, 3000, 70.0, 100.0, &adj).unwrap();
        assert_eq!(wide.fill_axis, FillAxis::Width);

        let tall = compute_display_box(1000, 3000, 70.0, 100.0, &adj).unwrap();
        assert_eq!(tall.fill_axis, FillAxis::Height);

        // Contained image never overflows the slot at scale 1
        let placed = wide.resolve(70.0, 100.0);
        assert!(placed.width <= 70.0 + 1e-3 && placed.height <= 100.0 + 1e-3);
    }

    #[test]
    fn test_scale_is_applied_around_anchor() {
        let adj = ImageAdjustment::default().with_scale(2.0);
        let placed = place_image(700, 1000, 70.0, 100.0, &adj).unwrap();
        assert!(approx(placed.center_x, 35.0));
        assert!(approx(placed.center_y, 50.0));
        assert!(approx(placed.width, 140.0));
        assert!(approx(placed.left(), -35.0));
    }

    #[test]
    fn test_offset_moves_centre_in_percent() {
        let adj = ImageAdjustment::default().with_offset(25.0, 80.0);
        let placed = place_image(700, 1000, 70.0, 100.0, &adj).unwrap();
        assert!(approx(placed.center_x, 17.5));
        assert!(approx(placed.center_y, 80.0));
    }

    #[test]
    fn test_missing_dimensions_yield_nothing() {
        let adj = ImageAdjustment::default();
        assert!(compute_display_box(0, 0, 70.0, 100.0, &adj).is_none());
        assert!(compute_display_box(100, 0, 70.0, 100.0, &adj).is_none());
        assert!(compute_display_box(100, 100, 0.0, 100.0, &adj).is_none());
    }
}
