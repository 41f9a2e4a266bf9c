//! Pan/zoom gesture handling for a single slot
//!
//! A slot moves through `Idle → Editing → Dragging → Editing → Idle`. The
//! state is a plain value threaded through the front-end's event handlers,
//! so the drag math can be exercised without any rendering surface.
//!
//! Pointer positions are in device pixels. Every method that changes the
//! image returns a new `ImageAdjustment`; the caller hands it to
//! `ImageQueue::update_adjustment`.

use crate::types::{ImageAdjustment, ImageId, SheetData};
use std::collections::HashMap;

/// Pointer and image position captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub pointer_x: f32,
    pub pointer_y: f32,
    pub image_x: f32,
    pub image_y: f32,
}

/// Interaction state of one slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlotGesture {
    #[default]
    Idle,
    Editing,
    Dragging(DragOrigin),
}

impl SlotGesture {
    /// Primary click on the slot. Only an occupied idle slot enters editing.
    pub fn click(self, occupied: bool) -> Self {
        match self {
            SlotGesture::Idle if occupied => SlotGesture::Editing,
            other => other,
        }
    }

    /// Pointer pressed inside the slot
    pub fn press(self, pointer: (f32, f32), adjustment: &ImageAdjustment) -> Self {
        match self {
            SlotGesture::Editing => SlotGesture::Dragging(DragOrigin {
                pointer_x: pointer.0,
                pointer_y: pointer.1,
                image_x: adjustment.x,
                image_y: adjustment.y,
            }),
            other => other,
        }
    }

    /// Pointer released anywhere
    pub fn release(self) -> Self {
        match self {
            SlotGesture::Dragging(_) => SlotGesture::Editing,
            other => other,
        }
    }

    /// Explicit confirm action
    pub fn confirm(self) -> Self {
        match self {
            SlotGesture::Editing => SlotGesture::Idle,
            other => other,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, SlotGesture::Editing | SlotGesture::Dragging(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SlotGesture::Dragging(_))
    }

    /// Pointer moved while dragging.
    ///
    /// `slot_size` is the slot's rendered footprint in device pixels and
    /// `rotated` marks the landscape slot. Returns `None` when not dragging.
    pub fn drag_to(
        &self,
        pointer: (f32, f32),
        adjustment: &ImageAdjustment,
        slot_size: (f32, f32),
        rotated: bool,
    ) -> Option<ImageAdjustment> {
        let SlotGesture::Dragging(origin) = self else {
            return None;
        };

        let dx = pointer.0 - origin.pointer_x;
        let dy = pointer.1 - origin.pointer_y;
        let sensitivity = drag_sensitivity(slot_size.0, slot_size.1, adjustment.scale);
        let (x, y) = pan_offset(origin, dx, dy, sensitivity, rotated);

        Some(adjustment.with_offset(x, y))
    }

    /// Zoom control; only active while editing
    pub fn zoom(&self, adjustment: &ImageAdjustment, scale: f32) -> Option<ImageAdjustment> {
        match self {
            SlotGesture::Editing => Some(adjustment.with_scale(scale)),
            _ => None,
        }
    }

    /// Fit-mode toggle; only active while editing. Resets zoom and pan.
    pub fn toggle_fit(&self, adjustment: &ImageAdjustment) -> Option<ImageAdjustment> {
        match self {
            SlotGesture::Editing => Some(adjustment.toggle_fit_mode()),
            _ => None,
        }
    }
}

/// Percent-of-slot movement per device pixel at the current zoom.
///
/// Higher zoom gives a smaller change for the same pixel drag so panning
/// feels the same at any magnification.
pub fn drag_sensitivity(slot_width: f32, slot_height: f32, scale: f32) -> f32 {
    let reference = slot_width.min(slot_height) * scale;
    if reference > 0.0 { 100.0 / reference } else { 0.0 }
}

/// Apply a pixel delta to the drag origin.
///
/// The landscape slot shows its working area rotated 90° clockwise, so
/// screen axes map onto the logical axes swapped with one sign flipped:
/// dragging down moves the image towards larger x, dragging right towards
/// smaller y.
pub fn pan_offset(
    origin: &DragOrigin,
    dx: f32,
    dy: f32,
    sensitivity: f32,
    rotated: bool,
) -> (f32, f32) {
    if rotated {
        (
            origin.image_x + dy * sensitivity,
            origin.image_y - dx * sensitivity,
        )
    } else {
        (
            origin.image_x + dx * sensitivity,
            origin.image_y + dy * sensitivity,
        )
    }
}

/// Gesture state of every placed image, tied to the slot it sits in.
///
/// An image that moves to another sheet or slot (after a removal earlier in
/// the queue) starts over from `Idle` in its new position.
#[derive(Debug, Clone, Default)]
pub struct SlotGestures {
    states: HashMap<ImageId, ((usize, usize), SlotGesture)>,
}

impl SlotGestures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the current pagination: forget removed images and reset the
    /// ones whose `(sheet, slot)` position changed.
    pub fn sync(&mut self, sheets: &[SheetData]) {
        let mut positions = HashMap::new();
        for sheet in sheets {
            for (slot, image) in sheet.images.iter().enumerate() {
                positions.insert(&image.id, (sheet.id, slot));
            }
        }

        self.states.retain(|id, (position, gesture)| match positions.get(id) {
            Some(current) => {
                if current != position {
                    log::debug!("Image {} moved to sheet {} slot {}", id, current.0, current.1);
                    *position = *current;
                    *gesture = SlotGesture::Idle;
                }
                true
            }
            None => false,
        });
    }

    /// Gesture of the image at `(sheet_id, slot)`, created idle when missing
    pub fn entry(&mut self, id: &ImageId, sheet_id: usize, slot: usize) -> &mut SlotGesture {
        let (position, gesture) = self
            .states
            .entry(id.clone())
            .or_insert(((sheet_id, slot), SlotGesture::Idle));
        if *position != (sheet_id, slot) {
            *position = (sheet_id, slot);
            *gesture = SlotGesture::Idle;
        }
        gesture
    }

    pub fn get(&self, id: &ImageId) -> Option<SlotGesture> {
        self.states.get(id).map(|(_, gesture)| *gesture)
    }

    /// End every drag, e.g. when the pointer is released anywhere
    pub fn release_all(&mut self) {
        for (_, gesture) in self.states.values_mut() {
            *gesture = gesture.release();
        }
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FitMode;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn dragging_from(pointer: (f32, f32), adj: &ImageAdjustment) -> SlotGesture {
        SlotGesture::Idle.click(true).press(pointer, adj)
    }

    #[test]
    fn test_state_machine_round_trip() {
        let adj = ImageAdjustment::default();
        let state = SlotGesture::Idle;

        let state = state.click(true);
        assert_eq!(state, SlotGesture::Editing);

        let state = state.press((10.0, 20.0), &adj);
        assert!(state.is_dragging());

        let state = state.release();
        assert_eq!(state, SlotGesture::Editing);

        let state = state.confirm();
        assert_eq!(state, SlotGesture::Idle);
    }

    #[test]
    fn test_click_on_empty_slot_stays_idle() {
        assert_eq!(SlotGesture::Idle.click(false), SlotGesture::Idle);
    }

    #[test]
    fn test_press_outside_editing_is_ignored() {
        let adj = ImageAdjustment::default();
        assert_eq!(SlotGesture::Idle.press((0.0, 0.0), &adj), SlotGesture::Idle);
    }

    #[test]
    fn test_confirm_during_drag_keeps_dragging() {
        let adj = ImageAdjustment::default();
        let state = dragging_from((0.0, 0.0), &adj);
        assert!(state.confirm().is_dragging());
    }

    #[test]
    fn test_drag_without_pressing_returns_none() {
        let adj = ImageAdjustment::default();
        assert!(
            SlotGesture::Editing
                .drag_to((5.0, 5.0), &adj, (200.0, 300.0), false)
                .is_none()
        );
    }

    #[test]
    fn test_drag_is_relative_to_origin_not_previous_move() {
        let adj = ImageAdjustment::default();
        let state = dragging_from((100.0, 100.0), &adj);

        let first = state.drag_to((110.0, 100.0), &adj, (200.0, 200.0), false).unwrap();
        let second = state
            .drag_to((120.0, 100.0), &first, (200.0, 200.0), false)
            .unwrap();

        // 20px from origin at 0.5 %/px
        assert!(approx(second.x, 60.0));
        assert!(approx(second.y, 50.0));
    }

    #[test]
    fn test_drag_keeps_scale_and_fit_mode() {
        let adj = ImageAdjustment {
            scale: 1.5,
            x: 40.0,
            y: 45.0,
            fit_mode: FitMode::Contain,
        };
        let state = dragging_from((0.0, 0.0), &adj);
        let moved = state.drag_to((3.0, 4.0), &adj, (100.0, 100.0), false).unwrap();
        assert_eq!(moved.scale, 1.5);
        assert_eq!(moved.fit_mode, FitMode::Contain);
    }

    #[test]
    fn test_sensitivity_uses_smaller_slot_side() {
        assert!(approx(drag_sensitivity(200.0, 300.0, 1.0), 0.5));
        assert!(approx(drag_sensitivity(300.0, 200.0, 1.0), 0.5));
        assert_eq!(drag_sensitivity(0.0, 200.0, 1.0), 0.0);
    }

    #[test]
    fn test_zoom_only_while_editing() {
        let adj = ImageAdjustment::default();
        assert!(SlotGesture::Idle.zoom(&adj, 2.0).is_none());
        let dragging = dragging_from((0.0, 0.0), &adj);
        assert!(dragging.zoom(&adj, 2.0).is_none());

        let zoomed = SlotGesture::Editing.zoom(&adj, 9.0).unwrap();
        assert_eq!(zoomed.scale, 4.0);
        let zoomed = SlotGesture::Editing.zoom(&adj, 0.1).unwrap();
        assert_eq!(zoomed.scale, 0.5);
    }

    #[test]
    fn test_toggle_fit_only_while_editing() {
        let adj = ImageAdjustment::default();
        assert!(SlotGesture::Idle.toggle_fit(&adj).is_none());
        let toggled = SlotGesture::Editing.toggle_fit(&adj).unwrap();
        assert_eq!(toggled.fit_mode, FitMode::Contain);
    }

    fn sheets_of(ids: &[&str]) -> Vec<SheetData> {
        let images: Vec<_> = ids
            .iter()
            .map(|id| crate::types::UploadedImage {
                id: ImageId::from(*id),
                name: id.to_string(),
                source: Default::default(),
                width: 10,
                height: 10,
                adjustment: ImageAdjustment::default(),
            })
            .collect();
        crate::layout::paginate(&images, crate::constants::SLOTS_PER_SHEET)
    }

    #[test]
    fn test_gestures_survive_sync_in_place() {
        let sheets = sheets_of(&["a", "b"]);
        let mut gestures = SlotGestures::new();
        *gestures.entry(&ImageId::from("b"), 1, 1) = SlotGesture::Editing;

        gestures.sync(&sheets);
        assert_eq!(gestures.get(&ImageId::from("b")), Some(SlotGesture::Editing));
    }

    #[test]
    fn test_moved_image_resets_to_idle() {
        let mut gestures = SlotGestures::new();
        *gestures.entry(&ImageId::from("b"), 1, 1) = SlotGesture::Editing;

        // "a" removed: "b" slides into slot 0
        gestures.sync(&sheets_of(&["b"]));
        assert_eq!(gestures.get(&ImageId::from("b")), Some(SlotGesture::Idle));
    }

    #[test]
    fn test_removed_image_is_forgotten() {
        let mut gestures = SlotGestures::new();
        *gestures.entry(&ImageId::from("a"), 1, 0) = SlotGesture::Editing;

        gestures.sync(&sheets_of(&["b"]));
        assert_eq!(gestures.get(&ImageId::from("a")), None);
        assert!(gestures.is_empty());
    }

    #[test]
    fn test_entry_at_new_position_resets() {
        let mut gestures = SlotGestures::new();
        *gestures.entry(&ImageId::from("a"), 1, 0) = SlotGesture::Editing;
        assert_eq!(*gestures.entry(&ImageId::from("a"), 2, 0), SlotGesture::Idle);
    }

    #[test]
    fn test_release_all_ends_drags() {
        let adj = ImageAdjustment::default();
        let mut gestures = SlotGestures::new();
        *gestures.entry(&ImageId::from("a"), 1, 0) = dragging_from((1.0, 1.0), &adj);

        gestures.release_all();
        assert_eq!(gestures.get(&ImageId::from("a")), Some(SlotGesture::Editing));
    }
}
