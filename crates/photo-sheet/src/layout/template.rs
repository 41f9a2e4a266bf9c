//! The fixed five-slot sheet template
//!
//! Two portrait slots, one centred landscape slot, two portrait slots,
//! stacked with a constant gap and centred vertically on an A4 sheet.

use crate::constants::*;

use super::{Rect, SlotOrientation, SlotSpec};

/// Top edge of the slot block so the rows sit centred on the sheet
fn block_top_mm() -> f32 {
    let block_height = PORTRAIT_SLOT_HEIGHT_MM
        + ROW_GAP_MM
        + LANDSCAPE_SLOT_HEIGHT_MM
        + ROW_GAP_MM
        + PORTRAIT_SLOT_HEIGHT_MM;
    (SHEET_HEIGHT_MM - block_height) / 2.0
}

/// Build the slot template in millimeters.
///
/// Positions 0, 1, 3 and 4 are portrait; position 2 is the landscape slot.
pub fn slot_template() -> [SlotSpec; SLOTS_PER_SHEET] {
    let top_row_y = block_top_mm();
    let middle_row_y = top_row_y + PORTRAIT_SLOT_HEIGHT_MM + ROW_GAP_MM;
    let bottom_row_y = middle_row_y + LANDSCAPE_SLOT_HEIGHT_MM + ROW_GAP_MM;

    let left_x = ROW_SIDE_INSET_MM;
    let right_x = SHEET_WIDTH_MM - ROW_SIDE_INSET_MM - PORTRAIT_SLOT_WIDTH_MM;
    let centre_x = (SHEET_WIDTH_MM - LANDSCAPE_SLOT_WIDTH_MM) / 2.0;

    let portrait = |index: usize, x: f32, y: f32| SlotSpec {
        index,
        orientation: SlotOrientation::Portrait,
        rect: Rect::new(x, y, PORTRAIT_SLOT_WIDTH_MM, PORTRAIT_SLOT_HEIGHT_MM),
    };

    [
        portrait(0, left_x, top_row_y),
        portrait(1, right_x, top_row_y),
        SlotSpec {
            index: 2,
            orientation: SlotOrientation::Landscape,
            rect: Rect::new(
                centre_x,
                middle_row_y,
                LANDSCAPE_SLOT_WIDTH_MM,
                LANDSCAPE_SLOT_HEIGHT_MM,
            ),
        },
        portrait(3, left_x, bottom_row_y),
        portrait(4, right_x, bottom_row_y),
    ]
}

/// Sheet bounds in millimeters
pub fn sheet_bounds() -> Rect {
    Rect::new(0.0, 0.0, SHEET_WIDTH_MM, SHEET_HEIGHT_MM)
}
