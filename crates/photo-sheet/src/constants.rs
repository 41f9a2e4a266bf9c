//! Shared constants for photo sheet layout and rasterization
//!
//! This module centralizes the physical dimensions of the sheet template
//! and the unit conversions used when rendering it.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Screen pixels per millimeter at the CSS reference density (96 px/inch)
pub const CSS_PX_PER_MM: f32 = 96.0 / 25.4; // ≈ 3.7795

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Default oversampling applied on top of `CSS_PX_PER_MM` for print output
pub const DEFAULT_OVERSAMPLING: f32 = 4.0;

/// Convert millimeters to pixels at the given density
#[inline]
pub fn mm_to_px(mm: f32, px_per_mm: f32) -> f32 {
    mm * px_per_mm
}

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Sheet Dimensions
// =============================================================================

/// A4 sheet width (mm)
pub const SHEET_WIDTH_MM: f32 = 210.0;

/// A4 sheet height (mm)
pub const SHEET_HEIGHT_MM: f32 = 297.0;

/// Number of photo slots on one sheet
pub const SLOTS_PER_SHEET: usize = 5;

// =============================================================================
// Slot Dimensions
// =============================================================================

/// Portrait slot width (mm)
pub const PORTRAIT_SLOT_WIDTH_MM: f32 = 70.0;

/// Portrait slot height (mm)
pub const PORTRAIT_SLOT_HEIGHT_MM: f32 = 100.0;

/// Landscape slot width (mm)
pub const LANDSCAPE_SLOT_WIDTH_MM: f32 = 100.0;

/// Landscape slot height (mm)
pub const LANDSCAPE_SLOT_HEIGHT_MM: f32 = 70.0;

// =============================================================================
// Template Spacing
// =============================================================================

/// Horizontal inset of the portrait rows from the sheet edges (mm)
pub const ROW_SIDE_INSET_MM: f32 = 15.0;

/// Vertical gap between slot rows (mm)
pub const ROW_GAP_MM: f32 = 10.0;

/// Distance of the footer brand rule from the bottom edge (mm)
pub const FOOTER_OFFSET_MM: f32 = 10.0;

/// Footer brand rule size (mm)
pub const FOOTER_RULE_WIDTH_MM: f32 = 12.7;
pub const FOOTER_RULE_HEIGHT_MM: f32 = 0.5;

/// Hairline slot border width (mm)
pub const SLOT_BORDER_MM: f32 = 0.26;

// =============================================================================
// Printed Text
// =============================================================================

/// Horizontal inset of the header labels from the sheet edges (mm)
pub const HEADER_INSET_MM: f32 = 20.0;

/// Baseline of the header labels, inside the margin above the first row (mm)
pub const HEADER_BASELINE_MM: f32 = 2.9;

/// Header font size (mm), 10 CSS pixels
pub const HEADER_TEXT_MM: f32 = 2.6;

/// Wordmark font sizes (mm), 14 and 12 CSS pixels
pub const WORDMARK_PRIMARY_MM: f32 = 3.7;
pub const WORDMARK_SECONDARY_MM: f32 = 3.2;

/// Space between the wordmark baseline and the footer rule (mm)
pub const WORDMARK_GAP_MM: f32 = 1.6;
