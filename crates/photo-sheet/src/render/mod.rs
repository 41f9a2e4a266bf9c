//! Raster rendering of sheets
//!
//! This module turns sheet data into pixels:
//! - Fitting and clipping each image inside its slot
//! - Rotating the landscape slot onto the sheet
//! - Compositing slots, borders and the footer rule onto the page
//! - Setting the header and wordmark text

mod labels;
mod sheet;
mod slot;

pub use labels::{LabelSpan, SheetLabel, TextAnchor, blend_over, sheet_labels};

pub use sheet::*;
pub use slot::render_slot;
