//! Layout calculation modules for photo sheets
//!
//! This module handles the sheet-level geometry:
//! - The fixed five-slot template (slot rectangles in millimeters)
//! - Pagination of the image queue into sheets

mod paginate;
mod template;
mod types;

pub use paginate::*;
pub use template::*;
pub use types::*;
