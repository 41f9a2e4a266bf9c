pub mod constants;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod layout;
mod options;
mod queue;
pub mod render;
mod stats;
mod types;
mod upload;

pub use export::{ExportRegistry, export_archive, export_print, export_sheet};
pub use geometry::{DisplayBox, FillAxis, PlacedImage, compute_display_box, place_image};
pub use gesture::{SlotGesture, SlotGestures};
pub use layout::{SlotOrientation, SlotSpec, paginate, slot_template};
pub use options::*;
pub use queue::{ImageQueue, QueueEntry};
pub use render::render_sheet;
pub use stats::calculate_statistics;
pub use types::*;
pub use upload::{
    Thumbnail, is_supported_image, load_image, load_images, make_thumbnail, probe_dimensions,
};
