//! Exporting sheets to files
//!
//! Every export rasterizes on a blocking thread and writes its output
//! through a `.part` file, so a failed export never leaves a truncated file
//! behind.

mod archive;
mod io;
mod png;
mod print;
mod registry;

pub use archive::{build_archive, export_archive};
pub use io::write_atomically;
pub use png::{encode_png, export_sheet, render_sheet_png};
pub use print::{build_print_document, export_print};
pub use registry::ExportRegistry;
