use std::path::PathBuf;
use tokio::sync::mpsc;

// Re-export types from the library crate
pub use photo_sheet::{SheetData, SheetOptions, Thumbnail, UploadedImage};

/// Longest side of the preview thumbnail built for each upload
pub const PREVIEW_MAX_SIDE: u32 = 512;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum SheetCommand {
    LoadImages {
        paths: Vec<PathBuf>,
    },
    ExportSheet {
        sheet: SheetData,
        options: SheetOptions,
        output_path: PathBuf,
    },
    ExportArchive {
        sheets: Vec<SheetData>,
        options: SheetOptions,
        output_path: PathBuf,
    },
    ExportPrint {
        sheets: Vec<SheetData>,
        options: SheetOptions,
        output_path: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    SaveConfig {
        options: SheetOptions,
        path: PathBuf,
    },
}

impl SheetCommand {
    /// Short human-readable name for logs and status lines
    pub fn name(&self) -> &'static str {
        match self {
            SheetCommand::LoadImages { .. } => "load images",
            SheetCommand::ExportSheet { .. } => "export sheet",
            SheetCommand::ExportArchive { .. } => "export archive",
            SheetCommand::ExportPrint { .. } => "export print document",
            SheetCommand::LoadConfig { .. } => "load configuration",
            SheetCommand::SaveConfig { .. } => "save configuration",
        }
    }
}

/// An upload with its decoded preview, ready to become a display handle
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: UploadedImage,
    /// `None` when the source could not be decoded
    pub thumbnail: Option<Thumbnail>,
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum SheetUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    ImagesLoaded {
        images: Vec<LoadedImage>,
    },
    SheetExported {
        sheet_id: usize,
        path: PathBuf,
    },
    /// `path` is `None` when there was nothing to export
    ArchiveExported {
        path: Option<PathBuf>,
        sheet_count: usize,
    },
    /// `path` is `None` when there was nothing to export
    PrintExported {
        path: Option<PathBuf>,
        page_count: usize,
    },
    ConfigLoaded {
        options: SheetOptions,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

pub type CommandSender = mpsc::UnboundedSender<SheetCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<SheetCommand>;
pub type UpdateSender = mpsc::UnboundedSender<SheetUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<SheetUpdate>;

/// Create the two channels connecting a front-end to its worker.
///
/// Returns the UI ends first, then the worker ends.
pub fn channels() -> ((CommandSender, UpdateReceiver), (CommandReceiver, UpdateSender)) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    ((command_tx, update_rx), (command_rx, update_tx))
}
