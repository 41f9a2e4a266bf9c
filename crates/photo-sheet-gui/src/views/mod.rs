pub mod queue;
pub mod settings;
pub mod sheet;
pub mod toolbar;

pub use queue::show_queue;
pub use settings::{SettingsAction, show_settings};
pub use sheet::{SheetAction, show_sheet};
pub use toolbar::{ToolbarAction, show_toolbar};

/// Display handle kept next to each queued upload.
///
/// `None` for uploads that could not be decoded; they still take a slot.
pub type SlotTexture = Option<eframe::egui::TextureHandle>;
