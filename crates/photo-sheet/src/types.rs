use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No sheets to export")]
    NoSheets,
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Smallest zoom factor the adjustment controls allow
pub const MIN_SCALE: f32 = 0.5;

/// Largest zoom factor the adjustment controls allow
pub const MAX_SCALE: f32 = 4.0;

/// How an image of arbitrary aspect ratio is mapped into a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Fill the slot entirely, clipping overflow
    #[default]
    Cover,
    /// Fit the whole image inside the slot, letterboxing if needed
    Contain,
}

impl FitMode {
    pub fn toggled(self) -> Self {
        match self {
            FitMode::Cover => FitMode::Contain,
            FitMode::Contain => FitMode::Cover,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FitMode::Cover => "Cover",
            FitMode::Contain => "Contain",
        }
    }
}

/// Placement of an image inside its slot.
///
/// `x` and `y` are the position of the image centre as a percentage of the
/// slot box. They are unbounded: a user may pan an image
/// partly or fully out of frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageAdjustment {
    pub scale: f32,
    pub x: f32,
    pub y: f32,
    pub fit_mode: FitMode,
}

impl Default for ImageAdjustment {
    fn default() -> Self {
        Self {
            scale: 1.0,
            x: 50.0,
            y: 50.0,
            fit_mode: FitMode::Cover,
        }
    }
}

impl ImageAdjustment {
    /// Centred default placement with the given fit mode
    pub fn with_fit_mode(fit_mode: FitMode) -> Self {
        Self {
            fit_mode,
            ..Self::default()
        }
    }

    /// Same adjustment with the scale clamped into `[MIN_SCALE, MAX_SCALE]`
    pub fn with_scale(self, scale: f32) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            ..self
        }
    }

    /// Same adjustment moved to a new centre position
    pub fn with_offset(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }

    /// Swap the fit mode and reset zoom and pan
    pub fn toggle_fit_mode(self) -> Self {
        Self::with_fit_mode(self.fit_mode.toggled())
    }
}

/// Opaque, session-stable identifier for an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(String);

impl ImageId {
    /// Mint a fresh random id
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Encoded source bytes of an upload, shared between the queue and exports
#[derive(Clone, Default, PartialEq)]
pub struct SourceBytes(Arc<[u8]>);

impl SourceBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SourceBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl fmt::Debug for SourceBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceBytes({} bytes)", self.0.len())
    }
}

/// One uploaded photograph
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub id: ImageId,
    pub name: String,
    pub source: SourceBytes,
    /// Natural pixel width (0 when probing failed)
    pub width: u32,
    /// Natural pixel height (0 when probing failed)
    pub height: u32,
    pub adjustment: ImageAdjustment,
}

impl UploadedImage {
    /// Whether the image has usable sizing data
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One printable page of up to five photos
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    /// 1-based sequence number
    pub id: usize,
    /// Images by slot position; may be shorter than the slot count
    pub images: Vec<UploadedImage>,
}

impl SheetData {
    /// Image occupying the given slot position, if any
    pub fn slot(&self, index: usize) -> Option<&UploadedImage> {
        self.images.get(index)
    }
}

/// Summary of a queue and the sheets it produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetStatistics {
    /// Images in the queue
    pub images: usize,
    /// Sheets produced by pagination
    pub sheets: usize,
    /// Slots holding an image
    pub filled_slots: usize,
    /// Trailing slots left empty on the last sheet
    pub empty_slots: usize,
    /// Images whose dimensions could not be probed
    pub unsized_images: usize,
}
