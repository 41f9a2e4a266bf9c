//! Layout data types for the sheet template
//!
//! Everything here is expressed in millimeters with the origin at the
//! top-left corner of the sheet, y growing downwards.

/// Orientation of a slot on the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrientation {
    /// Taller than wide, rendered as-is
    Portrait,
    /// Wider than tall, rendered as a 90° clockwise rotation of a
    /// portrait working area
    Landscape,
}

impl SlotOrientation {
    /// Whether the slot content is drawn through a rotated working area
    pub fn is_rotated(self) -> bool {
        matches!(self, SlotOrientation::Landscape)
    }
}

/// A rectangular area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Same rectangle with every component multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Whether the two rectangles share any area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One slot of the sheet template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSpec {
    /// Position within the sheet (0..SLOTS_PER_SHEET)
    pub index: usize,
    pub orientation: SlotOrientation,
    /// Visual footprint on the sheet
    pub rect: Rect,
}

impl SlotSpec {
    /// Size of the unrotated working area the image is fitted into.
    ///
    /// For the landscape slot this is the footprint with width and height
    /// swapped, so the fit calculator always reasons in portrait space.
    pub fn logical_size(&self) -> (f32, f32) {
        if self.orientation.is_rotated() {
            (self.rect.height, self.rect.width)
        } else {
            (self.rect.width, self.rect.height)
        }
    }
}
