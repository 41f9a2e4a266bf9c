use crate::constants::{CSS_PX_PER_MM, DEFAULT_OVERSAMPLING};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest oversampling factor accepted; an A4 sheet at 8× is already
/// roughly 6350×8980 pixels
pub const MAX_OVERSAMPLING: f32 = 8.0;

/// Brand used in export file names when none is configured
pub const DEFAULT_BRAND: &str = "welfare-academy";

/// Record line printed at the top left of every sheet
pub const DEFAULT_HEADER_TITLE: &str = "WELFARE ACADEMY OFFICIAL RECORD";

/// Prefix of the printed sheet reference, as in `WA-0001`
pub const DEFAULT_REFERENCE_PREFIX: &str = "WA";

/// Rendering and export configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetOptions {
    /// Prefix for every exported file name
    pub brand: String,

    /// Multiplier on the CSS reference density for raster output
    pub oversampling: f32,

    // Colours (RGBA)
    pub page_background: [u8; 4],
    pub slot_background: [u8; 4],
    pub border_color: [u8; 4],
    pub footer_color: [u8; 4],

    // Decorations
    pub draw_slot_borders: bool,
    pub draw_footer_rule: bool,

    /// Print the record line and the sheet reference along the top edge
    pub draw_header: bool,
    pub header_title: String,
    pub reference_prefix: String,

    /// Print the two-part brand wordmark above the footer rule
    pub draw_wordmark: bool,
    pub wordmark_primary: String,
    pub wordmark_secondary: String,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            oversampling: DEFAULT_OVERSAMPLING,
            page_background: [255, 255, 255, 255],
            slot_background: [249, 250, 251, 255],
            border_color: [243, 244, 246, 255],
            footer_color: [229, 231, 235, 255],
            draw_slot_borders: true,
            draw_footer_rule: true,
            draw_header: true,
            header_title: DEFAULT_HEADER_TITLE.to_string(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            draw_wordmark: true,
            wordmark_primary: "Welfare".to_string(),
            wordmark_secondary: "Academy".to_string(),
        }
    }
}

impl SheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.brand.trim().is_empty() {
            return Err(SheetError::Config("Brand must not be empty".to_string()));
        }

        if let Some(c) = self
            .brand
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SheetError::Config(format!(
                "Brand may only contain letters, digits, '-' and '_' (found {:?})",
                c
            )));
        }

        if !(self.oversampling > 0.0 && self.oversampling <= MAX_OVERSAMPLING) {
            return Err(SheetError::Config(format!(
                "Oversampling must be in (0, {}], got {}",
                MAX_OVERSAMPLING, self.oversampling
            )));
        }

        Ok(())
    }

    /// Raster density in pixels per millimeter
    pub fn px_per_mm(&self) -> f32 {
        CSS_PX_PER_MM * self.oversampling
    }

    /// Printed reference of a sheet, e.g. `SHEET REF: WA-0003`
    pub fn sheet_reference(&self, sheet_id: usize) -> String {
        format!("SHEET REF: {}-{:04}", self.reference_prefix, sheet_id)
    }

    /// Same options with every printed text turned off
    pub fn without_text(&self) -> Self {
        Self {
            draw_header: false,
            draw_wordmark: false,
            ..self.clone()
        }
    }

    /// File name for a single exported sheet, e.g. `brand-sheet-3.png`
    pub fn sheet_file_name(&self, sheet_id: usize) -> String {
        format!("{}-sheet-{}.png", self.brand, sheet_id)
    }

    /// File name of the bulk archive, e.g. `brand-sheets.zip`
    pub fn archive_file_name(&self) -> String {
        format!("{}-sheets.zip", self.brand)
    }

    /// File name of the print document, e.g. `brand-sheets.pdf`
    pub fn print_file_name(&self) -> String {
        format!("{}-sheets.pdf", self.brand)
    }
}

/// Archive entry name for the sheet at a 1-based position
pub fn archive_entry_name(position: usize) -> String {
    format!("sheet-{}.png", position)
}
