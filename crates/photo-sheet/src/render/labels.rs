//! Printed text of a sheet
//!
//! The header carries the record line and the sheet reference, the footer
//! the two-part brand wordmark. Labels are laid out once in millimeters and
//! drawn both into rasters (through resvg) and into the print document
//! (through the PDF built-in fonts).

use super::slot::to_rgba_image;
use crate::constants::*;
use crate::options::SheetOptions;
use crate::types::*;
use image::{RgbaImage, imageops};
use resvg::usvg;
use std::fmt::Write;
use std::sync::{Arc, OnceLock};
use tiny_skia::{Pixmap, Transform};

const HEADER_TITLE_COLOR: [u8; 4] = [17, 24, 39, 26];
const REFERENCE_COLOR: [u8; 4] = [209, 213, 219, 255];
const WORDMARK_PRIMARY_COLOR: [u8; 4] = [22, 54, 102, 51];
const WORDMARK_SECONDARY_COLOR: [u8; 4] = [211, 47, 47, 51];

/// Families tried, in order, for the sans-serif text of rasters
const SANS_SERIF_FAMILIES: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];

/// Share of the font size kept above and below the baseline in a text band
const BAND_ASCENT: f32 = 1.0;
const BAND_DESCENT: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A run of text with its own size and colour
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpan {
    pub text: String,
    pub size_mm: f32,
    /// Straight-alpha RGBA
    pub color: [u8; 4],
}

/// One line of bold sans-serif text on the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLabel {
    pub spans: Vec<LabelSpan>,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub anchor: TextAnchor,
}

impl SheetLabel {
    fn single(text: String, size_mm: f32, color: [u8; 4], x_mm: f32, anchor: TextAnchor) -> Self {
        Self {
            spans: vec![LabelSpan {
                text,
                size_mm,
                color,
            }],
            x_mm,
            baseline_mm: HEADER_BASELINE_MM,
            anchor,
        }
    }

    /// Largest font size on the line
    pub fn size_mm(&self) -> f32 {
        self.spans.iter().map(|s| s.size_mm).fold(0.0, f32::max)
    }

    /// Advance width of the line set in Helvetica-Bold
    pub fn width_mm(&self) -> f32 {
        self.spans
            .iter()
            .map(|span| {
                let units: u32 = span.text.chars().map(helvetica_bold_width).sum();
                units as f32 * span.size_mm / 1000.0
            })
            .sum()
    }

    /// Left end of the line once the anchor is applied
    pub fn start_x_mm(&self) -> f32 {
        match self.anchor {
            TextAnchor::Start => self.x_mm,
            TextAnchor::Middle => self.x_mm - self.width_mm() / 2.0,
            TextAnchor::End => self.x_mm - self.width_mm(),
        }
    }

    /// Text of all spans joined
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Labels printed on a sheet, according to the decoration options
pub fn sheet_labels(sheet_id: usize, options: &SheetOptions) -> Vec<SheetLabel> {
    let mut labels = Vec::new();

    if options.draw_header {
        let title = options.header_title.trim();
        if !title.is_empty() {
            labels.push(SheetLabel::single(
                title.to_string(),
                HEADER_TEXT_MM,
                HEADER_TITLE_COLOR,
                HEADER_INSET_MM,
                TextAnchor::Start,
            ));
        }
        labels.push(SheetLabel::single(
            options.sheet_reference(sheet_id),
            HEADER_TEXT_MM,
            REFERENCE_COLOR,
            SHEET_WIDTH_MM - HEADER_INSET_MM,
            TextAnchor::End,
        ));
    }

    if options.draw_wordmark {
        let mut spans = Vec::new();
        let primary = options.wordmark_primary.trim();
        let secondary = options.wordmark_secondary.trim();
        if !primary.is_empty() {
            spans.push(LabelSpan {
                text: primary.to_string(),
                size_mm: WORDMARK_PRIMARY_MM,
                color: WORDMARK_PRIMARY_COLOR,
            });
        }
        if !secondary.is_empty() {
            let text = if spans.is_empty() {
                secondary.to_string()
            } else {
                format!(" {secondary}")
            };
            spans.push(LabelSpan {
                text,
                size_mm: WORDMARK_SECONDARY_MM,
                color: WORDMARK_SECONDARY_COLOR,
            });
        }

        if !spans.is_empty() {
            labels.push(SheetLabel {
                spans,
                x_mm: SHEET_WIDTH_MM / 2.0,
                baseline_mm: wordmark_baseline_mm(),
                anchor: TextAnchor::Middle,
            });
        }
    }

    labels
}

/// The wordmark sits just above the footer rule, between the bottom slots
fn wordmark_baseline_mm() -> f32 {
    SHEET_HEIGHT_MM - FOOTER_OFFSET_MM - FOOTER_RULE_HEIGHT_MM - WORDMARK_GAP_MM
}

/// Composite a straight-alpha colour over an opaque background
pub fn blend_over(rgba: [u8; 4], background: [u8; 4]) -> [u8; 3] {
    let alpha = u16::from(rgba[3]);
    let inv = 255 - alpha;
    let mix = |c: u8, b: u8| ((u16::from(c) * alpha + u16::from(b) * inv + 127) / 255) as u8;
    [
        mix(rgba[0], background[0]),
        mix(rgba[1], background[1]),
        mix(rgba[2], background[2]),
    ]
}

/// Draw labels onto a sheet raster.
///
/// Each label is rendered into a full-width band around its baseline and
/// blended onto the canvas. Without any system font the text is left out.
pub(crate) fn draw_labels(
    canvas: &mut RgbaImage,
    labels: &[SheetLabel],
    px_per_mm: f32,
) -> Result<()> {
    if labels.is_empty() {
        return Ok(());
    }

    let mut svg_options = usvg::Options::default();
    svg_options.fontdb = font_database();

    for label in labels {
        let size = label.size_mm();
        let top_mm = (label.baseline_mm - size * BAND_ASCENT).max(0.0);
        let bottom_mm = (label.baseline_mm + size * BAND_DESCENT).min(SHEET_HEIGHT_MM);
        let width_px = canvas.width();
        let height_px = ((bottom_mm - top_mm) * px_per_mm).round().max(1.0) as u32;

        let svg = label_svg(label, top_mm, bottom_mm - top_mm, width_px, height_px);
        let tree = usvg::Tree::from_str(&svg, &svg_options)
            .map_err(|e| SheetError::Render(format!("Failed to lay out sheet text: {e}")))?;

        let mut pixmap = Pixmap::new(width_px, height_px).ok_or_else(|| {
            SheetError::Render(format!("Failed to create {}x{} text band", width_px, height_px))
        })?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        let band = to_rgba_image(&pixmap)?;
        imageops::overlay(canvas, &band, 0, (top_mm * px_per_mm).round() as i64);
    }

    Ok(())
}

/// SVG document for one label, its view box cut to the label's band
fn label_svg(label: &SheetLabel, top_mm: f32, height_mm: f32, width_px: u32, height_px: u32) -> String {
    let anchor = match label.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 {} {} {}\" preserveAspectRatio=\"none\">",
        width_px, height_px, top_mm, SHEET_WIDTH_MM, height_mm
    );
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" font-family=\"sans-serif\" font-weight=\"bold\" xml:space=\"preserve\">",
        label.x_mm, label.baseline_mm, anchor
    );
    for span in &label.spans {
        let [r, g, b, a] = span.color;
        let _ = write!(
            svg,
            "<tspan font-size=\"{}\" fill=\"rgb({},{},{})\" fill-opacity=\"{:.3}\">{}</tspan>",
            span.size_mm,
            r,
            g,
            b,
            f32::from(a) / 255.0,
            escape_xml(&span.text)
        );
    }
    svg.push_str("</text></svg>");
    svg
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// System fonts, loaded once per process
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();

            let has_family = |name: &str| {
                db.faces()
                    .any(|face| face.families.iter().any(|(family, _)| family == name))
            };
            let family = SANS_SERIF_FAMILIES
                .iter()
                .find(|name| has_family(name))
                .map(|name| name.to_string())
                .or_else(|| {
                    db.faces()
                        .next()
                        .and_then(|face| face.families.first().map(|(family, _)| family.clone()))
                });

            match family {
                Some(name) => {
                    log::debug!("Sheet text uses font family {}", name);
                    db.set_sans_serif_family(name);
                }
                None => log::warn!("No system fonts found, sheet text is left out of rasters"),
            }
            Arc::new(db)
        })
        .clone()
}

/// Helvetica-Bold advance widths in 1/1000 em
fn helvetica_bold_width(c: char) -> u32 {
    match c {
        ' ' => 278,
        '-' => 333,
        ':' | '.' | ',' => 333,
        '0'..='9' => 556,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'F' | 'T' | 'Z' | 'L' => 611,
        'G' | 'O' | 'Q' => 778,
        'I' => 278,
        'J' => 556,
        'M' => 833,
        'W' => 944,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' => 556,
        'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611,
        'f' | 't' => 333,
        'i' | 'j' | 'l' => 278,
        'm' => 889,
        'r' => 389,
        'w' => 778,
        'z' => 500,
        _ => 556,
    }
}
