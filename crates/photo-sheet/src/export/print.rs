//! Print-ready PDF with one A4 page per sheet

use super::io::write_atomically;
use crate::constants::*;
use crate::options::SheetOptions;
use crate::render::{SheetLabel, blend_over, render_sheet, sheet_labels};
use crate::types::*;
use image::RgbaImage;
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData,
    RawImageFormat, Rgb, TextItem, TextMatrix, XObjectTransform,
};
use std::path::{Path, PathBuf};

/// Build a PDF whose pages are the sheet rasters placed at exactly A4.
///
/// Header and wordmark are set as real text over the raster instead of
/// being rasterized into it.
pub fn build_print_document(sheets: &[SheetData], options: &SheetOptions) -> Result<Vec<u8>> {
    if sheets.is_empty() {
        return Err(SheetError::NoSheets);
    }

    let mut doc = PdfDocument::new(&format!("{} sheets", options.brand));
    let page_width_pt = Mm(SHEET_WIDTH_MM).into_pt().0;
    let page_height_pt = Mm(SHEET_HEIGHT_MM).into_pt().0;

    let raster_options = options.without_text();

    for sheet in sheets {
        let raster = render_sheet(sheet, &raster_options)?;
        let (width_px, height_px) = raster.dimensions();

        let image = RawImage {
            pixels: RawImageData::U8(flatten_to_rgb(&raster)),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&image);

        // Stretch the raster's width over the full page width
        let dpi = width_px as f32 * 25.4 / SHEET_WIDTH_MM;
        let mut ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                dpi: Some(dpi),
                ..Default::default()
            },
        }];
        ops.extend(label_ops(
            &sheet_labels(sheet.id, options),
            options.page_background,
        ));

        let page_box = || printpdf::Rect {
            x: Pt(0.0),
            y: Pt(0.0),
            width: Pt(page_width_pt),
            height: Pt(page_height_pt),
        };
        doc.pages.push(PdfPage {
            media_box: page_box(),
            trim_box: page_box(),
            crop_box: page_box(),
            ops,
        });
        log::debug!("Added sheet {} as PDF page {}", sheet.id, doc.pages.len());
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::warn!("PDF writer reported {} warnings", warnings.len());
    }

    Ok(bytes)
}

/// Text operations for the printed labels of one page.
///
/// PDF text has no alpha here, so translucent colours are flattened over
/// the page background.
fn label_ops(labels: &[SheetLabel], background: [u8; 4]) -> Vec<Op> {
    let font = BuiltinFont::HelveticaBold;
    let mut ops = Vec::new();

    for label in labels {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(
                Mm(label.start_x_mm()).into_pt(),
                Mm(SHEET_HEIGHT_MM - label.baseline_mm).into_pt(),
            ),
        });
        for span in &label.spans {
            let [r, g, b] = blend_over(span.color, background);
            ops.push(Op::SetFillColor {
                col: Color::Rgb(Rgb {
                    r: f32::from(r) / 255.0,
                    g: f32::from(g) / 255.0,
                    b: f32::from(b) / 255.0,
                    icc_profile: None,
                }),
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Mm(span.size_mm).into_pt(),
                font,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(span.text.clone())],
                font,
            });
        }
        ops.push(Op::EndTextSection);
    }

    ops
}

/// Composite over white and drop the alpha channel
fn flatten_to_rgb(raster: &RgbaImage) -> Vec<u8> {
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    let mut rgb = Vec::with_capacity(raster.as_raw().len() / 4 * 3);
    for px in raster.pixels() {
        rgb.extend_from_slice(&blend_over(px.0, WHITE));
    }
    rgb
}

/// Export every sheet into a single print PDF at `output_path`.
///
/// Returns `Ok(None)` when there is nothing to export.
pub async fn export_print(
    sheets: &[SheetData],
    options: &SheetOptions,
    output_path: impl AsRef<Path>,
) -> Result<Option<PathBuf>> {
    if sheets.is_empty() {
        log::info!("No sheets registered, skipping print export");
        return Ok(None);
    }
    options.validate()?;

    let sheets = sheets.to_vec();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    log::info!(
        "Building print document with {} pages at {}",
        sheets.len(),
        output_path.display()
    );
    let bytes =
        tokio::task::spawn_blocking(move || build_print_document(&sheets, &options)).await??;
    write_atomically(&output_path, bytes).await?;

    Ok(Some(output_path))
}
