//! Rasterizing a whole sheet

use super::labels::{draw_labels, sheet_labels};
use super::slot::{fill_rect, render_slot};
use crate::constants::*;
use crate::layout::slot_template;
use crate::options::SheetOptions;
use crate::types::*;
use image::{Rgba, RgbaImage, imageops};

/// Pixel size of a rendered sheet for the given options
pub fn sheet_pixel_size(options: &SheetOptions) -> (u32, u32) {
    let px_per_mm = options.px_per_mm();
    (
        mm_to_px(SHEET_WIDTH_MM, px_per_mm).round() as u32,
        mm_to_px(SHEET_HEIGHT_MM, px_per_mm).round() as u32,
    )
}

/// Rasterize the printable layer of a sheet.
///
/// Draws the page background, every slot (empty slots keep their
/// background), the slot borders, the footer brand rule and the printed
/// header and wordmark. Nothing interactive is ever part of the output.
pub fn render_sheet(sheet: &SheetData, options: &SheetOptions) -> Result<RgbaImage> {
    options.validate()?;

    let px_per_mm = options.px_per_mm();
    let (width, height) = sheet_pixel_size(options);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(options.page_background));

    for spec in slot_template() {
        let slot = render_slot(sheet.slot(spec.index), &spec, options)?;
        let x = mm_to_px(spec.rect.x, px_per_mm).round() as i64;
        let y = mm_to_px(spec.rect.y, px_per_mm).round() as i64;
        imageops::replace(&mut canvas, &slot, x, y);
    }

    if options.draw_footer_rule {
        let rule_x = (SHEET_WIDTH_MM - FOOTER_RULE_WIDTH_MM) / 2.0;
        let rule_y = SHEET_HEIGHT_MM - FOOTER_OFFSET_MM - FOOTER_RULE_HEIGHT_MM;
        fill_rect(
            &mut canvas,
            mm_to_px(rule_x, px_per_mm).round() as i64,
            mm_to_px(rule_y, px_per_mm).round() as i64,
            mm_to_px(FOOTER_RULE_WIDTH_MM, px_per_mm).round() as i64,
            mm_to_px(FOOTER_RULE_HEIGHT_MM, px_per_mm).round().max(1.0) as i64,
            options.footer_color,
        );
    }

    draw_labels(&mut canvas, &sheet_labels(sheet.id, options), px_per_mm)?;

    log::debug!(
        "Rendered sheet {} ({} images) at {}x{}",
        sheet.id,
        sheet.images.len(),
        width,
        height
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_is_a4_at_4x() {
        let (w, h) = sheet_pixel_size(&SheetOptions::default());
        assert_eq!((w, h), (3175, 4490));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let sheet = SheetData {
            id: 1,
            images: Vec::new(),
        };
        let options = SheetOptions {
            oversampling: 0.0,
            ..SheetOptions::default()
        };
        assert!(matches!(
            render_sheet(&sheet, &options),
            Err(SheetError::Config(_))
        ));
    }

    #[test]
    fn test_without_text_leaves_header_margin_blank() {
        let sheet = SheetData {
            id: 4,
            images: Vec::new(),
        };
        let options = SheetOptions {
            oversampling: 1.0,
            ..SheetOptions::default()
        }
        .without_text();
        let image = render_sheet(&sheet, &options).unwrap();

        let margin = mm_to_px(3.0, options.px_per_mm()) as u32;
        for y in 0..margin {
            for x in 0..image.width() {
                assert_eq!(image.get_pixel(x, y).0, options.page_background);
            }
        }
    }
}
