//! Rasterizing a single slot

use crate::geometry::place_image;
use crate::layout::SlotSpec;
use crate::options::SheetOptions;
use crate::types::*;
use image::{Rgba, RgbaImage, imageops};
use tiny_skia::{
    Color, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::constants::SLOT_BORDER_MM;

/// Render one slot at the option's raster density.
///
/// The image is fitted inside the slot's unrotated working area and clipped
/// to it. For the landscape slot the finished working area is rotated 90°
/// clockwise, so the returned image always has the slot's footprint size.
pub fn render_slot(
    image: Option<&UploadedImage>,
    spec: &SlotSpec,
    options: &SheetOptions,
) -> Result<RgbaImage> {
    let px_per_mm = options.px_per_mm();
    let (logical_w, logical_h) = spec.logical_size();
    let width = (logical_w * px_per_mm).round().max(1.0) as u32;
    let height = (logical_h * px_per_mm).round().max(1.0) as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        SheetError::Render(format!("Failed to create {}x{} slot surface", width, height))
    })?;
    pixmap.fill(color(options.slot_background));

    if let Some(image) = image.filter(|img| img.has_dimensions()) {
        draw_image(&mut pixmap, image)?;
    }

    if options.draw_slot_borders {
        stroke_border(&mut pixmap, SLOT_BORDER_MM * px_per_mm, options.border_color);
    }

    let rendered = to_rgba_image(&pixmap)?;
    if spec.orientation.is_rotated() {
        Ok(imageops::rotate90(&rendered))
    } else {
        Ok(rendered)
    }
}

fn draw_image(pixmap: &mut Pixmap, image: &UploadedImage) -> Result<()> {
    let slot_w = pixmap.width() as f32;
    let slot_h = pixmap.height() as f32;

    let Some(placed) = place_image(image.width, image.height, slot_w, slot_h, &image.adjustment)
    else {
        return Ok(());
    };

    let decoded = image.decode()?;
    let source = premultiplied_pixmap(&decoded)?;

    // Size from the decoded pixels; the probed size only drives the fit
    let kx = placed.width / source.width() as f32;
    let ky = placed.height / source.height() as f32;
    let transform = Transform::from_row(kx, 0.0, 0.0, ky, placed.left(), placed.top());

    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);

    log::debug!(
        "Placed {} at ({:.1}, {:.1}) size {:.1}x{:.1}",
        image.name,
        placed.left(),
        placed.top(),
        placed.width,
        placed.height
    );
    Ok(())
}

fn stroke_border(pixmap: &mut Pixmap, width_px: f32, rgba: [u8; 4]) {
    let half = width_px / 2.0;
    let rect = tiny_skia::Rect::from_xywh(
        half,
        half,
        pixmap.width() as f32 - width_px,
        pixmap.height() as f32 - width_px,
    );
    let Some(path) = rect.map(PathBuilder::from_rect) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: width_px.max(1.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

pub(crate) fn color(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Copy straight-alpha pixels into a premultiplied tiny-skia surface
fn premultiplied_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())
        .ok_or_else(|| SheetError::Render("Image has no pixels".to_string()))?;

    let mut data = image.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        if alpha == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * alpha + 127) / 255) as u8;
        }
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| SheetError::Render("Failed to wrap image pixels".to_string()))
}

/// Convert a premultiplied surface back into straight-alpha RGBA
pub(crate) fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| SheetError::Render("Surface size mismatch".to_string()))
}

/// Solid fill of an axis-aligned pixel rectangle, clipped to the canvas
pub(crate) fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, rgba: [u8; 4]) {
    let x0 = x.clamp(0, canvas.width() as i64) as u32;
    let y0 = y.clamp(0, canvas.height() as i64) as u32;
    let x1 = (x + w).clamp(0, canvas.width() as i64) as u32;
    let y1 = (y + h).clamp(0, canvas.height() as i64) as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px, py, Rgba(rgba));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::slot_template;
    use std::io::Cursor;

    fn options() -> SheetOptions {
        SheetOptions {
            oversampling: 1.0,
            draw_slot_borders: false,
            ..SheetOptions::default()
        }
    }

    fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_empty_slot_is_background() {
        let opts = options();
        let spec = slot_template()[0];
        let slot = render_slot(None, &spec, &opts).unwrap();
        assert_eq!(slot.dimensions(), (265, 378));
        assert_eq!(slot.get_pixel(100, 100).0, opts.slot_background);
    }

    #[test]
    fn test_landscape_slot_has_footprint_size() {
        let spec = slot_template()[2];
        let slot = render_slot(None, &spec, &options()).unwrap();
        assert_eq!(slot.dimensions(), (378, 265));
    }

    #[test]
    fn test_cover_image_fills_slot() {
        let opts = options();
        let spec = slot_template()[0];
        let img = UploadedImage::from_bytes("red.png", solid_png(40, 40, [255, 0, 0, 255]));
        let slot = render_slot(Some(&img), &spec, &opts).unwrap();

        for (x, y) in [(2, 2), (262, 375), (132, 189)] {
            let [r, g, b, a] = slot.get_pixel(x, y).0;
            assert!(r > 240 && g < 16 && b < 16 && a == 255, "({x}, {y})");
        }
    }

    #[test]
    fn test_unsized_image_renders_empty_slot() {
        let opts = options();
        let spec = slot_template()[0];
        let img = UploadedImage::from_bytes("bad.png", b"nope".to_vec());
        let slot = render_slot(Some(&img), &spec, &opts).unwrap();
        assert_eq!(slot.get_pixel(130, 190).0, opts.slot_background);
    }

    #[test]
    fn test_border_is_drawn() {
        let opts = SheetOptions {
            border_color: [0, 0, 0, 255],
            ..options()
        };
        let spec = slot_template()[0];
        let slot = render_slot(None, &spec, &opts).unwrap();
        assert_ne!(slot.get_pixel(0, 100).0, opts.slot_background);
        assert_eq!(slot.get_pixel(100, 100).0, opts.slot_background);
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = RgbaImage::new(4, 4);
        fill_rect(&mut canvas, -2, -2, 4, 4, [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [9, 9, 9, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }
}
