//! Reading uploads and probing their dimensions

use crate::types::*;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Whether the path has an extension of a format we can decode
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    ImageFormat::from_path(path)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}

/// Whether an EXIF orientation turns the stored pixels a quarter turn
fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

/// Read the natural size of an encoded image without decoding its pixels.
///
/// The size is the displayed one: an EXIF orientation of 90° or 270° swaps
/// the stored width and height.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let (width, height) = decoder.dimensions();
    // A malformed EXIF block must not cost the image its size
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    if swaps_axes(orientation) {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Decode an encoded image upright, applying its EXIF orientation
fn decode_upright(bytes: &[u8]) -> Result<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

impl UploadedImage {
    /// Build an upload from in-memory bytes.
    ///
    /// The id is freshly minted and the adjustment is the default. If the
    /// size cannot be probed the image is kept with zero dimensions.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let (width, height) = match probe_dimensions(&bytes) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Could not read dimensions of {}: {}", name, e);
                (0, 0)
            }
        };

        Self {
            id: ImageId::new(),
            name,
            source: SourceBytes::from(bytes),
            width,
            height,
            adjustment: ImageAdjustment::default(),
        }
    }

    /// Decode the full-resolution pixels, upright
    pub fn decode(&self) -> Result<image::RgbaImage> {
        Ok(decode_upright(self.source.as_slice())?.to_rgba8())
    }
}

/// Load a single image file.
///
/// Never fails: an unreadable file becomes an empty, zero-sized upload so
/// the batch it belongs to still completes.
pub async fn load_image(path: impl AsRef<Path>) -> UploadedImage {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match tokio::fs::read(path).await {
        Ok(bytes) => UploadedImage::from_bytes(name, bytes),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            UploadedImage::from_bytes(name, Vec::new())
        }
    }
}

/// Load many image files concurrently.
///
/// Results are returned in the order of `paths`, once every file is done.
pub async fn load_images(paths: &[PathBuf]) -> Result<Vec<UploadedImage>> {
    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { load_image(path).await }))
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for handle in handles {
        images.push(handle.await?);
    }
    log::debug!("Loaded {} images", images.len());
    Ok(images)
}

/// Downscaled RGBA preview of an upload
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA, row-major
    pub rgba: Vec<u8>,
}

/// Decode an upload and shrink it so neither side exceeds `max_side`.
///
/// Images already smaller than `max_side` keep their size.
pub fn make_thumbnail(image: &UploadedImage, max_side: u32) -> Result<Thumbnail> {
    let decoded = decode_upright(image.source.as_slice())?;
    let max_side = max_side.max(1);
    let preview = if decoded.width() > max_side || decoded.height() > max_side {
        decoded.thumbnail(max_side, max_side)
    } else {
        decoded
    };
    let rgba = preview.to_rgba8();

    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use image::codecs::jpeg::JpegEncoder;

    /// Baseline JPEG of the given stored size
    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .encode_image(&img)
            .unwrap();
        out
    }

    /// Insert an APP1 Exif segment carrying only an Orientation tag right
    /// after the SOI marker
    fn with_exif_orientation(jpeg: Vec<u8>, orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\x00\x2a\x00\x00\x00\x08");
        tiff.extend_from_slice(&1u16.to_be_bytes()); // one IFD entry
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

        let mut payload = b"Exif\x00\x00".to_vec();
        payload.extend_from_slice(&tiff);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image("a.png"));
        assert!(is_supported_image("photo.JPG"));
        assert!(is_supported_image("x/y/z.jpeg"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("no_extension"));
    }

    #[test]
    fn test_from_bytes_probes_size() {
        let img = UploadedImage::from_bytes("a.png", png_bytes(30, 40));
        assert_eq!((img.width, img.height), (30, 40));
        assert!(img.has_dimensions());
        assert_eq!(img.adjustment, ImageAdjustment::default());
    }

    #[test]
    fn test_garbage_degrades_to_zero_size() {
        let img = UploadedImage::from_bytes("broken.png", b"not an image".to_vec());
        assert_eq!((img.width, img.height), (0, 0));
        assert!(!img.has_dimensions());
        assert_eq!(img.source.len(), 12);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = UploadedImage::from_bytes("a.png", png_bytes(2, 2));
        let b = UploadedImage::from_bytes("a.png", png_bytes(2, 2));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_thumbnail_bounds_longest_side() {
        let img = UploadedImage::from_bytes("a.png", png_bytes(400, 200));
        let thumb = make_thumbnail(&img, 100).unwrap();
        assert_eq!(thumb.width, 100);
        assert_eq!(thumb.height, 50);
        assert_eq!(thumb.rgba.len(), 100 * 50 * 4);
    }

    #[test]
    fn test_exif_rotation_swaps_probed_size() {
        let bytes = with_exif_orientation(jpeg_bytes(40, 20), 6);
        assert_eq!(probe_dimensions(&bytes).unwrap(), (20, 40));

        let img = UploadedImage::from_bytes("phone.jpg", bytes);
        assert_eq!((img.width, img.height), (20, 40));
    }

    #[test]
    fn test_exif_upright_orientation_keeps_size() {
        let bytes = with_exif_orientation(jpeg_bytes(40, 20), 1);
        assert_eq!(probe_dimensions(&bytes).unwrap(), (40, 20));
        assert_eq!(probe_dimensions(&jpeg_bytes(40, 20)).unwrap(), (40, 20));
    }

    #[test]
    fn test_decode_and_thumbnail_are_upright() {
        let bytes = with_exif_orientation(jpeg_bytes(40, 20), 6);
        let img = UploadedImage::from_bytes("phone.jpg", bytes);
        assert_eq!(img.decode().unwrap().dimensions(), (20, 40));

        let thumb = make_thumbnail(&img, 100).unwrap();
        assert_eq!((thumb.width, thumb.height), (20, 40));
    }

    #[test]
    fn test_thumbnail_keeps_small_images() {
        let img = UploadedImage::from_bytes("a.png", png_bytes(20, 10));
        let thumb = make_thumbnail(&img, 100).unwrap();
        assert_eq!((thumb.width, thumb.height), (20, 10));
    }
}
