use super::io::write_atomically;
use crate::options::SheetOptions;
use crate::render::render_sheet;
use crate::types::*;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encode a raster as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Rasterize a sheet and encode it as PNG
pub fn render_sheet_png(sheet: &SheetData, options: &SheetOptions) -> Result<Vec<u8>> {
    let raster = render_sheet(sheet, options)?;
    encode_png(&raster)
}

/// Export one sheet as a PNG file at `output_path`
pub async fn export_sheet(
    sheet: &SheetData,
    options: &SheetOptions,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf> {
    options.validate()?;

    let sheet = sheet.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    log::info!("Exporting sheet {} to {}", sheet.id, output_path.display());
    let bytes = tokio::task::spawn_blocking(move || render_sheet_png(&sheet, &options)).await??;
    write_atomically(&output_path, bytes).await?;

    Ok(output_path)
}
