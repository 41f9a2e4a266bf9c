use super::io::write_atomically;
use super::png::render_sheet_png;
use crate::options::{SheetOptions, archive_entry_name};
use crate::types::*;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Build a zip archive with one PNG entry per sheet.
///
/// Sheets are rasterized one at a time in the given order so only a single
/// sheet raster is alive at once. Entry names use the 1-based position in
/// `sheets`, not the sheet id.
pub fn build_archive(sheets: &[SheetData], options: &SheetOptions) -> Result<Vec<u8>> {
    if sheets.is_empty() {
        return Err(SheetError::NoSheets);
    }

    // PNG data is already deflated
    let entry_options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    for (i, sheet) in sheets.iter().enumerate() {
        let png = render_sheet_png(sheet, options)?;
        let name = archive_entry_name(i + 1);
        log::debug!("Adding {} ({} bytes) for sheet {}", name, png.len(), sheet.id);

        writer.start_file(name, entry_options)?;
        writer.write_all(&png)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Export every sheet into a single zip archive at `output_path`.
///
/// Returns `Ok(None)` without touching the filesystem when there is nothing
/// to export.
pub async fn export_archive(
    sheets: &[SheetData],
    options: &SheetOptions,
    output_path: impl AsRef<Path>,
) -> Result<Option<PathBuf>> {
    if sheets.is_empty() {
        log::info!("No sheets registered, skipping archive export");
        return Ok(None);
    }
    options.validate()?;

    let sheets = sheets.to_vec();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    log::info!(
        "Exporting {} sheets to {}",
        sheets.len(),
        output_path.display()
    );
    let bytes = tokio::task::spawn_blocking(move || build_archive(&sheets, &options)).await??;
    write_atomically(&output_path, bytes).await?;

    Ok(Some(output_path))
}
