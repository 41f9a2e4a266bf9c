//! File output for exports

use crate::types::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Sibling temp path used while an export is being written
pub(crate) fn part_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Write `bytes` to `path` so that `path` only ever holds a complete file.
///
/// The data goes to `<path>.part` first and is renamed into place once the
/// write succeeded. On failure the temp file is removed.
pub async fn write_atomically(path: impl AsRef<Path>, bytes: Vec<u8>) -> Result<()> {
    let path = path.as_ref();
    let part = part_path(path);

    if let Err(e) = tokio::fs::write(&part, bytes).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&part, path).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
