//! Image and document I/O for poster assembly

use super::PosterDocument;
use crate::types::*;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Load and decode a source image
pub async fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(image)
}

/// Save the finished document, replacing any previous file at `path`
pub async fn save_pdf(document: &PosterDocument, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &document.bytes).await?;
    Ok(())
}

/// Fixed location of the finished document for `orientation` inside `dir`
pub fn output_path(dir: impl AsRef<Path>, orientation: Orientation) -> PathBuf {
    dir.as_ref().join(orientation.output_file_name())
}
