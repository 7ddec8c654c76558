//! Poster assembly - one page per grid cell
//!
//! This module orchestrates the tiling process:
//! 1. Plan the grid from the image size and layout
//! 2. Render every cell to a page raster in row-major order
//! 3. Append each raster to the output document
//! 4. Serialize the document and discard transient tiles

mod artifacts;
mod io;

pub use artifacts::{cleanup_stale_tiles, reset_workspace};
pub use io::{load_image, output_path, save_pdf};

use crate::layout::{Grid, cells, plan_grid};
use crate::options::{AssemblyContext, LayoutSpec};
use crate::render::{PosterPdfBuilder, render_tile_with_policy};
use crate::types::*;
use artifacts::TileArtifacts;
use image::DynamicImage;
use log::{debug, info};

/// A finished poster document
#[derive(Debug)]
pub struct PosterDocument {
    /// Serialized PDF
    pub bytes: Vec<u8>,
    /// Orientation shared by every page
    pub orientation: Orientation,
    /// Grid the pages were cut from; page k is cell (k / cols, k % cols)
    pub grid: Grid,
    /// Format of every page
    pub page_format: PageFormat,
    /// Transient tiles removed after the document was finished
    pub cleanup: CleanupReport,
}

impl PosterDocument {
    pub fn page_count(&self) -> usize {
        self.grid.page_count()
    }
}

/// Main assembly function
pub async fn assemble(
    image: &DynamicImage,
    spec: &LayoutSpec,
    context: &AssemblyContext,
) -> Result<PosterDocument> {
    spec.validate()?;

    let image = image.clone();
    let spec = *spec;
    let context = context.clone();

    tokio::task::spawn_blocking(move || assemble_blocking(&image, &spec, &context)).await?
}

/// Synchronous assembly; runs to completion or fails without a document
pub fn assemble_blocking(
    image: &DynamicImage,
    spec: &LayoutSpec,
    context: &AssemblyContext,
) -> Result<PosterDocument> {
    spec.validate()?;

    let grid = plan_grid(image.width(), image.height(), spec.cols, spec.orientation)?;
    let page_format = context.page_format_for(spec.orientation);
    let border = spec.border_policy();
    page_format.validate(border)?;

    info!(
        "Assembling {}x{} image into {} {} pages ({} rows x {} cols)",
        image.width(),
        image.height(),
        grid.page_count(),
        spec.orientation,
        grid.rows,
        grid.cols
    );

    let mut artifacts = TileArtifacts::new(&context.tile_storage)?;
    let mut builder = PosterPdfBuilder::new(&page_format);

    for cell in cells(&grid) {
        let page = render_tile_with_policy(image, &cell, &page_format, border)?;
        let jpeg = artifacts.stage(cell.pos, page.encode_jpeg()?)?;
        builder.add_jpeg_page(jpeg, page.width(), page.height());
        debug!(
            "Page {}/{} from cell ({}, {}) {:?}",
            builder.page_count(),
            grid.page_count(),
            cell.pos.row,
            cell.pos.col,
            cell.source_rect
        );
    }

    let bytes = builder.finish()?;
    let cleanup = artifacts.cleanup();

    Ok(PosterDocument {
        bytes,
        orientation: spec.orientation,
        grid,
        page_format,
        cleanup,
    })
}
