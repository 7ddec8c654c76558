//! Rendering modules for poster tiling
//!
//! This module handles everything that touches pixels or PDF objects:
//! - Cropping, bordering and scaling each cell to a page raster
//! - Building the output document page by page

mod page;
mod tile;

pub use page::PosterPdfBuilder;
pub use tile::{RenderedPage, render_tile, render_tile_with_policy};
