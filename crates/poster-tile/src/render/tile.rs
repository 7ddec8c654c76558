//! Tile rendering
//!
//! Turns one grid cell into a page-sized raster: crop, apply the border
//! policy, then scale with Lanczos resampling.

use crate::constants::{BORDER_FILL, JPEG_QUALITY};
use crate::layout::{Cell, GridPosition};
use crate::types::{BorderPolicy, Orientation, PageFormat, PosterError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// A page-sized raster for one grid cell
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Cell this page was rendered from
    pub pos: GridPosition,
    /// Exactly the pixel size of the page format
    pub image: RgbImage,
}

impl RenderedPage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode the page as a baseline JPEG
    pub fn encode_jpeg(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            encoder.encode_image(&self.image)?;
        }
        Ok(bytes)
    }
}

/// Render one cell of `image` as a page of `format`.
///
/// `include_borders` is interpreted per orientation, see [`BorderPolicy`].
pub fn render_tile(
    image: &DynamicImage,
    cell: &Cell,
    format: &PageFormat,
    include_borders: bool,
    orientation: Orientation,
) -> Result<RenderedPage> {
    render_tile_with_policy(
        image,
        cell,
        format,
        BorderPolicy::for_layout(orientation, include_borders),
    )
}

/// Render one cell of `image` as a page of `format` using an explicit
/// border policy.
pub fn render_tile_with_policy(
    image: &DynamicImage,
    cell: &Cell,
    format: &PageFormat,
    border: BorderPolicy,
) -> Result<RenderedPage> {
    format.validate(border)?;

    let rect = cell.source_rect;
    if rect.right > image.width()
        || rect.bottom > image.height()
        || rect.left >= rect.right
        || rect.top >= rect.bottom
    {
        return Err(PosterError::InvalidLayout(format!(
            "Cell {:?} does not fit inside a {}x{} image",
            rect,
            image.width(),
            image.height()
        )));
    }

    let tile = image
        .crop_imm(rect.left, rect.top, rect.width(), rect.height())
        .to_rgb8();

    let page = match border {
        BorderPolicy::None => resize(&tile, format.width_px, format.height_px),
        BorderPolicy::ExpandTile { border_px } => {
            let expanded = expand_with_border(&tile, border_px);
            resize(&expanded, format.width_px, format.height_px)
        }
        BorderPolicy::InsetCanvas { margin_px } => {
            let inner = resize(
                &tile,
                format.width_px - 2 * margin_px,
                format.height_px - 2 * margin_px,
            );
            let mut canvas =
                RgbImage::from_pixel(format.width_px, format.height_px, Rgb(BORDER_FILL));
            imageops::replace(&mut canvas, &inner, margin_px as i64, margin_px as i64);
            canvas
        }
    };

    Ok(RenderedPage {
        pos: cell.pos,
        image: page,
    })
}

fn resize(tile: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(tile, width, height, FilterType::Lanczos3)
}

/// Surround `tile` with a uniform border of `border_px` pixels
fn expand_with_border(tile: &RgbImage, border_px: u32) -> RgbImage {
    let mut expanded = RgbImage::from_pixel(
        tile.width() + 2 * border_px,
        tile.height() + 2 * border_px,
        Rgb(BORDER_FILL),
    );
    imageops::replace(&mut expanded, tile, border_px as i64, border_px as i64);
    expanded
}
