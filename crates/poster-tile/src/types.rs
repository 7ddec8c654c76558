use crate::constants::*;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Image error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Sheet orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Landscape: width > height
    #[default]
    Landscape,
    /// Portrait: height > width
    Portrait,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }

    /// The fixed page format used for this orientation
    pub fn page_format(self) -> PageFormat {
        match self {
            Orientation::Landscape => PageFormat::LANDSCAPE,
            Orientation::Portrait => PageFormat::PORTRAIT,
        }
    }

    /// File name of the finished document for this orientation
    pub fn output_file_name(self) -> String {
        format!("output_{}.pdf", self.name())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            other => Err(PosterError::Config(format!(
                "Unknown orientation '{}', expected 'landscape' or 'portrait'",
                other
            ))),
        }
    }
}

/// Pixel render target and physical sheet size of one output page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageFormat {
    pub width_px: u32,
    pub height_px: u32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageFormat {
    /// A4 landscape at 300 dpi
    pub const LANDSCAPE: PageFormat = PageFormat {
        width_px: A4_LONG_EDGE_PX,
        height_px: A4_SHORT_EDGE_PX,
        width_mm: A4_LONG_EDGE_MM,
        height_mm: A4_SHORT_EDGE_MM,
    };

    /// A4 portrait at 300 dpi
    pub const PORTRAIT: PageFormat = PageFormat {
        width_px: A4_SHORT_EDGE_PX,
        height_px: A4_LONG_EDGE_PX,
        width_mm: A4_SHORT_EDGE_MM,
        height_mm: A4_LONG_EDGE_MM,
    };

    /// Sheet dimensions (width, height) in points
    pub fn dimensions_pt(&self) -> (f32, f32) {
        (mm_to_pt(self.width_mm), mm_to_pt(self.height_mm))
    }

    /// Check that a page of this format can hold the given border policy
    pub fn validate(&self, border: BorderPolicy) -> Result<()> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(PosterError::InvalidLayout(format!(
                "Page format must have a non-zero pixel size, got {}x{}",
                self.width_px, self.height_px
            )));
        }
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 {
            return Err(PosterError::InvalidLayout(format!(
                "Page format must have a positive sheet size, got {}x{}mm",
                self.width_mm, self.height_mm
            )));
        }
        if let BorderPolicy::InsetCanvas { margin_px } = border {
            if self.width_px <= 2 * margin_px || self.height_px <= 2 * margin_px {
                return Err(PosterError::InvalidLayout(format!(
                    "Page of {}x{}px leaves no room inside a {}px margin",
                    self.width_px, self.height_px, margin_px
                )));
            }
        }
        Ok(())
    }
}

/// How `include_borders` is applied to a tile.
///
/// The two orientations use different policies and neither is a proportional
/// margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Stretch the crop over the whole page
    None,
    /// Add a white border to the crop before it is scaled; the border scales
    /// along with the tile
    ExpandTile { border_px: u32 },
    /// Scale the crop into the page minus the margin and paste it on a white
    /// page-sized canvas; the margin is exact on the final page
    InsetCanvas { margin_px: u32 },
}

impl BorderPolicy {
    pub fn for_layout(orientation: Orientation, include_borders: bool) -> Self {
        match (orientation, include_borders) {
            (_, false) => BorderPolicy::None,
            (Orientation::Landscape, true) => BorderPolicy::ExpandTile {
                border_px: LANDSCAPE_TILE_BORDER_PX,
            },
            (Orientation::Portrait, true) => BorderPolicy::InsetCanvas {
                margin_px: PORTRAIT_PAGE_MARGIN_PX,
            },
        }
    }
}

/// A transient artifact that could not be removed
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: std::io::Error,
}

/// Outcome of a best-effort cleanup pass
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Paths that were removed
    pub removed: Vec<PathBuf>,
    /// Paths that were left behind, with the reason
    pub failed: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Statistics about a poster layout, computed without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PosterStatistics {
    /// Source image size in pixels
    pub image_width: u32,
    pub image_height: u32,
    /// Grid dimensions
    pub rows: u32,
    pub cols: u32,
    /// Size of an interior cell in source pixels
    pub cell_width: u32,
    pub cell_height: u32,
    /// Extra pixels absorbed by the last column and the last row
    pub remainder_width: u32,
    pub remainder_height: u32,
    /// Number of output pages (one per cell)
    pub page_count: usize,
    /// Page format used for every page
    pub page_format: PageFormat,
    /// Size of the assembled poster in millimeters
    pub poster_width_mm: f32,
    pub poster_height_mm: f32,
}
