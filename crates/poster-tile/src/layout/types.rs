//! Layout data types for poster tiling
//!
//! These types describe how the source image is partitioned before any
//! pixels are touched.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

impl GridPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Rectangle in source image pixels, half-open on the right and bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// One grid cell and the part of the source image it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub pos: GridPosition,
    pub source_rect: PixelRect,
}

/// Row/column partition of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows (derived, always >= 1)
    pub rows: u32,
    /// Number of columns (requested, always >= 1)
    pub cols: u32,
    /// Width of an interior cell in pixels
    pub cell_width: u32,
    /// Height of an interior cell in pixels
    pub cell_height: u32,
    /// Source image width in pixels
    pub image_width: u32,
    /// Source image height in pixels
    pub image_height: u32,
}

impl Grid {
    /// Number of cells, which is also the number of output pages
    pub fn page_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Grid position of the page at `index` in row-major order
    pub fn position_of_page(&self, index: usize) -> Option<GridPosition> {
        if index >= self.page_count() {
            return None;
        }
        let cols = self.cols as usize;
        Some(GridPosition::new((index / cols) as u32, (index % cols) as u32))
    }

    /// Pixels left over to the right of the last full column
    pub fn remainder_width(&self) -> u32 {
        self.image_width - self.cell_width * self.cols
    }

    /// Pixels left over below the last full row
    pub fn remainder_height(&self) -> u32 {
        self.image_height - self.cell_height * self.rows
    }
}
