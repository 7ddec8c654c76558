//! Grid planning
//!
//! This module derives the row count from the requested column count and
//! computes the source rectangle of every cell.

use crate::types::{Orientation, PosterError, Result};

use super::{Cell, Grid, GridPosition, PixelRect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Plan the grid for an image of `width` x `height` pixels.
///
/// The row count is a heuristic, not an aspect-preserving computation:
/// * Landscape: `rows = floor(cols * width / height)`
/// * Portrait: `rows = floor(cols * height / width)`
///
/// Each formula keeps tiles roughly square for a source image that matches
/// the chosen orientation. The result is clamped to at least one row.
///
/// # Errors
/// `InvalidLayout` if a dimension or `cols` is zero, or if a cell would end
/// up zero pixels wide or tall.
pub fn plan_grid(width: u32, height: u32, cols: u32, orientation: Orientation) -> Result<Grid> {
    if width == 0 || height == 0 {
        return Err(PosterError::InvalidLayout(format!(
            "Image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if cols < 1 {
        return Err(PosterError::InvalidLayout(
            "Column count must be at least 1".to_string(),
        ));
    }

    let raw_rows = match orientation {
        Orientation::Landscape => cols as u64 * width as u64 / height as u64,
        Orientation::Portrait => cols as u64 * height as u64 / width as u64,
    };
    let rows = u32::try_from(raw_rows).unwrap_or(u32::MAX).max(1);

    let cell_width = width / cols;
    let cell_height = height / rows;

    if cell_width == 0 || cell_height == 0 {
        return Err(PosterError::InvalidLayout(format!(
            "A {}x{} image cannot be split into {} columns and {} rows",
            width, height, cols, rows
        )));
    }

    Ok(Grid {
        rows,
        cols,
        cell_width,
        cell_height,
        image_width: width,
        image_height: height,
    })
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the source rectangle of the cell at `pos`.
///
/// Interior cells are exactly `cell_width` x `cell_height`. The last column
/// and the last row extend to the image edge so the remainder pixels left by
/// the floor divisions are not dropped.
pub fn cell_bounds(grid: &Grid, pos: GridPosition) -> Cell {
    let left = pos.col * grid.cell_width;
    let top = pos.row * grid.cell_height;

    let right = if pos.col + 1 >= grid.cols {
        grid.image_width
    } else {
        (left + grid.cell_width).min(grid.image_width)
    };
    let bottom = if pos.row + 1 >= grid.rows {
        grid.image_height
    } else {
        (top + grid.cell_height).min(grid.image_height)
    };

    Cell {
        pos,
        source_rect: PixelRect::new(left, top, right, bottom),
    }
}

/// Iterate over every cell in row-major order (row outer, column inner)
pub fn cells(grid: &Grid) -> impl Iterator<Item = Cell> + '_ {
    (0..grid.rows).flat_map(move |row| {
        (0..grid.cols).map(move |col| cell_bounds(grid, GridPosition::new(row, col)))
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_image_landscape() {
        let grid = plan_grid(1000, 1000, 2, Orientation::Landscape).unwrap();

        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 2);
        assert_eq!(grid.cell_width, 500);
        assert_eq!(grid.cell_height, 500);
        assert_eq!(grid.page_count(), 4);
    }

    #[test]
    fn test_wide_image_portrait() {
        let grid = plan_grid(2000, 1000, 4, Orientation::Portrait).unwrap();

        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cell_width, 500);
        assert_eq!(grid.cell_height, 500);
        assert_eq!(grid.page_count(), 8);
    }

    #[test]
    fn test_row_formulas_are_asymmetric() {
        // Same image, same columns, different orientation
        let landscape = plan_grid(3000, 2000, 3, Orientation::Landscape).unwrap();
        let portrait = plan_grid(3000, 2000, 3, Orientation::Portrait).unwrap();

        assert_eq!(landscape.rows, 4); // floor(3 * 3000 / 2000)
        assert_eq!(portrait.rows, 2); // floor(3 * 2000 / 3000)
    }

    #[test]
    fn test_zero_columns_rejected() {
        let result = plan_grid(1000, 1000, 0, Orientation::Landscape);
        assert!(matches!(result, Err(PosterError::InvalidLayout(_))));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            plan_grid(0, 1000, 2, Orientation::Portrait),
            Err(PosterError::InvalidLayout(_))
        ));
        assert!(matches!(
            plan_grid(1000, 0, 2, Orientation::Portrait),
            Err(PosterError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_rows_clamped_to_one() {
        // floor(1 * 500 / 2000) = 0
        let grid = plan_grid(2000, 500, 1, Orientation::Portrait).unwrap();
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.cell_height, 500);

        // floor(1 * 100 / 1000) = 0
        let grid = plan_grid(100, 1000, 1, Orientation::Landscape).unwrap();
        assert_eq!(grid.rows, 1);
    }

    #[test]
    fn test_zero_height_cell_rejected() {
        // rows = floor(2 * 1000 / 3) = 666, cell height = floor(3 / 666) = 0
        let result = plan_grid(1000, 3, 2, Orientation::Landscape);
        assert!(matches!(result, Err(PosterError::InvalidLayout(_))));
    }

    #[test]
    fn test_more_columns_than_pixels_rejected() {
        let result = plan_grid(3, 3000, 4, Orientation::Portrait);
        assert!(matches!(result, Err(PosterError::InvalidLayout(_))));
    }

    #[test]
    fn test_cell_bounds_interior() {
        let grid = plan_grid(1000, 1000, 2, Orientation::Landscape).unwrap();

        let cell = cell_bounds(&grid, GridPosition::new(0, 1));
        assert_eq!(cell.source_rect, PixelRect::new(500, 0, 1000, 500));

        let cell = cell_bounds(&grid, GridPosition::new(1, 0));
        assert_eq!(cell.source_rect, PixelRect::new(0, 500, 500, 1000));
    }

    #[test]
    fn test_last_cells_absorb_remainder() {
        // cell width 333 with 1 pixel left over, 3 rows of 333 with 1 left over
        let grid = plan_grid(1000, 1000, 3, Orientation::Landscape).unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.remainder_width(), 1);
        assert_eq!(grid.remainder_height(), 1);

        let corner = cell_bounds(&grid, GridPosition::new(2, 2));
        assert_eq!(corner.source_rect, PixelRect::new(666, 666, 1000, 1000));
        assert_eq!(corner.source_rect.width(), 334);

        let inner = cell_bounds(&grid, GridPosition::new(1, 1));
        assert_eq!(inner.source_rect.width(), 333);
        assert_eq!(inner.source_rect.height(), 333);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = plan_grid(2000, 1000, 4, Orientation::Portrait).unwrap();
        let positions: Vec<_> = cells(&grid).map(|c| c.pos).collect();

        assert_eq!(positions.len(), 8);
        for (k, pos) in positions.iter().enumerate() {
            assert_eq!(pos.row as usize, k / 4);
            assert_eq!(pos.col as usize, k % 4);
            assert_eq!(grid.position_of_page(k), Some(*pos));
        }
        assert_eq!(grid.position_of_page(8), None);
    }

    #[test]
    fn test_cells_cover_image_without_overlap() {
        for &(width, height, cols, orientation) in &[
            (1000, 1000, 3, Orientation::Landscape),
            (1234, 987, 5, Orientation::Portrait),
            (4000, 1500, 7, Orientation::Landscape),
            (999, 2001, 2, Orientation::Portrait),
        ] {
            let grid = plan_grid(width, height, cols, orientation).unwrap();
            let all: Vec<_> = cells(&grid).collect();

            let total: u64 = all.iter().map(|c| c.source_rect.area()).sum();
            assert_eq!(total, width as u64 * height as u64);

            // Neighbours share edges exactly
            for cell in &all {
                let rect = cell.source_rect;
                if cell.pos.col + 1 < grid.cols {
                    let right =
                        cell_bounds(&grid, GridPosition::new(cell.pos.row, cell.pos.col + 1));
                    assert_eq!(rect.right, right.source_rect.left);
                } else {
                    assert_eq!(rect.right, width);
                }
                if cell.pos.row + 1 < grid.rows {
                    let below =
                        cell_bounds(&grid, GridPosition::new(cell.pos.row + 1, cell.pos.col));
                    assert_eq!(rect.bottom, below.source_rect.top);
                } else {
                    assert_eq!(rect.bottom, height);
                }
                assert!(rect.width() >= 1 && rect.height() >= 1);
            }
        }
    }
}
