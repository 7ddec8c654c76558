use crate::layout::plan_grid;
use crate::options::LayoutSpec;
use crate::types::*;

/// Calculate statistics for a poster layout without rendering anything
pub fn calculate_statistics(
    image_width: u32,
    image_height: u32,
    spec: &LayoutSpec,
) -> Result<PosterStatistics> {
    spec.validate()?;

    let grid = plan_grid(image_width, image_height, spec.cols, spec.orientation)?;
    let page_format = spec.orientation.page_format();

    Ok(PosterStatistics {
        image_width,
        image_height,
        rows: grid.rows,
        cols: grid.cols,
        cell_width: grid.cell_width,
        cell_height: grid.cell_height,
        remainder_width: grid.remainder_width(),
        remainder_height: grid.remainder_height(),
        page_count: grid.page_count(),
        page_format,
        poster_width_mm: grid.cols as f32 * page_format.width_mm,
        poster_height_mm: grid.rows as f32 * page_format.height_mm,
    })
}
