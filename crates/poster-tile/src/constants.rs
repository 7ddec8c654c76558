//! Shared constants for poster tiling
//!
//! This module centralizes the fixed page table, border sizes and naming
//! conventions used throughout the tiling process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Page Table
// =============================================================================

/// Render target for an A4 sheet at 300 dpi, long edge
pub const A4_LONG_EDGE_PX: u32 = 3508;

/// Render target for an A4 sheet at 300 dpi, short edge
pub const A4_SHORT_EDGE_PX: u32 = 2480;

/// A4 long edge in millimeters
pub const A4_LONG_EDGE_MM: f32 = 297.0;

/// A4 short edge in millimeters
pub const A4_SHORT_EDGE_MM: f32 = 210.0;

// =============================================================================
// Borders
// =============================================================================

/// White border added around a landscape tile before it is scaled (pixels)
pub const LANDSCAPE_TILE_BORDER_PX: u32 = 10;

/// White margin kept on every side of a portrait page (pixels)
pub const PORTRAIT_PAGE_MARGIN_PX: u32 = 20;

/// Fill used for borders and margins
pub const BORDER_FILL: [u8; 3] = [255, 255, 255];

// =============================================================================
// Encoding and Naming
// =============================================================================

/// JPEG quality used for each page raster
pub const JPEG_QUALITY: u8 = 75;

/// Extension of staged tile files
pub const TILE_EXTENSION: &str = "jpg";

/// File name of a staged tile; both indices are 1-based
pub fn tile_file_name(row: u32, col: u32) -> String {
    format!("tile_{}_{}.{}", row + 1, col + 1, TILE_EXTENSION)
}

/// Returns true if `name` follows the staged tile naming convention
pub fn is_tile_file_name(name: &str) -> bool {
    let Some(stem) = name
        .strip_prefix("tile_")
        .and_then(|rest| rest.strip_suffix(TILE_EXTENSION))
        .and_then(|rest| rest.strip_suffix('.'))
    else {
        return false;
    };

    match stem.split_once('_') {
        Some((row, col)) => {
            !row.is_empty()
                && !col.is_empty()
                && row.bytes().all(|b| b.is_ascii_digit())
                && col.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
