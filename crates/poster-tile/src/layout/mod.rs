//! Layout calculation for poster tiling
//!
//! This module handles the geometry of the poster before rendering:
//! - Row count derived from the column count and orientation
//! - Source rectangle of every cell, including edge remainders

mod grid;
mod types;

pub use grid::*;
pub use types::*;
