pub mod assemble;
pub mod constants;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use assemble::{
    PosterDocument, assemble, assemble_blocking, cleanup_stale_tiles, load_image, output_path,
    reset_workspace, save_pdf,
};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
