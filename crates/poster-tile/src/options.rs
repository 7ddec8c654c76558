use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a poster is cut and printed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutSpec {
    /// Number of sheets across; the number of rows is derived
    pub cols: u32,
    /// Sheet orientation for every page
    pub orientation: Orientation,
    /// Keep a white border around each tile
    #[cfg_attr(feature = "serde", serde(default))]
    pub include_borders: bool,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            cols: 2,
            orientation: Orientation::Landscape,
            include_borders: false,
        }
    }
}

impl LayoutSpec {
    pub fn new(cols: u32, orientation: Orientation, include_borders: bool) -> Self {
        Self {
            cols,
            orientation,
            include_borders,
        }
    }

    /// Border policy implied by the orientation and border flag
    pub fn border_policy(&self) -> BorderPolicy {
        BorderPolicy::for_layout(self.orientation, self.include_borders)
    }

    /// Load a layout from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let spec: LayoutSpec = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse layout: {}", e)))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Save the layout to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize layout: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<()> {
        if self.cols < 1 {
            return Err(PosterError::InvalidLayout(
                "Column count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where rendered tiles live between rendering and page insertion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TileStorage {
    /// Keep each encoded tile in memory
    #[default]
    Memory,
    /// Write each encoded tile to `tile_{row}_{col}.jpg` in this directory;
    /// the files are removed once the assembly ends
    Directory(PathBuf),
}

/// Per-request settings owned by the caller and threaded through an assembly
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssemblyContext {
    pub tile_storage: TileStorage,
    /// Overrides the fixed page format of the orientation when set
    pub page_format: Option<PageFormat>,
}

impl AssemblyContext {
    /// Context that stages tiles on disk
    pub fn with_tile_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tile_storage: TileStorage::Directory(dir.into()),
            ..Default::default()
        }
    }

    /// Page format used for `orientation` under this context
    pub fn page_format_for(&self, orientation: Orientation) -> PageFormat {
        self.page_format.unwrap_or_else(|| orientation.page_format())
    }
}
