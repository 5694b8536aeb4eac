//! Furniture asset resolution.
//!
//! Loaders only report where an asset lives and how big it is. Placement
//! geometry is derived from the reported bounds by the builder.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::builder::FURNITURE_FALLBACK_EXTENT;
use crate::error::AssetLoadError;
use crate::model::Extents;

/// A resolved asset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    pub path: String,
    /// File the asset was found in, when the loader looked on disk.
    pub resolved: Option<PathBuf>,
    pub bounds: Extents,
}

pub trait AssetLoader {
    fn load(&self, path: &str) -> Result<LoadedAsset, AssetLoadError>;
}

impl<T: AssetLoader + ?Sized> AssetLoader for Box<T> {
    fn load(&self, path: &str) -> Result<LoadedAsset, AssetLoadError> {
        (**self).load(path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub path: String,
    /// Bounds as `[x, y, z]` in metres.
    pub size: [f64; 3],
}

/// Known furniture models and their bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    pub entries: Vec<CatalogueEntry>,
}

impl Default for Catalogue {
    fn default() -> Self {
        let entry = |name: &str, path: &str, size: [f64; 3]| CatalogueEntry {
            name: name.to_string(),
            path: path.to_string(),
            size,
        };
        Self {
            entries: vec![
                entry("Chair", "chair.glb", [0.5, 0.9, 0.5]),
                entry("Table", "table.glb", [1.6, 0.75, 0.9]),
                entry("Sofa", "sofa.glb", [2.0, 0.85, 0.9]),
            ],
        }
    }
}

impl Catalogue {
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&CatalogueEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Bounds of `path`, or a unit box for assets not in the catalogue.
    #[must_use]
    pub fn bounds_for(&self, path: &str) -> Extents {
        match self.get(path) {
            Some(entry) => Extents::new(entry.size[0], entry.size[1], entry.size[2]),
            None => {
                tracing::warn!(path, "asset not in catalogue, using unit bounds");
                Extents::new(
                    FURNITURE_FALLBACK_EXTENT,
                    FURNITURE_FALLBACK_EXTENT,
                    FURNITURE_FALLBACK_EXTENT,
                )
            }
        }
    }
}

/// Resolves assets from the catalogue alone, without touching the disk.
#[derive(Debug, Clone, Default)]
pub struct CatalogueLoader {
    pub catalogue: Catalogue,
}

impl AssetLoader for CatalogueLoader {
    fn load(&self, path: &str) -> Result<LoadedAsset, AssetLoadError> {
        Ok(LoadedAsset {
            path: path.to_string(),
            resolved: None,
            bounds: self.catalogue.bounds_for(path),
        })
    }
}

/// Resolves assets as files below a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    pub root: PathBuf,
    pub catalogue: Catalogue,
}

impl FsAssetLoader {
    pub fn new<P: AsRef<Path>>(root: P, catalogue: Catalogue) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            catalogue,
        }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, path: &str) -> Result<LoadedAsset, AssetLoadError> {
        let file = self.root.join(path);
        match std::fs::metadata(&file) {
            Ok(meta) if meta.is_file() => Ok(LoadedAsset {
                path: path.to_string(),
                resolved: Some(file),
                bounds: self.catalogue.bounds_for(path),
            }),
            Ok(_) => Err(AssetLoadError::NotFound {
                path: path.to_string(),
                searched: file.display().to_string(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetLoadError::NotFound {
                path: path.to_string(),
                searched: file.display().to_string(),
            }),
            Err(source) => Err(AssetLoadError::Read { path: file, source }),
        }
    }
}

/// Tries `primary` first and `secondary` when it fails.
#[derive(Debug, Clone)]
pub struct FallbackLoader<P, S> {
    pub primary: P,
    pub secondary: S,
}

impl<P: AssetLoader, S: AssetLoader> AssetLoader for FallbackLoader<P, S> {
    fn load(&self, path: &str) -> Result<LoadedAsset, AssetLoadError> {
        match self.primary.load(path) {
            Ok(asset) => Ok(asset),
            Err(primary_err) => {
                tracing::warn!(path, error = %primary_err, "primary asset path failed, trying fallback");
                self.secondary.load(path)
            }
        }
    }
}
