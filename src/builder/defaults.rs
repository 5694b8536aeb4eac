use serde::{Deserialize, Serialize};

/// Extent used for furniture assets that report empty bounds.
pub const FURNITURE_FALLBACK_EXTENT: f64 = 1.0;

/// Substitutes for non-positive wall dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallDefaults {
    pub height: f64,
    pub thickness: f64,
}

impl Default for WallDefaults {
    fn default() -> Self {
        Self {
            height: 2.5,
            thickness: 0.15,
        }
    }
}

/// Substitutes for non-positive slab dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabDefaults {
    pub width: f64,
    pub depth: f64,
    pub thickness: f64,
}

impl Default for SlabDefaults {
    fn default() -> Self {
        Self {
            width: 5.0,
            depth: 5.0,
            thickness: 0.2,
        }
    }
}

/// Fallback dimensions per element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub wall: WallDefaults,
    pub slab: SlabDefaults,
}
