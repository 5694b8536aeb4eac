use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::{build, Built, Defaults};
use crate::error::BuildError;
use crate::model::{ArchitecturalElement, ElementKind, ElementParams};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallChanges {
    pub start: Option<Point3<f64>>,
    pub end: Option<Point3<f64>>,
    pub height: Option<f64>,
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabChanges {
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FurnitureChanges {
    pub position_x: Option<f64>,
    pub position_z: Option<f64>,
}

/// Partial update of an element's parameters. `None` fields keep their value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterChanges {
    Wall(WallChanges),
    Slab(SlabChanges),
    Furniture(FurnitureChanges),
}

impl ParameterChanges {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            ParameterChanges::Wall(_) => ElementKind::Wall,
            ParameterChanges::Slab(_) => ElementKind::Slab,
            ParameterChanges::Furniture(_) => ElementKind::Furniture,
        }
    }

    /// Merges the changes into `params` in place.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::KindMismatch`] and leaves `params` untouched when
    /// the changes target a different element kind.
    pub fn merge_into(&self, params: &mut ElementParams) -> Result<(), BuildError> {
        match (self, params) {
            (ParameterChanges::Wall(c), ElementParams::Wall(p)) => {
                if let Some(start) = c.start {
                    p.start = start;
                }
                if let Some(end) = c.end {
                    p.end = end;
                }
                if let Some(height) = c.height {
                    p.height = height;
                }
                if let Some(thickness) = c.thickness {
                    p.thickness = thickness;
                }
            }
            (ParameterChanges::Slab(c), ElementParams::Slab(p)) => {
                if let Some(width) = c.width {
                    p.width = width;
                }
                if let Some(depth) = c.depth {
                    p.depth = depth;
                }
                if let Some(thickness) = c.thickness {
                    p.thickness = thickness;
                }
            }
            (ParameterChanges::Furniture(c), ElementParams::Furniture(p)) => {
                if let Some(x) = c.position_x {
                    p.position_x = x;
                }
                if let Some(z) = c.position_z {
                    p.position_z = z;
                }
            }
            (changes, params) => {
                return Err(BuildError::KindMismatch {
                    expected: params.kind(),
                    found: changes.kind(),
                })
            }
        }
        Ok(())
    }
}

/// Merges `changes` into a copy of the element's parameters and rebuilds the
/// volume from scratch. The element itself is not modified.
///
/// Invalid dimensions fall back to `defaults`; only a degenerate wall or a
/// kind mismatch fails.
pub fn regenerate_volume(
    element: &ArchitecturalElement,
    changes: &ParameterChanges,
    defaults: &Defaults,
) -> Result<Built, BuildError> {
    let mut params = element.params.clone();
    changes.merge_into(&mut params)?;
    build(&params, defaults)
}
