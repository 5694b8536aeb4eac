//! Parametric element builder.
//!
//! Pure functions turning element parameters into a [`VolumeSpec`]. Nothing
//! here touches a scene; callers place the returned volumes themselves.
//!
//! Invalid dimensions (zero, negative, NaN or infinite) never fail. They are
//! replaced with a default and reported as a [`ParameterWarning`]. The only
//! hard failure is a wall whose endpoints coincide.

mod defaults;
mod furniture;
mod regenerate;
mod slab;
mod wall;

use std::fmt;

use serde::Serialize;

use crate::error::BuildError;
use crate::model::{ElementParams, VolumeSpec};

pub use defaults::{Defaults, SlabDefaults, WallDefaults, FURNITURE_FALLBACK_EXTENT};
pub use furniture::{compute_furniture_volume, sanitize_furniture};
pub use regenerate::{
    regenerate_volume, FurnitureChanges, ParameterChanges, SlabChanges, WallChanges,
};
pub use slab::{compute_slab_volume, compute_slab_volume_with, sanitize_slab};
pub use wall::{compute_wall_volume, compute_wall_volume_with, sanitize_wall, DEGENERATE_EPSILON};

/// A dimension that was rejected and replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterWarning {
    pub field: &'static str,
    pub rejected: f64,
    pub substituted: f64,
}

impl fmt::Display for ParameterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is not a positive dimension, using {}",
            self.field, self.rejected, self.substituted
        )
    }
}

/// Parameters after default substitution, with the volume they produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub params: ElementParams,
    pub volume: VolumeSpec,
    pub warnings: Vec<ParameterWarning>,
}

/// Sanitizes `params` and computes their volume.
///
/// The returned parameters hold the substituted values, so storing them keeps
/// the displayed parameters and the geometry consistent.
pub fn build(params: &ElementParams, defaults: &Defaults) -> Result<Built, BuildError> {
    let mut warnings = Vec::new();
    let (params, volume) = match params {
        ElementParams::Wall(wall) => {
            let wall = sanitize_wall(wall, &defaults.wall, &mut warnings);
            let volume = compute_wall_volume_with(
                &wall.start,
                &wall.end,
                wall.height,
                wall.thickness,
                &defaults.wall,
            )?;
            (ElementParams::Wall(wall), volume)
        }
        ElementParams::Slab(slab) => {
            let slab = sanitize_slab(slab, &defaults.slab, &mut warnings);
            let volume =
                compute_slab_volume_with(slab.width, slab.depth, slab.thickness, &defaults.slab);
            (ElementParams::Slab(slab), volume)
        }
        ElementParams::Furniture(furniture) => {
            let furniture = sanitize_furniture(furniture, &mut warnings);
            let volume = compute_furniture_volume(
                furniture.position_x,
                furniture.position_z,
                &furniture.bounds,
            );
            (ElementParams::Furniture(furniture), volume)
        }
    };

    tracing::debug!(
        kind = %params.kind(),
        size = ?volume.size,
        center = ?volume.center,
        yaw = volume.yaw,
        "computed volume"
    );

    Ok(Built {
        params,
        volume,
        warnings,
    })
}

/// Returns `value` when it is a finite positive number, `default` otherwise.
pub(crate) fn resolve_dimension(
    field: &'static str,
    value: f64,
    default: f64,
    warnings: &mut Vec<ParameterWarning>,
) -> f64 {
    if value.is_finite() && value > 0.0 {
        return value;
    }
    tracing::warn!(field, rejected = value, substituted = default, "invalid dimension");
    warnings.push(ParameterWarning {
        field,
        rejected: value,
        substituted: default,
    });
    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlabParams, WallParams};
    use nalgebra::Point3;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_stores_substituted_values() {
        let params = ElementParams::Slab(SlabParams {
            width: -1.0,
            depth: 4.0,
            thickness: 0.0,
        });
        let built = build(&params, &Defaults::default()).unwrap();
        assert_eq!(
            built.params,
            ElementParams::Slab(SlabParams {
                width: 5.0,
                depth: 4.0,
                thickness: 0.2,
            })
        );
        assert_eq!(built.warnings.len(), 2);
        assert_eq!(built.warnings[0].field, "width");
        assert_eq!(built.warnings[1].field, "thickness");
    }

    #[test]
    fn build_rejects_degenerate_wall() {
        let p = Point3::new(1.0, 0.0, 1.0);
        let params = ElementParams::Wall(WallParams {
            start: p,
            end: p,
            height: 3.0,
            thickness: 0.2,
        });
        assert!(matches!(
            build(&params, &Defaults::default()),
            Err(BuildError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn nan_is_treated_as_invalid() {
        let mut warnings = Vec::new();
        let v = resolve_dimension("height", f64::NAN, 2.5, &mut warnings);
        assert_eq!(v, 2.5);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "height NaN is not a positive dimension, using 2.5"
        );
    }
}
