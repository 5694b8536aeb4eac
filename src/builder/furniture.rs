use nalgebra::Point3;

use super::{resolve_dimension, ParameterWarning, FURNITURE_FALLBACK_EXTENT};
use crate::model::{Extents, FurnitureParams, VolumeSpec};

/// Bounding volume of a furniture asset placed at `(x, z)` on the ground.
///
/// Furniture never rotates and always rests on `y = 0`.
#[must_use]
pub fn compute_furniture_volume(position_x: f64, position_z: f64, bounds: &Extents) -> VolumeSpec {
    let mut warnings = Vec::new();
    let bounds = sanitize_bounds(bounds, &mut warnings);
    VolumeSpec {
        size: bounds,
        center: Point3::new(
            finite_or_zero(position_x),
            bounds.y / 2.0,
            finite_or_zero(position_z),
        ),
        yaw: 0.0,
    }
}

#[must_use]
pub fn sanitize_furniture(
    furniture: &FurnitureParams,
    warnings: &mut Vec<ParameterWarning>,
) -> FurnitureParams {
    FurnitureParams {
        source_path: furniture.source_path.clone(),
        position_x: finite_or_zero(furniture.position_x),
        position_z: finite_or_zero(furniture.position_z),
        bounds: sanitize_bounds(&furniture.bounds, warnings),
    }
}

fn sanitize_bounds(bounds: &Extents, warnings: &mut Vec<ParameterWarning>) -> Extents {
    Extents::new(
        resolve_dimension("bounds.x", bounds.x, FURNITURE_FALLBACK_EXTENT, warnings),
        resolve_dimension("bounds.y", bounds.y, FURNITURE_FALLBACK_EXTENT, warnings),
        resolve_dimension("bounds.z", bounds.z, FURNITURE_FALLBACK_EXTENT, warnings),
    )
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
