use nalgebra::Point3;

use super::{resolve_dimension, ParameterWarning, SlabDefaults};
use crate::model::{Extents, SlabParams, VolumeSpec};

/// Computes the volume of a floor slab centred on the world origin.
///
/// The top face sits on `y = 0` and the slab extends downward by `thickness`.
/// Invalid dimensions fall back to the built-in [`SlabDefaults`].
#[must_use]
pub fn compute_slab_volume(width: f64, depth: f64, thickness: f64) -> VolumeSpec {
    compute_slab_volume_with(width, depth, thickness, &SlabDefaults::default())
}

#[must_use]
pub fn compute_slab_volume_with(
    width: f64,
    depth: f64,
    thickness: f64,
    defaults: &SlabDefaults,
) -> VolumeSpec {
    let mut warnings = Vec::new();
    let width = resolve_dimension("width", width, defaults.width, &mut warnings);
    let depth = resolve_dimension("depth", depth, defaults.depth, &mut warnings);
    let thickness = resolve_dimension("thickness", thickness, defaults.thickness, &mut warnings);

    VolumeSpec {
        size: Extents::new(width, thickness, depth),
        center: Point3::new(0.0, -thickness / 2.0, 0.0),
        yaw: 0.0,
    }
}

#[must_use]
pub fn sanitize_slab(
    slab: &SlabParams,
    defaults: &SlabDefaults,
    warnings: &mut Vec<ParameterWarning>,
) -> SlabParams {
    SlabParams {
        width: resolve_dimension("width", slab.width, defaults.width, warnings),
        depth: resolve_dimension("depth", slab.depth, defaults.depth, warnings),
        thickness: resolve_dimension("thickness", slab.thickness, defaults.thickness, warnings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn slab_top_face_sits_on_ground() {
        let v = compute_slab_volume(6.0, 6.0, 0.2);
        assert_relative_eq!(v.center, Point3::new(0.0, -0.1, 0.0));
        assert_relative_eq!(v.yaw, 0.0);
        assert_relative_eq!(v.aabb().max.y, 0.0);
        assert_relative_eq!(v.aabb().min.y, -0.2);
    }

    #[test]
    fn slab_size_is_width_thickness_depth() {
        let v = compute_slab_volume(8.0, 3.0, 0.25);
        assert_eq!(v.size, Extents::new(8.0, 0.25, 3.0));
    }

    #[test]
    fn zero_thickness_uses_default() {
        let v = compute_slab_volume(6.0, 6.0, 0.0);
        assert_relative_eq!(v.size.y, 0.2);
        assert_relative_eq!(v.center.y, -0.1);
    }

    #[test]
    fn all_invalid_dimensions_use_defaults() {
        let v = compute_slab_volume(-1.0, f64::INFINITY, f64::NAN);
        assert_eq!(v.size, Extents::new(5.0, 0.2, 5.0));
    }
}
