use nalgebra::{Point3, Vector3};

use super::{resolve_dimension, ParameterWarning, WallDefaults};
use crate::error::BuildError;
use crate::model::{Extents, VolumeSpec, WallParams};

/// Minimum horizontal run for a wall to have a direction.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Computes the volume of a wall between two points, using the built-in
/// defaults for invalid `height` or `thickness`.
///
/// The wall stands on the ground plane and extends upward by `height`. Its
/// local X axis follows the start→end direction projected onto the
/// horizontal plane: a wall along +X has yaw 0.
///
/// # Errors
///
/// Returns [`BuildError::DegenerateGeometry`] when the two points coincide
/// on the horizontal plane, [`BuildError::NonFiniteEndpoint`] for NaN or
/// infinite coordinates and [`BuildError::LengthOverflow`] when the distance
/// between the points overflows.
///
/// # Example
///
/// ```
/// use bim_configurator::builder::compute_wall_volume;
/// use nalgebra::Point3;
///
/// let v = compute_wall_volume(&Point3::origin(), &Point3::new(5.0, 0.0, 0.0), 3.0, 0.2)?;
/// assert_eq!(v.size.x, 5.0);
/// assert_eq!(v.center, Point3::new(2.5, 1.5, 0.0));
/// # Ok::<(), bim_configurator::error::BuildError>(())
/// ```
pub fn compute_wall_volume(
    start: &Point3<f64>,
    end: &Point3<f64>,
    height: f64,
    thickness: f64,
) -> Result<VolumeSpec, BuildError> {
    compute_wall_volume_with(start, end, height, thickness, &WallDefaults::default())
}

/// Same as [`compute_wall_volume`] with explicit defaults.
pub fn compute_wall_volume_with(
    start: &Point3<f64>,
    end: &Point3<f64>,
    height: f64,
    thickness: f64,
    defaults: &WallDefaults,
) -> Result<VolumeSpec, BuildError> {
    for (endpoint, p) in [("start", start), ("end", end)] {
        if !p.iter().all(|c| c.is_finite()) {
            return Err(BuildError::NonFiniteEndpoint { endpoint });
        }
    }

    let delta = end - start;
    let length = delta.norm();
    if !length.is_finite() {
        return Err(BuildError::LengthOverflow);
    }
    let horizontal = Vector3::new(delta.x, 0.0, delta.z);
    let run = horizontal.norm();
    if run <= DEGENERATE_EPSILON {
        return Err(BuildError::DegenerateGeometry {
            x: start.x,
            z: start.z,
        });
    }

    let mut warnings = Vec::new();
    let height = resolve_dimension("height", height, defaults.height, &mut warnings);
    let thickness = resolve_dimension("thickness", thickness, defaults.thickness, &mut warnings);

    let direction = horizontal / run;
    let mid = nalgebra::center(start, end);

    Ok(VolumeSpec {
        size: Extents::new(length, height, thickness),
        center: Point3::new(mid.x, height / 2.0, mid.z),
        yaw: (-direction.z).atan2(direction.x),
    })
}

/// Copy of `wall` with invalid dimensions replaced.
#[must_use]
pub fn sanitize_wall(
    wall: &WallParams,
    defaults: &WallDefaults,
    warnings: &mut Vec<ParameterWarning>,
) -> WallParams {
    WallParams {
        start: wall.start,
        end: wall.end,
        height: resolve_dimension("height", wall.height, defaults.height, warnings),
        thickness: resolve_dimension("thickness", wall.thickness, defaults.thickness, warnings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    /// Signed angle difference folded into `[0, 2π)`.
    fn yaw_delta(a: f64, b: f64) -> f64 {
        (a - b).rem_euclid(TAU)
    }

    #[test]
    fn wall_along_x() {
        let v = compute_wall_volume(&p(0.0, 0.0, 0.0), &p(5.0, 0.0, 0.0), 3.0, 0.2).unwrap();
        assert_relative_eq!(v.size.x, 5.0);
        assert_relative_eq!(v.size.y, 3.0);
        assert_relative_eq!(v.size.z, 0.2);
        assert_relative_eq!(v.center, p(2.5, 1.5, 0.0));
        assert_relative_eq!(v.yaw, 0.0);
    }

    #[test]
    fn wall_along_z_is_a_quarter_turn() {
        let v = compute_wall_volume(&p(0.0, 0.0, 0.0), &p(0.0, 0.0, 5.0), 3.0, 0.2).unwrap();
        assert_relative_eq!(v.size.x, 5.0);
        assert_relative_eq!(v.center, p(0.0, 1.5, 2.5));
        assert_relative_eq!(v.yaw.abs(), FRAC_PI_2);
        // local +X must land on world +Z
        let tip = v.to_world(&p(v.size.x / 2.0, 0.0, 0.0));
        assert_relative_eq!(tip.z, 5.0, epsilon = 1e-12);
        assert_relative_eq!(tip.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn diagonal_wall_length_and_center() {
        let v = compute_wall_volume(&p(1.0, 0.0, 1.0), &p(4.0, 0.0, 5.0), 2.0, 0.3).unwrap();
        assert_relative_eq!(v.size.x, 5.0);
        assert_relative_eq!(v.center, p(2.5, 1.0, 3.0));
        assert_relative_eq!(v.yaw, (-0.8f64).atan2(0.6));
    }

    #[test]
    fn swapped_endpoints_flip_yaw_by_pi() {
        let cases = [
            (p(0.0, 0.0, 0.0), p(5.0, 0.0, 0.0)),
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, 5.0)),
            (p(-2.0, 0.0, 3.0), p(7.5, 0.0, -1.25)),
        ];
        for (a, b) in cases {
            let forward = compute_wall_volume(&a, &b, 3.0, 0.2).unwrap();
            let backward = compute_wall_volume(&b, &a, 3.0, 0.2).unwrap();
            assert_relative_eq!(forward.center, backward.center);
            assert_relative_eq!(forward.size.x, backward.size.x);
            assert_relative_eq!(yaw_delta(forward.yaw, backward.yaw), PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let a = p(3.0, 0.0, -2.0);
        assert_eq!(
            compute_wall_volume(&a, &a, 3.0, 0.2),
            Err(BuildError::DegenerateGeometry { x: 3.0, z: -2.0 })
        );
    }

    #[test]
    fn purely_vertical_offset_is_degenerate() {
        let result = compute_wall_volume(&p(1.0, 0.0, 1.0), &p(1.0, 2.0, 1.0), 3.0, 0.2);
        assert!(matches!(result, Err(BuildError::DegenerateGeometry { .. })));
    }

    #[test]
    fn non_finite_endpoints_are_rejected() {
        assert_eq!(
            compute_wall_volume(&p(0.0, f64::NAN, 0.0), &p(5.0, 0.0, 0.0), 3.0, 0.2),
            Err(BuildError::NonFiniteEndpoint { endpoint: "start" })
        );
        assert_eq!(
            compute_wall_volume(&p(0.0, 0.0, 0.0), &p(5.0, f64::INFINITY, 0.0), 3.0, 0.2),
            Err(BuildError::NonFiniteEndpoint { endpoint: "end" })
        );
    }

    #[test]
    fn overflowing_length_is_not_reported_as_degenerate() {
        let result = compute_wall_volume(&p(-1e308, 0.0, 0.0), &p(1e308, 0.0, 0.0), 3.0, 0.2);
        assert_eq!(result, Err(BuildError::LengthOverflow));
        assert_eq!(
            BuildError::LengthOverflow.to_string(),
            "wall endpoints are too far apart to measure"
        );
    }

    #[test]
    fn non_positive_dimensions_use_defaults() {
        let v = compute_wall_volume(&p(0.0, 0.0, 0.0), &p(5.0, 0.0, 0.0), 0.0, -1.0).unwrap();
        assert_relative_eq!(v.size.y, 2.5);
        assert_relative_eq!(v.size.z, 0.15);
        assert_relative_eq!(v.center.y, 1.25);
    }

    #[test]
    fn custom_defaults_are_honoured() {
        let defaults = WallDefaults {
            height: 3.2,
            thickness: 0.2,
        };
        let v = compute_wall_volume_with(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), -3.0, 0.0, &defaults)
            .unwrap();
        assert_relative_eq!(v.size.y, 3.2);
        assert_relative_eq!(v.size.z, 0.2);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = compute_wall_volume(&p(0.3, 0.0, 0.7), &p(9.1, 0.0, -4.4), 2.7, 0.25).unwrap();
        let b = compute_wall_volume(&p(0.3, 0.0, 0.7), &p(9.1, 0.0, -4.4), 2.7, 0.25).unwrap();
        assert_eq!(a, b);
    }
}
