use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Box size along the element's local axes.
///
/// Walls use `x = length`, `y = height`, `z = thickness`.
/// Slabs use `x = width`, `y = thickness`, `z = depth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Extents {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn half(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z) * 0.5
    }
}

/// World-space axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

/// Computed size, center and orientation of a box-shaped element.
///
/// The box is rotated about the vertical axis only. A yaw of zero keeps the
/// local X axis on world +X; positive yaw turns +X towards -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpec {
    pub size: Extents,
    pub center: Point3<f64>,
    pub yaw: f64,
}

impl VolumeSpec {
    #[must_use]
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    /// Maps a point from the box's local frame to world space.
    #[must_use]
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        self.center + self.rotation() * local.coords
    }

    /// The eight world-space corners, bottom face first.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let h = self.size.half();
        let mut out = [Point3::origin(); 8];
        let signs = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (i, sy) in [-1.0, 1.0].into_iter().enumerate() {
            for (j, (sx, sz)) in signs.into_iter().enumerate() {
                out[i * 4 + j] = self.to_world(&Point3::new(sx * h.x, sy * h.y, sz * h.z));
            }
        }
        out
    }

    /// Ground-plane outline as `(x, z)` pairs.
    #[must_use]
    pub fn footprint(&self) -> [(f64, f64); 4] {
        let c = self.corners();
        [
            (c[0].x, c[0].z),
            (c[1].x, c[1].z),
            (c[2].x, c[2].z),
            (c[3].x, c[3].z),
        ]
    }

    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.inf(c);
            max = max.sup(c);
        }
        Aabb { min, max }
    }

    /// Distance along the ray to the first hit, if the ray enters the box.
    ///
    /// `direction` does not need to be normalized; the result is in units of
    /// its length. Origins inside the box report a hit at distance 0. A
    /// non-finite or zero ray never hits.
    #[must_use]
    pub fn ray_distance(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Option<f64> {
        if !origin.iter().chain(direction.iter()).all(|c| c.is_finite())
            || direction.norm_squared() == 0.0
        {
            return None;
        }
        let inverse = self.rotation().inverse();
        let o = inverse * (origin - self.center);
        let d = inverse * direction;
        let h = self.size.half();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        for axis in 0..3 {
            if d[axis].abs() < f64::EPSILON {
                if o[axis].abs() > h[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (-h[axis] - o[axis]) / d[axis];
            let t2 = (h[axis] - o[axis]) / d[axis];
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            None
        } else {
            Some(t_near.max(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn box_at(center: Point3<f64>, yaw: f64) -> VolumeSpec {
        VolumeSpec {
            size: Extents::new(2.0, 1.0, 0.5),
            center,
            yaw,
        }
    }

    #[test]
    fn aabb_of_unrotated_box_matches_half_extents() {
        let v = box_at(Point3::new(1.0, 0.5, 0.0), 0.0);
        let bb = v.aabb();
        assert_relative_eq!(bb.min, Point3::new(0.0, 0.0, -0.25));
        assert_relative_eq!(bb.max, Point3::new(2.0, 1.0, 0.25));
    }

    #[test]
    fn negative_quarter_turn_maps_length_onto_z() {
        let v = box_at(Point3::origin(), -FRAC_PI_2);
        let bb = v.aabb();
        assert_relative_eq!(bb.max.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bb.max.x, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn vertical_ray_hits_top_face() {
        let v = box_at(Point3::new(0.0, 0.5, 0.0), 0.3);
        let hit = v.ray_distance(&Point3::new(0.0, 10.0, 0.0), &Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(hit.unwrap(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let v = box_at(Point3::new(0.0, 0.5, 0.0), 0.0);
        let hit = v.ray_distance(&Point3::new(0.0, 10.0, 0.0), &Vector3::new(0.0, 1.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let v = box_at(Point3::new(0.0, 0.5, 0.0), 0.0);
        let hit = v.ray_distance(&Point3::new(5.0, 10.0, 0.0), &Vector3::new(0.0, -1.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn nan_ray_misses() {
        let v = box_at(Point3::new(0.0, 0.5, 0.0), 0.0);
        let nan = Point3::new(f64::NAN, f64::NAN, f64::NAN);
        assert!(v.ray_distance(&nan, &Vector3::new(0.0, -1.0, 0.0)).is_none());
        assert!(v
            .ray_distance(&Point3::new(0.0, 10.0, 0.0), &Vector3::new(f64::NAN, -1.0, 0.0))
            .is_none());
    }

    #[test]
    fn footprint_has_four_ground_corners() {
        let v = box_at(Point3::new(0.0, 0.5, 0.0), 0.0);
        let fp = v.footprint();
        assert_relative_eq!(fp[0].0, -1.0);
        assert_relative_eq!(fp[0].1, -0.25);
        assert_relative_eq!(fp[2].0, 1.0);
        assert_relative_eq!(fp[2].1, 0.25);
    }
}
