use nalgebra::{Isometry3, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Height from which plan-view picking rays are cast.
const PLAN_RAY_HEIGHT: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Ray straight down onto the plan position `(x, z)`.
    #[must_use]
    pub fn vertical(x: f64, z: f64) -> Self {
        Self {
            origin: Point3::new(x, PLAN_RAY_HEIGHT, z),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    }
}

/// Perspective camera looking at a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::new(20.0, 20.0, 20.0),
            target: Point3::origin(),
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Why the camera cannot produce rays, if it cannot.
    #[must_use]
    pub fn problem(&self) -> Option<&'static str> {
        let finite = self.eye.iter().chain(self.target.iter()).all(|c| c.is_finite())
            && self.fov_degrees.is_finite()
            && self.near.is_finite()
            && self.far.is_finite();
        if !finite {
            return Some("camera values must be finite");
        }
        if (self.target - self.eye).norm() <= f64::EPSILON {
            return Some("eye and target coincide");
        }
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Some("fov_degrees must be between 0 and 180");
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Some("near must be positive and less than far");
        }
        None
    }

    /// Up vector for the view. Looking straight up or down, screen up is -Z
    /// so the view matches the plan.
    fn up(&self) -> Vector3<f64> {
        let forward = (self.target - self.eye).normalize();
        if forward.cross(&Vector3::y()).norm() < 1e-9 {
            -Vector3::z()
        } else {
            Vector3::y()
        }
    }

    /// World-space ray through the pixel `(x, y)` of a `width × height`
    /// viewport, `y` growing downward.
    ///
    /// Returns `None` for an empty or non-finite viewport, or when
    /// [`Camera::problem`] reports one.
    #[must_use]
    pub fn ray_from_screen(&self, x: f64, y: f64, width: f64, height: f64) -> Option<Ray> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return None;
        }
        if !(x.is_finite() && y.is_finite()) || self.problem().is_some() {
            return None;
        }
        let view = Isometry3::look_at_rh(&self.eye, &self.target, &self.up());
        let projection = Perspective3::new(
            width / height,
            self.fov_degrees.to_radians(),
            self.near,
            self.far,
        );

        let ndc_x = 2.0 * x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / height;
        let near = projection.unproject_point(&Point3::new(ndc_x, ndc_y, -1.0));
        let far = projection.unproject_point(&Point3::new(ndc_x, ndc_y, 1.0));

        let near = view.inverse_transform_point(&near);
        let far = view.inverse_transform_point(&far);
        let direction = (far - near).try_normalize(f64::EPSILON)?;
        Some(Ray {
            origin: near,
            direction,
        })
    }
}
