use glam::{Mat4, Vec3};

/// Vertical field of view, degrees.
pub const DEFAULT_FOV_Y: f32 = 30.0;

/// Fixed perspective camera on the +Z axis looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    pub eye:      Vec3,
    pub fov_y:    f32,
    pub near:     f32,
    pub far:      f32,
}

impl ViewCamera {
    /// Place the camera so a sphere of `radius` at the origin just fills the
    /// vertical field of view.  The far plane leaves room for the object to
    /// grow several times before it is clipped.
    pub fn fit(radius: f32) -> Self {
        let radius = radius.max(f32::EPSILON);
        let distance = radius / (DEFAULT_FOV_Y.to_radians() * 0.5).sin();
        ViewCamera {
            eye:   Vec3::new(0.0, 0.0, distance),
            fov_y: DEFAULT_FOV_Y,
            near:  distance * 0.01,
            far:   distance + radius * 4.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.eye.length()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_sphere_touches_the_frustum() {
        let cam = ViewCamera::fit(2.0);
        let vp = cam.view_projection(1.0);
        // The upper frustum plane, tangent to the sphere, crosses y = r / cos(fov/2) at z = 0.
        let half = cam.fov_y.to_radians() * 0.5;
        let top = vp.project_point3(Vec3::Y * 2.0 / half.cos());
        assert!((top.y - 1.0).abs() < 1e-4, "{}", top.y);
    }

    #[test]
    fn origin_projects_to_centre_inside_depth_range() {
        let cam = ViewCamera::fit(1.0);
        let p = cam.view_projection(4.0 / 3.0).project_point3(Vec3::ZERO);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!(p.z > 0.0 && p.z < 1.0);
    }
}
