//! A mesh placed in the scene: orientation and uniform scale about its centre.

use glam::{Mat4, Quat, Vec3};

use crate::mesh::Mesh;

#[derive(Clone, Debug)]
pub struct Actor {
    mesh:        Mesh,
    orientation: Quat,
    scale:       f32,
    /// Mesh-space point that sits at the world origin.
    pivot:       Vec3,
}

impl Actor {
    pub fn new(mesh: Mesh) -> Self {
        let pivot = mesh.center();
        Actor { mesh, orientation: Quat::IDENTITY, scale: 1.0, pivot }
    }

    /// Rotate about the actor's own X axis.  Rotations accumulate.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.rotate(Quat::from_rotation_x(degrees.to_radians()));
    }

    /// Rotate about the actor's own Y axis.  Rotations accumulate.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.rotate(Quat::from_rotation_y(degrees.to_radians()));
    }

    fn rotate(&mut self, q: Quat) {
        // Renormalize so long sessions do not drift.
        self.orientation = (self.orientation * q).normalize();
    }

    /// Replace (not multiply) the uniform scale.
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = s;
    }

    pub fn orientation(&self) -> Quat { self.orientation }
    pub fn scale(&self)       -> f32  { self.scale }
    pub fn pivot(&self)       -> Vec3 { self.pivot }
    pub fn mesh(&self)        -> &Mesh { &self.mesh }

    /// Mesh space to world space: recentre, scale, rotate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
            * Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_translation(-self.pivot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    fn offset_cube(offset: Vec3) -> Mesh {
        let triangles = Mesh::cube(2.0)
            .triangles
            .iter()
            .map(|t| Triangle::new(t.normal, t.vertices.map(|v| v + offset)))
            .collect();
        Mesh::new(triangles).unwrap()
    }

    #[test]
    fn pivot_is_mesh_center() {
        let a = Actor::new(offset_cube(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(a.pivot(), Vec3::new(10.0, 0.0, 0.0));
        assert!(close(a.model_matrix().transform_point3(a.pivot()), Vec3::ZERO));
    }

    #[test]
    fn rotate_x_turns_y_toward_z() {
        let mut a = Actor::new(Mesh::cube(2.0));
        a.rotate_x(90.0);
        assert!(close(a.orientation() * Vec3::Y, Vec3::Z));
    }

    #[test]
    fn rotations_accumulate_in_local_frame() {
        let mut a = Actor::new(Mesh::cube(2.0));
        a.rotate_y(90.0);
        a.rotate_x(90.0);
        // Local X now points along world -Z; rotating about it takes local Y to world X.
        assert!(close(a.orientation() * Vec3::Y, Vec3::X));
    }

    #[test]
    fn scale_replaces_rather_than_compounds() {
        let mut a = Actor::new(Mesh::cube(2.0));
        a.set_uniform_scale(2.0);
        a.set_uniform_scale(1.5);
        assert_eq!(a.scale(), 1.5);
        assert!(close(a.model_matrix().transform_point3(Vec3::X), Vec3::new(1.5, 0.0, 0.0)));
    }
}
