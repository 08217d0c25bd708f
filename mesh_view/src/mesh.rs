//! Triangle soup mesh.

use std::path::Path;

use glam::Vec3;

use crate::error::MeshError;
use crate::stl;

// ════════════════════════════════════════════════════════════════════════════
// Triangle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Unit outward normal.
    pub normal:   Vec3,
    pub vertices: [Vec3; 3],
}

impl Triangle {
    /// Build a triangle, deriving the normal from the winding when the
    /// supplied one is missing (all zeros in many STL exporters).
    pub fn new(normal: Vec3, vertices: [Vec3; 3]) -> Self {
        let normal = if normal.length_squared() > 1e-12 {
            normal.normalize()
        } else {
            Self::winding_normal(&vertices)
        };
        Triangle { normal, vertices }
    }

    fn winding_normal(v: &[Vec3; 3]) -> Vec3 {
        (v[1] - v[0]).cross(v[2] - v[0]).normalize_or_zero()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mesh
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Wrap triangles; an empty list is rejected.
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        if triangles.is_empty() {
            return Err(MeshError::Empty);
        }
        Ok(Mesh { triangles })
    }

    /// Read an STL file (binary or ASCII).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| MeshError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mesh = Mesh::new(stl::parse(&bytes)?)?;
        log::info!("Loaded {:?}: {} triangles", path, mesh.triangle_count());
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize { self.triangles.len() }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }

    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Radius of the sphere around [`center`](Self::center) enclosing the bounds.
    pub fn radius(&self) -> f32 {
        let (min, max) = self.bounds();
        (max - min).length() * 0.5
    }

    /// Axis-aligned cube of edge `size` centred on the origin.
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let c = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);
        // Each face as a quad, counter-clockwise seen from outside.
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::X,     [c( 1.,-1.,-1.), c( 1., 1.,-1.), c( 1., 1., 1.), c( 1.,-1., 1.)]),
            (Vec3::NEG_X, [c(-1.,-1.,-1.), c(-1.,-1., 1.), c(-1., 1., 1.), c(-1., 1.,-1.)]),
            (Vec3::Y,     [c(-1., 1.,-1.), c(-1., 1., 1.), c( 1., 1., 1.), c( 1., 1.,-1.)]),
            (Vec3::NEG_Y, [c(-1.,-1.,-1.), c( 1.,-1.,-1.), c( 1.,-1., 1.), c(-1.,-1., 1.)]),
            (Vec3::Z,     [c(-1.,-1., 1.), c( 1.,-1., 1.), c( 1., 1., 1.), c(-1., 1., 1.)]),
            (Vec3::NEG_Z, [c(-1.,-1.,-1.), c(-1., 1.,-1.), c( 1., 1.,-1.), c( 1.,-1.,-1.)]),
        ];
        let triangles = faces
            .iter()
            .flat_map(|&(n, q)| [Triangle::new(n, [q[0], q[1], q[2]]), Triangle::new(n, [q[0], q[2], q[3]])])
            .collect();
        Mesh { triangles }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_outward_triangles() {
        let m = Mesh::cube(2.0);
        assert_eq!(m.triangle_count(), 12);
        for t in &m.triangles {
            let centroid = (t.vertices[0] + t.vertices[1] + t.vertices[2]) / 3.0;
            assert!(t.normal.dot(centroid) > 0.0);
            // Winding agrees with the stated normal.
            let w = (t.vertices[1] - t.vertices[0]).cross(t.vertices[2] - t.vertices[0]);
            assert!(w.dot(t.normal) > 0.0);
        }
    }

    #[test]
    fn cube_bounds_and_radius() {
        let m = Mesh::cube(2.0);
        assert_eq!(m.bounds(), (Vec3::splat(-1.0), Vec3::splat(1.0)));
        assert_eq!(m.center(), Vec3::ZERO);
        assert!((m.radius() - 3.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn missing_normal_is_derived_from_winding() {
        let t = Triangle::new(Vec3::ZERO, [Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(t.normal, Vec3::Z);
    }

    #[test]
    fn empty_mesh_rejected() {
        assert!(matches!(Mesh::new(Vec::new()), Err(MeshError::Empty)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Mesh::load("definitely/not/here.stl").unwrap_err();
        assert!(matches!(err, MeshError::Io { .. }));
        assert!(err.to_string().contains("here.stl"));
    }
}
