//! One actor, one camera, one light.

use glam::Vec3;

use crate::actor::Actor;
use crate::camera::ViewCamera;
use crate::raster::{shade, Canvas};

/// Dark grey, 0.1 in each channel.
pub const BACKGROUND: u32 = 0xFF1A_1A1A;

/// Light grey surface colour.
pub const SURFACE: u32 = 0xFFE6_E6E6;

const AMBIENT: f32 = 0.15;

pub struct Scene {
    actor:      Actor,
    camera:     ViewCamera,
    background: u32,
    surface:    u32,
}

impl Scene {
    /// Frame the actor's mesh with a camera fitted to its bounding sphere.
    pub fn new(actor: Actor) -> Self {
        let camera = ViewCamera::fit(actor.mesh().radius());
        log::debug!(
            "Scene: {} triangles, camera at distance {:.3}",
            actor.mesh().triangle_count(),
            camera.distance()
        );
        Scene { actor, camera, background: BACKGROUND, surface: SURFACE }
    }

    pub fn actor(&self)         -> &Actor     { &self.actor }
    pub fn actor_mut(&mut self) -> &mut Actor { &mut self.actor }
    pub fn camera(&self)        -> &ViewCamera { &self.camera }
    pub fn background(&self)    -> u32        { self.background }

    /// Draw the actor into `canvas`, replacing its previous contents.
    ///
    /// Lighting is a headlight: intensity follows the angle between the face
    /// normal and the view axis, and back faces are lit like front faces so
    /// open or inconsistently wound meshes still read correctly.
    pub fn render(&self, canvas: &mut Canvas) {
        canvas.clear(self.background);

        let model = self.actor.model_matrix();
        let mvp = self.camera.view_projection(canvas.aspect()) * model;
        let orientation = self.actor.orientation();
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);

        let mut drawn = 0usize;
        for tri in &self.actor.mesh().triangles {
            let mut screen = [Vec3::ZERO; 3];
            let mut behind = false;
            for (out, v) in screen.iter_mut().zip(tri.vertices.iter()) {
                let clip = mvp * v.extend(1.0);
                if clip.w <= 1e-6 {
                    behind = true;
                    break;
                }
                let ndc = clip.truncate() / clip.w;
                *out = Vec3::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h, ndc.z);
            }
            if behind {
                continue;
            }

            let n = orientation * tri.normal;
            let k = AMBIENT + (1.0 - AMBIENT) * n.dot(Vec3::Z).abs();
            canvas.fill_triangle(screen, shade(self.surface, k));
            drawn += 1;
        }
        log::trace!("Rendered {} triangles", drawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    fn covered(scene: &Scene, canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&p| p != scene.background()).count()
    }

    fn row_width(scene: &Scene, canvas: &Canvas, y: usize) -> usize {
        (0..canvas.width()).filter(|&x| canvas.pixel(x, y) != scene.background()).count()
    }

    #[test]
    fn cube_fills_the_centre_and_leaves_corners() {
        let scene = Scene::new(Actor::new(Mesh::cube(1.0)));
        let mut canvas = Canvas::new(160, 120);
        scene.render(&mut canvas);
        assert_ne!(canvas.pixel(80, 60), BACKGROUND);
        assert_eq!(canvas.pixel(0, 0), BACKGROUND);
        assert_eq!(canvas.pixel(159, 119), BACKGROUND);
    }

    #[test]
    fn face_toward_camera_is_fully_lit() {
        let scene = Scene::new(Actor::new(Mesh::cube(1.0)));
        let mut canvas = Canvas::new(160, 120);
        scene.render(&mut canvas);
        assert_eq!(canvas.pixel(80, 60), SURFACE);
    }

    #[test]
    fn larger_scale_covers_more() {
        let mut scene = Scene::new(Actor::new(Mesh::cube(1.0)));
        let mut canvas = Canvas::new(160, 120);
        scene.render(&mut canvas);
        let base = covered(&scene, &canvas);

        scene.actor_mut().set_uniform_scale(1.5);
        scene.render(&mut canvas);
        assert!(covered(&scene, &canvas) > base);

        scene.actor_mut().set_uniform_scale(0.5);
        scene.render(&mut canvas);
        assert!(covered(&scene, &canvas) < base);
    }

    #[test]
    fn yaw_widens_the_silhouette() {
        let mut scene = Scene::new(Actor::new(Mesh::cube(1.0)));
        let mut canvas = Canvas::new(160, 120);
        scene.render(&mut canvas);
        let square = row_width(&scene, &canvas, 60);

        scene.actor_mut().rotate_y(45.0);
        scene.render(&mut canvas);
        assert!(row_width(&scene, &canvas, 60) > square);
        // Shading changed with the face angle.
        assert_ne!(canvas.pixel(80, 60), SURFACE);
    }

    #[test]
    fn render_clears_previous_frame() {
        let mut scene = Scene::new(Actor::new(Mesh::cube(1.0)));
        let mut canvas = Canvas::new(160, 120);
        scene.render(&mut canvas);
        assert_ne!(canvas.pixel(60, 60), BACKGROUND);
        scene.actor_mut().set_uniform_scale(0.2);
        scene.render(&mut canvas);
        assert_eq!(canvas.pixel(60, 60), BACKGROUND);
    }
}
