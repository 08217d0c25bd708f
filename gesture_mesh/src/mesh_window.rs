//! The 3D view: a [`Scene`] rasterized into its own `minifb` window.

use minifb::{Window, WindowOptions};

use mesh_view::{Actor, Canvas, Mesh, Scene};

use crate::error::{Error, Result};

/// Receives transform commands and redraws the mesh.
pub trait MeshRenderer {
    /// Relative rotation about the mesh's own X axis.
    fn rotate_x(&mut self, degrees: f32);
    /// Relative rotation about the mesh's own Y axis.
    fn rotate_y(&mut self, degrees: f32);
    /// Absolute uniform scale.
    fn set_uniform_scale(&mut self, factor: f32);
    fn render(&mut self) -> Result<()>;

    /// False once the user has closed the view.
    fn is_open(&self) -> bool { true }
}

pub struct MeshWindow {
    window: Window,
    canvas: Canvas,
    scene:  Scene,
}

impl MeshWindow {
    pub fn new(title: &str, mesh: Mesh, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::Window(e.to_string()))?;
        window.limit_update_rate(None);
        log::info!("Opened mesh window {}x{}", width, height);
        Ok(MeshWindow {
            window,
            canvas: Canvas::new(width, height),
            scene:  Scene::new(Actor::new(mesh)),
        })
    }

    pub fn scene(&self) -> &Scene { &self.scene }
}

impl MeshRenderer for MeshWindow {
    fn rotate_x(&mut self, degrees: f32) {
        self.scene.actor_mut().rotate_x(degrees);
    }

    fn rotate_y(&mut self, degrees: f32) {
        self.scene.actor_mut().rotate_y(degrees);
    }

    fn set_uniform_scale(&mut self, factor: f32) {
        self.scene.actor_mut().set_uniform_scale(factor);
    }

    fn render(&mut self) -> Result<()> {
        let started = std::time::Instant::now();
        self.scene.render(&mut self.canvas);
        self.window
            .update_with_buffer(self.canvas.pixels(), self.canvas.width(), self.canvas.height())
            .map_err(|e| Error::Window(e.to_string()))?;
        log::trace!("Mesh frame in {:?}", started.elapsed());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}
