//! # mesh_view
//!
//! Load a triangle mesh from an STL file and draw it, flat-shaded and
//! depth-tested, into a packed `0xAARRGGBB` pixel buffer.  There is no
//! window here; the application crate blits the buffer wherever it likes.
//!
//! ```rust
//! use mesh_view::{Actor, Canvas, Mesh, Scene};
//!
//! let mut scene = Scene::new(Actor::new(Mesh::cube(1.0)));
//! scene.actor_mut().rotate_x(30.0);
//! scene.actor_mut().rotate_y(45.0);
//! scene.actor_mut().set_uniform_scale(1.5);
//!
//! let mut canvas = Canvas::new(320, 240);
//! scene.render(&mut canvas);
//! assert_ne!(canvas.pixel(160, 120), scene.background());
//! ```

pub mod error;
pub mod mesh;
pub mod stl;
pub mod actor;
pub mod camera;
pub mod raster;
pub mod scene;

pub use error::MeshError;
pub use mesh::{Mesh, Triangle};
pub use actor::Actor;
pub use camera::ViewCamera;
pub use raster::Canvas;
pub use scene::{Scene, BACKGROUND};
