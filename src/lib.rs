//! A CPU wireframe 3D scene renderer.
//!
//! Implements the classical viewing pipeline: world-space geometry is
//! normalized into a canonical view volume (parallel box or perspective
//! pyramid), every edge is clipped against that volume with an outcode
//! clipper, survivors are projected onto the view plane and rasterized as
//! 2D line segments. SDL2 is used only for windowing and display; all
//! drawing happens on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use wiry::prelude::*;
//!
//! let scene = Scene::load("scenes/house.json")?;
//! let mut renderer = Renderer::new(800, 600);
//! render_scene(&scene.view, &scene.models, 800, 600, &mut renderer);
//! ```

pub mod camera;
pub mod clipper;
pub mod colors;
pub mod math;
pub mod model;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;
pub mod shape;
pub mod view;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use model::Model;
pub use pipeline::{render_scene, LineSink, RenderStats};
pub use scene::{Scene, SceneError};
pub use shape::Shape;
pub use view::{ClipBounds, ProjectionKind, ViewParameters};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use wiry::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{CameraController, CameraMove};

    // Pipeline
    pub use crate::pipeline::{render_scene, LineSink, RenderStats};

    // Scene
    pub use crate::model::Model;
    pub use crate::scene::{Scene, SceneError};
    pub use crate::shape::{Shape, VertexEdgeList};

    // View
    pub use crate::view::{ClipBounds, ProjectionKind, ViewParameters};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::Renderer;

    // Window & Input
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}
