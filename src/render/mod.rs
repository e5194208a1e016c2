//! CPU rasterization of device-space segments.

mod renderer;

pub use renderer::{Renderer, SnapshotError};
