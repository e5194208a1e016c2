//! Scene description loading.
//!
//! Scenes are JSON documents with a `view` block (projection type, PRP,
//! SRP, VUP, clip bounds) and a `models` array. Deserialization goes
//! through private mirror structs so the core math types stay free of
//! format concerns, and everything is validated here — the pipeline and
//! the transform builders assume well-formed input.
//!
//! ```json
//! {
//!   "view": {
//!     "type": "perspective",
//!     "prp": [44, 20, -16],
//!     "srp": [20, 20, -40],
//!     "vup": [0, 1, 0],
//!     "clip": [-19, 5, -10, 8, 12, 100]
//!   },
//!   "models": [
//!     { "type": "cube", "center": [0, 0, -40], "width": 8, "height": 8, "depth": 8 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::model::Model;
use crate::shape::Shape;
use crate::view::{ClipBounds, ProjectionKind, ViewError, ViewParameters};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("model {model}: edge index {index} out of range for {vertex_count} vertices")]
    EdgeIndexOutOfRange {
        model: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("model {model}: a polyline needs at least two indices")]
    ShortPolyline { model: usize },
    #[error("model {model}: {field} must be at least {min}")]
    TooFewSubdivisions {
        model: usize,
        field: &'static str,
        min: u32,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    Parallel,
    Perspective,
}

#[derive(Deserialize)]
struct ViewSpec {
    #[serde(rename = "type")]
    kind: KindSpec,
    prp: [f32; 3],
    srp: [f32; 3],
    vup: [f32; 3],
    clip: [f32; 6],
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ModelSpec {
    Generic {
        vertices: Vec<[f32; 3]>,
        edges: Vec<Vec<usize>>,
    },
    Cube {
        center: [f32; 3],
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        center: [f32; 3],
        radius: f32,
        height: f32,
        sides: u32,
    },
    Cone {
        center: [f32; 3],
        radius: f32,
        height: f32,
        sides: u32,
    },
    Sphere {
        center: [f32; 3],
        radius: f32,
        slices: u32,
        stacks: u32,
    },
}

#[derive(Deserialize)]
struct SceneSpec {
    view: ViewSpec,
    models: Vec<ModelSpec>,
}

/// A validated scene: the pipeline can consume it without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub view: ViewParameters,
    pub models: Vec<Model>,
}

impl Scene {
    /// Loads and validates a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let scene = Self::from_json(&text)?;
        info!(
            "loaded scene {} ({} models)",
            path.display(),
            scene.models.len()
        );
        Ok(scene)
    }

    /// Parses and validates a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let spec: SceneSpec = serde_json::from_str(text)?;

        let view = ViewParameters::new(
            vec3(spec.view.prp),
            vec3(spec.view.srp),
            vec3(spec.view.vup),
            ClipBounds::from_array(spec.view.clip),
            match spec.view.kind {
                KindSpec::Parallel => ProjectionKind::Parallel,
                KindSpec::Perspective => ProjectionKind::Perspective,
            },
        );
        view.validate()?;

        let models = spec
            .models
            .into_iter()
            .enumerate()
            .map(|(index, model)| convert_model(index, model))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { view, models })
    }
}

fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

fn convert_model(index: usize, spec: ModelSpec) -> Result<Model, SceneError> {
    let shape = match spec {
        ModelSpec::Generic { vertices, edges } => {
            for polyline in &edges {
                if polyline.len() < 2 {
                    return Err(SceneError::ShortPolyline { model: index });
                }
                for &vertex_index in polyline {
                    if vertex_index >= vertices.len() {
                        return Err(SceneError::EdgeIndexOutOfRange {
                            model: index,
                            index: vertex_index,
                            vertex_count: vertices.len(),
                        });
                    }
                }
            }
            Shape::Generic {
                vertices: vertices
                    .into_iter()
                    .map(|[x, y, z]| Vec4::point(x, y, z))
                    .collect(),
                edges,
            }
        }
        ModelSpec::Cube {
            center,
            width,
            height,
            depth,
        } => Shape::Cube {
            center: vec3(center),
            width,
            height,
            depth,
        },
        ModelSpec::Cylinder {
            center,
            radius,
            height,
            sides,
        } => {
            require_subdivisions(index, "sides", sides, 3)?;
            Shape::Cylinder {
                center: vec3(center),
                radius,
                height,
                sides,
            }
        }
        ModelSpec::Cone {
            center,
            radius,
            height,
            sides,
        } => {
            require_subdivisions(index, "sides", sides, 3)?;
            Shape::Cone {
                center: vec3(center),
                radius,
                height,
                sides,
            }
        }
        ModelSpec::Sphere {
            center,
            radius,
            slices,
            stacks,
        } => {
            require_subdivisions(index, "slices", slices, 3)?;
            require_subdivisions(index, "stacks", stacks, 2)?;
            Shape::Sphere {
                center: vec3(center),
                radius,
                slices,
                stacks,
            }
        }
    };
    Ok(Model::new(shape))
}

fn require_subdivisions(
    model: usize,
    field: &'static str,
    value: u32,
    min: u32,
) -> Result<(), SceneError> {
    if value < min {
        return Err(SceneError::TooFewSubdivisions { model, field, min });
    }
    Ok(())
}
