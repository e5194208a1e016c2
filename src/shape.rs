//! Procedural wireframe geometry.
//!
//! A [`Shape`] is a tagged union over the model kinds a scene can contain.
//! Every variant lowers to the same wireframe representation through
//! [`Shape::to_vertex_edge_list`], which the pipeline consumes; dispatch
//! happens once per model, before any transform or clip work.

use std::f32::consts::TAU;

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A model's wireframe: homogeneous vertices plus edge polylines.
///
/// Each polyline is a sequence of indices into `vertices`; every
/// consecutive pair is one line segment. A closed loop repeats its first
/// index at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexEdgeList {
    pub vertices: Vec<Vec4>,
    pub edges: Vec<Vec<usize>>,
}

impl VertexEdgeList {
    /// Total number of drawable segments across all polylines.
    pub fn segment_count(&self) -> usize {
        self.edges
            .iter()
            .map(|polyline| polyline.len().saturating_sub(1))
            .sum()
    }
}

/// Geometry source for one model.
///
/// The parametric variants (`sides`, `slices`, `stacks`) assume at least 3
/// subdivisions; scene loading enforces this for untrusted input.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Explicit vertex/edge data, straight from a scene file.
    Generic {
        vertices: Vec<Vec4>,
        edges: Vec<Vec<usize>>,
    },
    /// Axis-aligned box around `center`.
    Cube {
        center: Vec3,
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Y-axis cylinder: two rings of `sides` vertices around `center`.
    Cylinder {
        center: Vec3,
        radius: f32,
        height: f32,
        sides: u32,
    },
    /// Y-axis cone: base ring at `center.y - height/2`, apex above.
    Cone {
        center: Vec3,
        radius: f32,
        height: f32,
        sides: u32,
    },
    /// Sphere as latitude rings and pole-to-pole longitude lines.
    Sphere {
        center: Vec3,
        radius: f32,
        slices: u32,
        stacks: u32,
    },
}

impl Shape {
    /// Lowers this shape to its wireframe.
    pub fn to_vertex_edge_list(&self) -> VertexEdgeList {
        match self {
            Shape::Generic { vertices, edges } => VertexEdgeList {
                vertices: vertices.clone(),
                edges: edges.clone(),
            },
            Shape::Cube {
                center,
                width,
                height,
                depth,
            } => cube(*center, *width, *height, *depth),
            Shape::Cylinder {
                center,
                radius,
                height,
                sides,
            } => cylinder(*center, *radius, *height, *sides),
            Shape::Cone {
                center,
                radius,
                height,
                sides,
            } => cone(*center, *radius, *height, *sides),
            Shape::Sphere {
                center,
                radius,
                slices,
                stacks,
            } => sphere(*center, *radius, *slices, *stacks),
        }
    }
}

fn cube(center: Vec3, width: f32, height: f32, depth: f32) -> VertexEdgeList {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let vertices = vec![
        // Bottom face, counter-clockwise seen from above.
        Vec4::point(center.x - hw, center.y - hh, center.z - hd),
        Vec4::point(center.x + hw, center.y - hh, center.z - hd),
        Vec4::point(center.x + hw, center.y - hh, center.z + hd),
        Vec4::point(center.x - hw, center.y - hh, center.z + hd),
        // Top face, same order.
        Vec4::point(center.x - hw, center.y + hh, center.z - hd),
        Vec4::point(center.x + hw, center.y + hh, center.z - hd),
        Vec4::point(center.x + hw, center.y + hh, center.z + hd),
        Vec4::point(center.x - hw, center.y + hh, center.z + hd),
    ];
    let edges = vec![
        vec![0, 1, 2, 3, 0],
        vec![4, 5, 6, 7, 4],
        vec![0, 4],
        vec![1, 5],
        vec![2, 6],
        vec![3, 7],
    ];
    VertexEdgeList { vertices, edges }
}

/// A closed ring of `sides` vertices in the y = `y` plane.
fn ring(center: Vec3, radius: f32, y: f32, sides: u32) -> Vec<Vec4> {
    (0..sides)
        .map(|i| {
            let theta = TAU * i as f32 / sides as f32;
            Vec4::point(
                center.x + radius * theta.cos(),
                y,
                center.z + radius * theta.sin(),
            )
        })
        .collect()
}

/// Indices `start..start+sides` closed back to `start`.
fn closed_loop(start: usize, sides: u32) -> Vec<usize> {
    let mut polyline: Vec<usize> = (start..start + sides as usize).collect();
    polyline.push(start);
    polyline
}

fn cylinder(center: Vec3, radius: f32, height: f32, sides: u32) -> VertexEdgeList {
    let mut vertices = ring(center, radius, center.y - height / 2.0, sides);
    vertices.extend(ring(center, radius, center.y + height / 2.0, sides));

    let mut edges = vec![closed_loop(0, sides), closed_loop(sides as usize, sides)];
    for i in 0..sides as usize {
        edges.push(vec![i, i + sides as usize]);
    }
    VertexEdgeList { vertices, edges }
}

fn cone(center: Vec3, radius: f32, height: f32, sides: u32) -> VertexEdgeList {
    let mut vertices = ring(center, radius, center.y - height / 2.0, sides);
    let apex = vertices.len();
    vertices.push(Vec4::point(center.x, center.y + height / 2.0, center.z));

    let mut edges = vec![closed_loop(0, sides)];
    for i in 0..sides as usize {
        edges.push(vec![i, apex]);
    }
    VertexEdgeList { vertices, edges }
}

fn sphere(center: Vec3, radius: f32, slices: u32, stacks: u32) -> VertexEdgeList {
    let mut vertices = Vec::new();
    // Interior latitude rings, south to north; poles are shared vertices.
    for i in 1..stacks {
        let phi = -std::f32::consts::FRAC_PI_2 + std::f32::consts::PI * i as f32 / stacks as f32;
        vertices.extend(ring(
            center,
            radius * phi.cos(),
            center.y + radius * phi.sin(),
            slices,
        ));
    }
    let south = vertices.len();
    vertices.push(Vec4::point(center.x, center.y - radius, center.z));
    let north = vertices.len();
    vertices.push(Vec4::point(center.x, center.y + radius, center.z));

    let mut edges = Vec::new();
    for i in 0..(stacks - 1) as usize {
        edges.push(closed_loop(i * slices as usize, slices));
    }
    for j in 0..slices as usize {
        let mut meridian = vec![south];
        for i in 0..(stacks - 1) as usize {
            meridian.push(i * slices as usize + j);
        }
        meridian.push(north);
        edges.push(meridian);
    }
    VertexEdgeList { vertices, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_indices_in_range(mesh: &VertexEdgeList) {
        for polyline in &mesh.edges {
            for &index in polyline {
                assert!(index < mesh.vertices.len());
            }
        }
    }

    #[test]
    fn cube_has_eight_vertices_and_twelve_segments() {
        let mesh = Shape::Cube {
            center: Vec3::ZERO,
            width: 2.0,
            height: 4.0,
            depth: 6.0,
        }
        .to_vertex_edge_list();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.segment_count(), 12);
        assert_indices_in_range(&mesh);
        // Extents match the half-sizes.
        assert_eq!(mesh.vertices[0], Vec4::point(-1.0, -2.0, -3.0));
        assert_eq!(mesh.vertices[6], Vec4::point(1.0, 2.0, 3.0));
    }

    #[test]
    fn cylinder_counts() {
        let mesh = Shape::Cylinder {
            center: Vec3::new(1.0, 0.0, -1.0),
            radius: 2.0,
            height: 2.0,
            sides: 8,
        }
        .to_vertex_edge_list();
        assert_eq!(mesh.vertices.len(), 16);
        // Two rings of 8 plus 8 wall lines.
        assert_eq!(mesh.segment_count(), 24);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn cylinder_ring_vertices_lie_on_the_radius() {
        let center = Vec3::new(1.0, 0.0, -1.0);
        let mesh = Shape::Cylinder {
            center,
            radius: 2.0,
            height: 2.0,
            sides: 12,
        }
        .to_vertex_edge_list();
        for v in &mesh.vertices {
            let dx = v.x - center.x;
            let dz = v.z - center.z;
            assert_relative_eq!((dx * dx + dz * dz).sqrt(), 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn cone_counts() {
        let mesh = Shape::Cone {
            center: Vec3::ZERO,
            radius: 1.0,
            height: 3.0,
            sides: 8,
        }
        .to_vertex_edge_list();
        assert_eq!(mesh.vertices.len(), 9);
        // Base ring of 8 plus 8 spokes to the apex.
        assert_eq!(mesh.segment_count(), 16);
        assert_eq!(mesh.vertices[8], Vec4::point(0.0, 1.5, 0.0));
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn sphere_counts() {
        let mesh = Shape::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            slices: 8,
            stacks: 4,
        }
        .to_vertex_edge_list();
        // Three interior rings of 8 plus the two poles.
        assert_eq!(mesh.vertices.len(), 26);
        // 3 rings * 8 segments + 8 meridians * 4 segments.
        assert_eq!(mesh.segment_count(), 56);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let center = Vec3::new(0.0, 2.0, 0.0);
        let mesh = Shape::Sphere {
            center,
            radius: 3.0,
            slices: 6,
            stacks: 5,
        }
        .to_vertex_edge_list();
        for v in &mesh.vertices {
            assert_relative_eq!((v.to_vec3() - center).magnitude(), 3.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn generic_passes_data_through() {
        let vertices = vec![Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 0.0, 0.0)];
        let edges = vec![vec![0, 1]];
        let mesh = Shape::Generic {
            vertices: vertices.clone(),
            edges: edges.clone(),
        }
        .to_vertex_edge_list();
        assert_eq!(mesh.vertices, vertices);
        assert_eq!(mesh.edges, edges);
    }
}
