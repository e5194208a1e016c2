//! The per-frame rendering pipeline.
//!
//! For each model: transform every homogeneous vertex into the canonical
//! view volume, clip each consecutive pair of every edge polyline, project
//! the survivors onto the view plane, map them to device coordinates, and
//! hand the resulting 2D segments to a [`LineSink`].
//!
//! The pipeline is a pure function of its inputs: it reads the
//! [`ViewParameters`] snapshot it was given and owns no state across
//! frames. Camera mutation happens strictly between frames, outside this
//! module.

use log::debug;

use crate::clipper::{parallel, perspective, Line};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::model::Model;
use crate::projection;
use crate::view::{ProjectionKind, ViewParameters};

/// External rasterizer seam: receives device-space segments.
///
/// The sink owns stroke styling; the pipeline only decides *which*
/// segments exist.
pub trait LineSink {
    fn draw_line(&mut self, from: Vec2, to: Vec2);
}

/// Per-frame clipping tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Edge segments fed to the clipper.
    pub edges: usize,
    /// Segments that survived (possibly shortened) and were drawn.
    pub drawn: usize,
    /// Segments fully outside the view volume.
    pub rejected: usize,
}

/// Renders one frame of `models` through `view` into `sink`.
///
/// `width`/`height` are the device viewport extents in pixels.
pub fn render_scene<S: LineSink>(
    view: &ViewParameters,
    models: &[Model],
    width: u32,
    height: u32,
    sink: &mut S,
) -> RenderStats {
    let normalize = projection::view_transform(view);
    // Projection and viewport never change per segment; compose them once.
    let to_device =
        projection::viewport_transform(width, height) * projection::projection_transform(view.kind);
    let z_min = view.z_min();

    let mut stats = RenderStats::default();

    for (index, model) in models.iter().enumerate() {
        let mesh = model.shape().to_vertex_edge_list();
        let model_to_canonical = normalize * model.matrix();

        // Affine normalization keeps w = 1, so dropping w here is exact.
        let vertices: Vec<Vec3> = mesh
            .vertices
            .iter()
            .map(|&vertex| (model_to_canonical * vertex).to_vec3())
            .collect();

        let before = stats;
        for polyline in &mesh.edges {
            for pair in polyline.windows(2) {
                stats.edges += 1;
                let line = Line::new(vertices[pair[0]], vertices[pair[1]]);

                let clipped = match view.kind {
                    ProjectionKind::Parallel => parallel::clip_line(line),
                    ProjectionKind::Perspective => perspective::clip_line(line, z_min),
                };
                let Some(segment) = clipped else {
                    stats.rejected += 1;
                    continue;
                };

                // Re-homogenize, project, then divide by w to reach
                // device Cartesian coordinates.
                let from = (to_device * Vec4::from(segment.p0)).to_vec3_homogeneous();
                let to = (to_device * Vec4::from(segment.p1)).to_vec3_homogeneous();
                sink.draw_line(Vec2::new(from.x, from.y), Vec2::new(to.x, to.y));
                stats.drawn += 1;
            }
        }
        debug!(
            "model {index}: {} of {} edges drawn",
            stats.drawn - before.drawn,
            stats.edges - before.edges
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::view::ClipBounds;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct CollectingSink {
        segments: Vec<(Vec2, Vec2)>,
    }

    impl LineSink for CollectingSink {
        fn draw_line(&mut self, from: Vec2, to: Vec2) {
            self.segments.push((from, to));
        }
    }

    fn generic_model(vertices: Vec<Vec4>, edges: Vec<Vec<usize>>) -> Model {
        Model::new(Shape::Generic { vertices, edges })
    }

    fn parallel_view() -> ViewParameters {
        ViewParameters::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::UP,
            ClipBounds::new(-2.0, 2.0, -2.0, 2.0, 1.0, 10.0),
            ProjectionKind::Parallel,
        )
    }

    fn perspective_view() -> ViewParameters {
        ViewParameters::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::UP,
            ClipBounds::new(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0),
            ProjectionKind::Perspective,
        )
    }

    #[test]
    fn parallel_segment_reaches_device_coordinates() {
        let model = generic_model(
            vec![Vec4::point(-1.0, 0.0, -2.0), Vec4::point(1.0, 0.0, -2.0)],
            vec![vec![0, 1]],
        );
        let mut sink = CollectingSink::default();
        let stats = render_scene(&parallel_view(), &[model], 100, 100, &mut sink);

        assert_eq!(stats, RenderStats { edges: 1, drawn: 1, rejected: 0 });
        let (from, to) = sink.segments[0];
        assert_relative_eq!(from.x, 25.0, epsilon = 1e-3);
        assert_relative_eq!(from.y, 50.0, epsilon = 1e-3);
        assert_relative_eq!(to.x, 75.0, epsilon = 1e-3);
        assert_relative_eq!(to.y, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn rejected_edges_are_skipped_not_drawn() {
        let model = generic_model(
            vec![
                Vec4::point(-1.0, 0.0, -2.0),
                Vec4::point(1.0, 0.0, -2.0),
                Vec4::point(30.0, 0.0, -2.0),
                Vec4::point(40.0, 0.0, -2.0),
            ],
            vec![vec![0, 1], vec![2, 3]],
        );
        let mut sink = CollectingSink::default();
        let stats = render_scene(&parallel_view(), &[model], 100, 100, &mut sink);

        assert_eq!(stats, RenderStats { edges: 2, drawn: 1, rejected: 1 });
        assert_eq!(sink.segments.len(), 1);
    }

    #[test]
    fn perspective_divide_foreshortens() {
        let model = generic_model(
            vec![Vec4::point(0.0, 0.0, -5.0), Vec4::point(0.0, 5.0, -5.0)],
            vec![vec![0, 1]],
        );
        let mut sink = CollectingSink::default();
        let stats = render_scene(&perspective_view(), &[model], 100, 100, &mut sink);

        assert_eq!(stats.drawn, 1);
        let (from, to) = sink.segments[0];
        assert_relative_eq!(from.x, 50.0, epsilon = 1e-3);
        assert_relative_eq!(from.y, 50.0, epsilon = 1e-3);
        // (0, 5, -5) sits on the top edge of the view window.
        assert_relative_eq!(to.x, 50.0, epsilon = 1e-3);
        assert_relative_eq!(to.y, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn polylines_clip_each_consecutive_pair_independently() {
        // A three-point polyline whose middle vertex is outside: the first
        // pair is shortened, the second clipped on re-entry.
        let model = generic_model(
            vec![
                Vec4::point(0.0, 0.0, -2.0),
                Vec4::point(10.0, 0.0, -2.0),
                Vec4::point(0.0, 1.0, -2.0),
            ],
            vec![vec![0, 1, 2]],
        );
        let mut sink = CollectingSink::default();
        let stats = render_scene(&parallel_view(), &[model], 100, 100, &mut sink);

        assert_eq!(stats, RenderStats { edges: 2, drawn: 2, rejected: 0 });
        // Both shortened segments stop at the right face x = +1 (device 100).
        assert_relative_eq!(sink.segments[0].1.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(sink.segments[1].0.x, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn per_model_matrix_composes_with_the_view_transform() {
        let model = generic_model(
            vec![Vec4::point(-1.0, 0.0, 0.0), Vec4::point(1.0, 0.0, 0.0)],
            vec![vec![0, 1]],
        )
        .with_matrix(crate::math::mat4::Mat4::translation(0.0, 0.0, -2.0));
        let mut sink = CollectingSink::default();
        let stats = render_scene(&parallel_view(), &[model], 100, 100, &mut sink);

        assert_eq!(stats.drawn, 1);
        let (from, to) = sink.segments[0];
        assert_relative_eq!(from.x, 25.0, epsilon = 1e-3);
        assert_relative_eq!(to.x, 75.0, epsilon = 1e-3);
    }
}
