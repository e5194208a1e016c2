//! Line clipping against the parallel canonical volume
//! `x,y in [-1,1]`, `z in [-1,0]`.

use log::warn;

use super::{outcode_parallel, Line, Outcode, MAX_CLIPS};

/// Clips a line to the parallel canonical volume.
///
/// Returns the (possibly shortened) segment, or `None` when the line lies
/// entirely outside the volume. A fully-inside segment is returned
/// unchanged. When both endpoints are outside, the first endpoint is
/// clipped first; faces are tried in the fixed order LEFT, RIGHT, BOTTOM,
/// TOP, FAR, NEAR.
pub fn clip_line(line: Line) -> Option<Line> {
    let mut p0 = line.p0;
    let mut p1 = line.p1;
    let mut out0 = outcode_parallel(p0);
    let mut out1 = outcode_parallel(p1);

    // Each pass clears at least one face bit, so the loop is bounded by
    // the face count; the extra pass covers the final accept check.
    for _ in 0..=MAX_CLIPS {
        if (out0 | out1).is_inside() {
            return Some(Line::new(p0, p1));
        }
        if !(out0 & out1).is_inside() {
            // Both endpoints beyond the same face: provably outside.
            return None;
        }

        let clip_first = !out0.is_inside();
        let out = if clip_first { out0 } else { out1 };

        // Intersection parameter along p0 -> p1 with the first violated
        // face's plane, in priority order.
        let t = if out.contains(Outcode::LEFT) {
            (-1.0 - p0.x) / (p1.x - p0.x)
        } else if out.contains(Outcode::RIGHT) {
            (1.0 - p0.x) / (p1.x - p0.x)
        } else if out.contains(Outcode::BOTTOM) {
            (-1.0 - p0.y) / (p1.y - p0.y)
        } else if out.contains(Outcode::TOP) {
            (1.0 - p0.y) / (p1.y - p0.y)
        } else if out.contains(Outcode::FAR) {
            (-1.0 - p0.z) / (p1.z - p0.z)
        } else {
            (0.0 - p0.z) / (p1.z - p0.z)
        };

        if !t.is_finite() {
            warn!("degenerate clip: non-finite intersection parameter, dropping segment");
            return None;
        }

        let intersection = p0.lerp(p1, t);
        if clip_first {
            p0 = intersection;
            out0 = outcode_parallel(p0);
        } else {
            p1 = intersection;
            out1 = outcode_parallel(p1);
        }
    }

    warn!("line clipping failed to converge, dropping segment");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipper::CLIP_EPSILON;
    use crate::math::vec3::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn fully_inside_segment_is_returned_unchanged() {
        let line = Line::new(Vec3::new(-0.25, 0.125, -0.5), Vec3::new(0.75, -0.375, -0.875));
        let clipped = clip_line(line).unwrap();
        // Idempotence: coordinates come back bit-identical.
        assert_eq!(clipped, line);
    }

    #[test]
    fn segment_crossing_both_x_faces_is_shortened_to_the_box() {
        let line = Line::new(Vec3::new(-2.0, 0.0, -0.5), Vec3::new(2.0, 0.0, -0.5));
        let clipped = clip_line(line).unwrap();
        assert_relative_eq!(clipped.p0.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(clipped.p0.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clipped.p0.z, -0.5, epsilon = 1e-5);
        assert_relative_eq!(clipped.p1.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(clipped.p1.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clipped.p1.z, -0.5, epsilon = 1e-5);
    }

    #[test]
    fn segment_sharing_a_violated_face_is_rejected() {
        let line = Line::new(Vec3::new(1.5, -0.5, -0.5), Vec3::new(2.5, 0.5, -0.25));
        assert_eq!(clip_line(line), None);
    }

    #[test]
    fn diagonal_segment_with_no_shared_bits_fully_outside_is_rejected() {
        // One endpoint past LEFT, the other past TOP; the connecting line
        // still misses the box.
        let line = Line::new(Vec3::new(-3.0, 0.99, -0.5), Vec3::new(-0.99, 3.0, -0.5));
        assert_eq!(clip_line(line), None);
    }

    #[test]
    fn clipped_endpoint_lands_on_the_face_plane() {
        let line = Line::new(Vec3::new(0.0, 0.0, -0.5), Vec3::new(3.0, 0.3, -0.5));
        let clipped = clip_line(line).unwrap();
        assert!((clipped.p1.x - 1.0).abs() <= CLIP_EPSILON);
        assert_relative_eq!(clipped.p1.y, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn near_and_far_faces_clip_in_z() {
        let line = Line::new(Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.0, 0.0, -1.5));
        let clipped = clip_line(line).unwrap();
        assert_relative_eq!(clipped.p0.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clipped.p1.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn boundary_touching_segment_is_accepted() {
        // Endpoint exactly on the right face counts as inside.
        let line = Line::new(Vec3::new(1.0, 0.0, -0.5), Vec3::new(0.0, 0.0, -0.5));
        assert_eq!(clip_line(line), Some(line));
    }
}
