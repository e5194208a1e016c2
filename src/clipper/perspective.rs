//! Line clipping against the perspective canonical volume
//! `x,y in [z,-z]`, `z in [-1, zmin]`.

use log::warn;

use super::{outcode_perspective, Line, Outcode, MAX_CLIPS};

/// Clips a line to the perspective canonical volume.
///
/// Returns the (possibly shortened) segment, or `None` when the line lies
/// entirely outside the volume. The endpoints are swapped whenever p0 is
/// the inside one, so the six intersection formulas below stay
/// directional; callers must not rely on endpoint order surviving.
/// Faces are tried in the fixed order LEFT, RIGHT, BOTTOM, TOP, FAR, NEAR.
pub fn clip_line(line: Line, z_min: f32) -> Option<Line> {
    let mut p0 = line.p0;
    let mut p1 = line.p1;
    let mut out0 = outcode_perspective(p0, z_min);
    let mut out1 = outcode_perspective(p1, z_min);

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

        // Keep the outside endpoint in p0.
        if out0.is_inside() {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut out0, &mut out1);
        }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let dz = p1.z - p0.z;

        // Intersection parameter with the first violated face's plane.
        // The x/y planes are x = +-z and y = +-z, so the deltas combine.
        let t = if out0.contains(Outcode::LEFT) {
            (-p0.x + p0.z) / (dx - dz)
        } else if out0.contains(Outcode::RIGHT) {
            (p0.x + p0.z) / (-dx - dz)
        } else if out0.contains(Outcode::BOTTOM) {
            (-p0.y + p0.z) / (dy - dz)
        } else if out0.contains(Outcode::TOP) {
            (p0.y + p0.z) / (-dy - dz)
        } else if out0.contains(Outcode::FAR) {
            (-p0.z - 1.0) / dz
        } else {
            (p0.z - z_min) / -dz
        };

        if !t.is_finite() {
            warn!("degenerate clip: non-finite intersection parameter, dropping segment");
            return None;
        }

        p0 = p0.lerp(p1, t);
        out0 = outcode_perspective(p0, z_min);
        out1 = outcode_perspective(p1, z_min);
    }

    warn!("line clipping failed to converge, dropping segment");
    None
}
