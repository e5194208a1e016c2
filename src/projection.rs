//! View-transform builders.
//!
//! Derives the matrices that normalize world space into a canonical view
//! volume, plus the fixed projection matrices that collapse that volume
//! onto a plane, and the viewport matrix that maps the projected plane to
//! device coordinates.
//!
//! Both normalizations follow the same five conceptual steps, composed
//! right-to-left so the first step touches the point first:
//!
//! 1. translate the PRP (eye) to the origin,
//! 2. rotate the view-reference basis (u, v, n) onto (x, y, z),
//! 3. shear so the direction of projection lies on the z-axis,
//! 4. (parallel only) translate the near plane to the origin,
//! 5. scale into the canonical bounds.
//!
//! Degenerate view bases are a precondition violation here, not a checked
//! error; untrusted parameters go through [`ViewParameters::validate`]
//! first.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::view::{ProjectionKind, ViewParameters};

/// Builds the canonical-volume normalization for `view.kind`.
pub fn view_transform(view: &ViewParameters) -> Mat4 {
    match view.kind {
        ProjectionKind::Parallel => parallel_view_transform(view),
        ProjectionKind::Perspective => perspective_view_transform(view),
    }
}

/// The fixed projection matrix paired with `kind`.
pub fn projection_transform(kind: ProjectionKind) -> Mat4 {
    match kind {
        ProjectionKind::Parallel => parallel_projection(),
        ProjectionKind::Perspective => perspective_projection(),
    }
}

/// Rotation aligning the view basis (u, v, n) with (x, y, z): basis
/// vectors as rows.
fn view_rotation(view: &ViewParameters) -> Mat4 {
    let (u, v, n) = view.view_basis();
    Mat4::new([
        [u.x, u.y, u.z, 0.0],
        [v.x, v.y, v.z, 0.0],
        [n.x, n.y, n.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Shear bringing the direction of projection (eye toward the clip-window
/// center) onto the z-axis.
fn dop_shear(view: &ViewParameters) -> Mat4 {
    let clip = &view.clip;
    let cw = Vec3::new(
        (clip.left + clip.right) / 2.0,
        (clip.bottom + clip.top) / 2.0,
        -clip.near,
    );
    // The eye sits at the origin after steps 1-2, so the DOP is cw itself.
    let dop = cw;
    Mat4::shear_xy(-dop.x / dop.z, -dop.y / dop.z)
}

/// Normalization into the parallel canonical volume
/// `x,y in [-1,1]`, `z in [-1,0]`.
///
/// The near plane lands on z = 0; the far plane lands on `near/far - 1`.
pub fn parallel_view_transform(view: &ViewParameters) -> Mat4 {
    let clip = &view.clip;
    let translate = Mat4::translation(-view.prp.x, -view.prp.y, -view.prp.z);
    let rotate = view_rotation(view);
    let shear = dop_shear(view);
    let translate_near = Mat4::translation(0.0, 0.0, clip.near);
    let scale = Mat4::scaling(
        2.0 / (clip.right - clip.left),
        2.0 / (clip.top - clip.bottom),
        1.0 / clip.far,
    );

    scale * translate_near * shear * rotate * translate
}

/// Normalization into the perspective canonical volume
/// `x,y in [z,-z]`, `z in [-1, zmin]` with `zmin = -near/far`.
pub fn perspective_view_transform(view: &ViewParameters) -> Mat4 {
    let clip = &view.clip;
    let translate = Mat4::translation(-view.prp.x, -view.prp.y, -view.prp.z);
    let rotate = view_rotation(view);
    let shear = dop_shear(view);
    let scale = Mat4::scaling(
        2.0 * clip.near / ((clip.right - clip.left) * clip.far),
        2.0 * clip.near / ((clip.top - clip.bottom) * clip.far),
        1.0 / clip.far,
    );

    scale * shear * rotate * translate
}

/// Orthographic collapse of the parallel canonical volume onto z = 0.
pub fn parallel_projection() -> Mat4 {
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Perspective collapse onto the z = -1 plane.
///
/// The bottom row sets w' = -z; the later homogeneous division by w'
/// performs the actual foreshortening.
pub fn perspective_projection() -> Mat4 {
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Maps the projected `[-1,1]` plane coordinates to device coordinates:
/// scale by the half-extents, translate by the same.
pub fn viewport_transform(width: u32, height: u32) -> Mat4 {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    Mat4::new([
        [half_w, 0.0, 0.0, half_w],
        [0.0, half_h, 0.0, half_h],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
