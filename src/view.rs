//! Camera / view-volume parameters.
//!
//! [`ViewParameters`] is the single source of truth for one frame's view:
//! the projection reference point (eye), the scene reference point it looks
//! at, the view-up hint, the six clip-volume bounds, and the projection
//! kind. The pipeline receives it as an immutable snapshot per frame;
//! input handling mutates it only between frames.

use thiserror::Error;

use crate::math::vec3::Vec3;

/// How close to parallel the up hint may be to the view direction before
/// the view basis is considered degenerate.
const DEGENERATE_BASIS_EPSILON: f32 = 1e-6;

/// Projection mode of the canonical view volume.
///
/// Parallel normalizes into the box `x,y in [-1,1]`, `z in [-1,0]`;
/// perspective into the truncated pyramid `x,y in [z,-z]`, `z in [-1, zmin]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    Parallel,
    Perspective,
}

/// The six bounds of the view window and depth range.
///
/// `left/right/bottom/top` describe the clip window on the near plane in
/// view coordinates; `near/far` are signed distances along the negated
/// view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ClipBounds {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Bounds from a `[left, right, bottom, top, near, far]` array, the
    /// order used by scene files.
    pub const fn from_array(clip: [f32; 6]) -> Self {
        Self::new(clip[0], clip[1], clip[2], clip[3], clip[4], clip[5])
    }
}

/// Invalid view configuration the caller must prevent before building
/// view transforms.
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    /// The up hint is (nearly) parallel to the view direction, so the
    /// view basis u = vup x n collapses.
    #[error("view-up vector is parallel to the view direction")]
    DegenerateBasis,
    /// Clip bounds do not describe a volume (zero-area window or a depth
    /// range with near >= far).
    #[error("invalid clip bounds: {0}")]
    InvalidClipBounds(&'static str),
}

/// One frame's complete view description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParameters {
    /// Projection reference point: the eye position.
    pub prp: Vec3,
    /// Scene reference point: the look-at target.
    pub srp: Vec3,
    /// View-up hint; must not be parallel to `prp - srp`.
    pub vup: Vec3,
    pub clip: ClipBounds,
    pub kind: ProjectionKind,
}

impl ViewParameters {
    pub const fn new(
        prp: Vec3,
        srp: Vec3,
        vup: Vec3,
        clip: ClipBounds,
        kind: ProjectionKind,
    ) -> Self {
        Self {
            prp,
            srp,
            vup,
            clip,
            kind,
        }
    }

    /// The view-reference-coordinate basis (u, v, n).
    ///
    /// `n` points from the scene toward the eye, `u` spans the window
    /// horizontally, `v` completes the right-handed basis. Precondition:
    /// the view is non-degenerate (`validate` passed).
    pub fn view_basis(&self) -> (Vec3, Vec3, Vec3) {
        let n = (self.prp - self.srp).normalize();
        let u = self.vup.cross(n).normalize();
        let v = n.cross(u);
        (u, v, n)
    }

    /// Near-plane z bound of the canonical perspective volume.
    pub fn z_min(&self) -> f32 {
        -self.clip.near / self.clip.far
    }

    /// Checks the preconditions the transform builders assume.
    ///
    /// The builders themselves do not re-check; scene loading and any
    /// other untrusted source of view parameters must call this first.
    pub fn validate(&self) -> Result<(), ViewError> {
        let clip = &self.clip;
        if clip.near >= clip.far {
            return Err(ViewError::InvalidClipBounds("near must be less than far"));
        }
        if clip.left == clip.right {
            return Err(ViewError::InvalidClipBounds("left equals right"));
        }
        if clip.bottom == clip.top {
            return Err(ViewError::InvalidClipBounds("bottom equals top"));
        }

        let view_dir = self.prp - self.srp;
        if view_dir.magnitude() < DEGENERATE_BASIS_EPSILON {
            return Err(ViewError::DegenerateBasis);
        }
        if self.vup.cross(view_dir.normalize()).magnitude() < DEGENERATE_BASIS_EPSILON {
            return Err(ViewError::DegenerateBasis);
        }
        Ok(())
    }
}
