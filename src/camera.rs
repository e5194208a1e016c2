//! Keyboard camera navigation.
//!
//! Moves operate on a [`ViewParameters`] between frames only — the
//! pipeline always sees a finished snapshot, never a half-applied move.
//! Strafe and dolly translate the PRP and SRP together along the view
//! basis, so the viewing direction is preserved; turning rotates the SRP
//! around the PRP about the v axis.

use crate::math::vec3::Vec3;
use crate::view::ViewParameters;

/// A single navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    /// Slide along -u.
    StrafeLeft,
    /// Slide along +u.
    StrafeRight,
    /// Slide along -n, toward the scene.
    DollyIn,
    /// Slide along +n, away from the scene.
    DollyOut,
    /// Rotate the view direction left about the v axis.
    TurnLeft,
    /// Rotate the view direction right about the v axis.
    TurnRight,
}

/// Applies [`CameraMove`]s with fixed translation / rotation step sizes.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// Translation distance per move, in world units.
    step: f32,
    /// Rotation per turn, in radians.
    turn: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            step: 1.0,
            turn: 0.05,
        }
    }
}

impl CameraController {
    pub fn new(step: f32, turn: f32) -> Self {
        Self { step, turn }
    }

    /// Applies one move to the view. The view must be non-degenerate
    /// (`validate` passed); moves keep it that way.
    pub fn apply(&self, view: &mut ViewParameters, movement: CameraMove) {
        let (u, v, n) = view.view_basis();
        match movement {
            CameraMove::StrafeLeft => self.translate(view, -u),
            CameraMove::StrafeRight => self.translate(view, u),
            CameraMove::DollyIn => self.translate(view, -n),
            CameraMove::DollyOut => self.translate(view, n),
            CameraMove::TurnLeft => Self::turn_about(view, v, self.turn),
            CameraMove::TurnRight => Self::turn_about(view, v, -self.turn),
        }
    }

    fn translate(&self, view: &mut ViewParameters, direction: Vec3) {
        let delta = direction * self.step;
        view.prp = view.prp + delta;
        view.srp = view.srp + delta;
    }

    fn turn_about(view: &mut ViewParameters, axis: Vec3, angle: f32) {
        let direction = view.srp - view.prp;
        view.srp = view.prp + direction.rotate_about(axis, angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ClipBounds, ProjectionKind};
    use approx::assert_relative_eq;

    fn view() -> ViewParameters {
        ViewParameters::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::UP,
            ClipBounds::new(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0),
            ProjectionKind::Perspective,
        )
    }

    #[test]
    fn strafe_moves_eye_and_target_together() {
        let controller = CameraController::new(2.0, 0.1);
        let mut v = view();
        controller.apply(&mut v, CameraMove::StrafeRight);
        assert_eq!(v.prp, Vec3::new(2.0, 0.0, 5.0));
        assert_eq!(v.srp, Vec3::new(2.0, 0.0, -5.0));
    }

    #[test]
    fn dolly_in_moves_along_the_view_direction() {
        let controller = CameraController::new(3.0, 0.1);
        let mut v = view();
        controller.apply(&mut v, CameraMove::DollyIn);
        // n points from the scene toward the eye; dolly-in goes against it.
        assert_eq!(v.prp, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(v.srp, Vec3::new(0.0, 0.0, -8.0));
    }

    #[test]
    fn turning_keeps_the_eye_and_the_target_distance() {
        let controller = CameraController::new(1.0, 0.25);
        let mut v = view();
        let before = view();
        controller.apply(&mut v, CameraMove::TurnLeft);
        assert_eq!(v.prp, before.prp);
        assert_relative_eq!(
            (v.srp - v.prp).magnitude(),
            (before.srp - before.prp).magnitude(),
            epsilon = 1e-5
        );
        // Looking left swings the target toward -x.
        assert!(v.srp.x < 0.0);
    }

    #[test]
    fn opposite_turns_cancel() {
        let controller = CameraController::default();
        let mut v = view();
        controller.apply(&mut v, CameraMove::TurnLeft);
        controller.apply(&mut v, CameraMove::TurnRight);
        let reference = view();
        assert_relative_eq!(v.srp.x, reference.srp.x, epsilon = 1e-4);
        assert_relative_eq!(v.srp.z, reference.srp.z, epsilon = 1e-4);
    }
}
