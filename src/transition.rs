//! Per-object zoom transition state machine.
//!
//! The position of a zooming object is animated by a tween that this module does not own.
//! Orientation follows that position: the fraction of the straight-line distance already
//! covered is the slerp parameter, so rotation stays in lockstep with whatever easing the
//! position tween uses.

use bevy::prelude::*;

use crate::fit::Pose;

/// Which way a transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ZoomDirection {
    /// From the rest pose to the camera-filling target pose
    #[default]
    ToCamera,
    /// From the target pose back to the rest pose
    ToRest,
}

impl ZoomDirection {
    /// Maps the `zooming` input: `true` zooms toward the camera.
    pub const fn from_zooming(zooming: bool) -> Self {
        if zooming { Self::ToCamera } else { Self::ToRest }
    }

    pub const fn is_zooming(self) -> bool { matches!(self, Self::ToCamera) }

    pub const fn opposite(self) -> Self {
        match self {
            Self::ToCamera => Self::ToRest,
            Self::ToRest => Self::ToCamera,
        }
    }

    /// Start and end poses for this direction.
    pub const fn endpoints(self, rest: Pose, target: Pose) -> (Pose, Pose) {
        match self {
            Self::ToCamera => (rest, target),
            Self::ToRest => (target, rest),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Playing,
    /// The position tween finished; the trigger still has to be rearmed.
    JustCompleted,
}

/// Transition state owned by a single zoomable object.
///
/// Phases only advance through the edge handlers: `begin` from `Idle`, `complete` from
/// `Playing`, `rearm` from `JustCompleted`. A repeated signal in any other phase is ignored
/// and reported as `false`/`None`.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ZoomTransition {
    direction: ZoomDirection,
    phase:     TransitionPhase,
}

impl ZoomTransition {
    pub const fn direction(&self) -> ZoomDirection { self.direction }

    pub const fn phase(&self) -> TransitionPhase { self.phase }

    pub const fn is_idle(&self) -> bool { matches!(self.phase, TransitionPhase::Idle) }

    /// Chooses the direction of the next transition. Only accepted while idle.
    pub const fn request(&mut self, direction: ZoomDirection) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Position tween started.
    pub const fn begin(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = TransitionPhase::Playing;
        true
    }

    /// Orientation for the current position while playing, `None` otherwise.
    pub fn sample(&self, rest: Pose, target: Pose, current_position: Vec3) -> Option<Quat> {
        if self.phase != TransitionPhase::Playing {
            return None;
        }
        let (start, end) = self.direction.endpoints(rest, target);
        let t = progress(start.position, end.position, current_position);
        Some(interpolate_orientation(start.orientation, end.orientation, t))
    }

    /// Position tween finished.
    pub const fn complete(&mut self) -> bool {
        if !matches!(self.phase, TransitionPhase::Playing) {
            return false;
        }
        self.phase = TransitionPhase::JustCompleted;
        true
    }

    /// Returns to idle with the direction reversed, returning the new direction.
    pub const fn rearm(&mut self) -> Option<ZoomDirection> {
        if !matches!(self.phase, TransitionPhase::JustCompleted) {
            return None;
        }
        self.direction = self.direction.opposite();
        self.phase = TransitionPhase::Idle;
        Some(self.direction)
    }
}

/// Fraction of the `start`→`end` distance covered at `current`, clamped to `[0, 1]`.
///
/// Eased tweens may overshoot, which would push the raw ratio outside that range. When the
/// two endpoints coincide the transition counts as done.
pub fn progress(start: Vec3, end: Vec3, current: Vec3) -> f32 {
    let total = start.distance(end);
    if total <= f32::EPSILON {
        return 1.0;
    }
    let covered = start.distance(current);
    (covered / total).clamp(0.0, 1.0)
}

/// Slerp that returns the endpoints exactly at `t = 0` and `t = 1`.
pub fn interpolate_orientation(start: Quat, end: Quat, t: f32) -> Quat {
    if t <= 0.0 {
        start
    } else if t >= 1.0 {
        end
    } else {
        start.slerp(end, t)
    }
}
