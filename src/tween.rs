//! Eased translation tween for a single entity.
//! Signals its start and end with `PositionTweenBegin` / `PositionTweenComplete`.

use bevy::math::curve::Curve;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use crate::events::PositionTweenBegin;
use crate::events::PositionTweenComplete;

/// Easing applied to every zoom tween.
pub const ZOOM_EASING: EaseFunction = EaseFunction::CubicInOut;

#[derive(Clone, Copy, Reflect, Default, Debug, PartialEq)]
enum TweenState {
    #[default]
    Pending,
    Running {
        elapsed_ms: f32,
    },
}

/// Animates `Transform::translation` from `from` to `to` over `duration_ms`.
///
/// The component removes itself on the final frame, which always lands exactly on `to`.
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct PositionTween {
    pub from:        Vec3,
    pub to:          Vec3,
    pub duration_ms: f32,
    pub easing:      EaseFunction,
    state:           TweenState,
}

impl PositionTween {
    pub const fn new(from: Vec3, to: Vec3, duration_ms: f32, easing: EaseFunction) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            state: TweenState::Pending,
        }
    }

    pub const fn is_running(&self) -> bool { matches!(self.state, TweenState::Running { .. }) }

    /// Eased position after `elapsed_ms`, with `t` clamped to `[0, 1]`.
    pub fn position_at(&self, elapsed_ms: f32) -> Vec3 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.sample_unchecked(t))
    }

    fn begin_event(&self, entity: Entity) -> PositionTweenBegin {
        PositionTweenBegin {
            entity,
            from: self.from,
            to: self.to,
            duration_ms: self.duration_ms,
        }
    }

    fn complete_event(&self, entity: Entity) -> PositionTweenComplete {
        PositionTweenComplete {
            entity,
            from: self.from,
            to: self.to,
            duration_ms: self.duration_ms,
        }
    }
}

/// System that advances position tweens by the frame's delta time.
///
/// First frame: snaps to `from` and fires begin. Final frame: writes `to`, removes the
/// tween and fires complete. A non-positive duration does both in one frame.
pub fn advance_position_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut PositionTween)>,
) {
    for (entity, mut transform, mut tween) in &mut query {
        let elapsed_ms = match tween.state {
            TweenState::Pending => {
                transform.translation = tween.from;
                tween.state = TweenState::Running { elapsed_ms: 0.0 };
                commands.trigger(tween.begin_event(entity));
                0.0
            },
            TweenState::Running { elapsed_ms } => elapsed_ms + time.delta_secs() * 1000.0,
        };

        if elapsed_ms < tween.duration_ms {
            transform.translation = tween.position_at(elapsed_ms);
            tween.state = TweenState::Running { elapsed_ms };
            continue;
        }

        transform.translation = tween.to;

        // Remove before triggering so observers can start a new tween on this entity.
        commands.entity(entity).remove::<PositionTween>();
        commands.trigger(tween.complete_event(entity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_hits_endpoints_exactly() {
        let tween = PositionTween::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, -9.0),
            2000.0,
            ZOOM_EASING,
        );
        assert_eq!(tween.position_at(0.0), tween.from);
        assert_eq!(tween.position_at(2000.0), tween.to);
        assert_eq!(tween.position_at(2500.0), tween.to);
        assert!(!tween.is_running());
    }

    #[test]
    fn cubic_in_out_is_symmetric_at_midpoint() {
        let tween = PositionTween::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 1000.0, ZOOM_EASING);
        let mid = tween.position_at(500.0);
        assert!(mid.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-4));

        // Eased start lags behind linear
        let early = tween.position_at(100.0);
        assert!(early.z > -1.0);
    }

    #[test]
    fn zero_duration_snaps() {
        let tween = PositionTween::new(Vec3::ZERO, Vec3::X, 0.0, ZOOM_EASING);
        assert_eq!(tween.position_at(0.0), Vec3::X);
    }
}
