//! Observers that wire requests and tween signals to the transition driver.

use bevy::prelude::*;

use crate::components::ZoomDisabled;
use crate::components::ZoomPoses;
use crate::components::ZoomTrigger;
use crate::events::PositionTweenBegin;
use crate::events::PositionTweenComplete;
use crate::events::SetZooming;
use crate::events::ToggleZoom;
use crate::events::ZoomBegin;
use crate::events::ZoomEnd;
use crate::transition::ZoomDirection;
use crate::transition::ZoomTransition;
use crate::tween::PositionTween;
use crate::tween::ZOOM_EASING;
use crate::zoom::ZoomToCameraConfig;

/// Observer for `SetZooming` - starts a position tween toward the requested pose.
/// The tween always starts from the object's current translation.
pub fn on_set_zooming(
    request: On<SetZooming>,
    mut commands: Commands,
    config: Res<ZoomToCameraConfig>,
    mut query: Query<(
        &Transform,
        Option<&ZoomPoses>,
        &mut ZoomTransition,
        Option<&ZoomDisabled>,
    )>,
) {
    let entity = request.entity;
    let direction = ZoomDirection::from_zooming(request.zooming);

    let Ok((transform, poses, mut transition, disabled)) = query.get_mut(entity) else {
        return;
    };

    if let Some(ZoomDisabled(error)) = disabled {
        debug!("SetZooming: ignoring request for {entity:?}, zoom disabled: {error}");
        return;
    }

    let Some(poses) = poses else {
        debug!("SetZooming: ignoring request for {entity:?}, poses not computed yet");
        return;
    };

    if !transition.request(direction) {
        debug!(
            "SetZooming: ignoring {direction:?} for {entity:?}, transition is {:?}",
            transition.phase()
        );
        return;
    }

    commands.entity(entity).insert(PositionTween::new(
        transform.translation,
        poses.destination(direction),
        config.duration_ms,
        ZOOM_EASING,
    ));
}

/// Observer for `ToggleZoom` - requests the direction the trigger is armed for.
pub fn on_toggle_zoom(toggle: On<ToggleZoom>, mut commands: Commands, query: Query<&ZoomTrigger>) {
    let entity = toggle.entity;

    let Ok(trigger) = query.get(entity) else {
        return;
    };

    commands.trigger(SetZooming::new(entity, trigger.next.is_zooming()));
}

/// Observer for `PositionTweenBegin` - moves the driver from idle to playing.
pub fn begin_transition_on_tween_begin(
    begin: On<PositionTweenBegin>,
    mut commands: Commands,
    mut query: Query<&mut ZoomTransition>,
) {
    let entity = begin.entity;

    let Ok(mut transition) = query.get_mut(entity) else {
        return;
    };

    if !transition.begin() {
        debug!(
            "PositionTweenBegin: {entity:?} already {:?}, ignoring",
            transition.phase()
        );
        return;
    }

    commands.trigger(ZoomBegin {
        entity,
        direction: transition.direction(),
    });
}

/// Observer for `PositionTweenComplete` - settles the final orientation and marks the
/// transition as just completed.
pub fn complete_transition_on_tween_complete(
    complete: On<PositionTweenComplete>,
    mut query: Query<(&mut Transform, &ZoomPoses, &mut ZoomTransition)>,
) {
    let entity = complete.entity;

    let Ok((mut transform, poses, mut transition)) = query.get_mut(entity) else {
        return;
    };

    // The tween has already written its final translation, so this samples the end pose.
    if let Some(orientation) = transition.sample(poses.rest, poses.target, transform.translation)
    {
        transform.rotation = orientation;
    }

    if !transition.complete() {
        debug!(
            "PositionTweenComplete: {entity:?} is {:?}, ignoring",
            transition.phase()
        );
    }
}

/// Observer for `ZoomEnd` - rearms the interaction binding.
pub fn rearm_trigger_on_zoom_end(end: On<ZoomEnd>, mut query: Query<&mut ZoomTrigger>) {
    let Ok(mut trigger) = query.get_mut(end.entity) else {
        return;
    };
    trigger.next = end.next;
}

