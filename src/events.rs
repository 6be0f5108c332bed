//! Request and lifecycle events for zoom-to-camera transitions.

use bevy::prelude::*;

use crate::transition::ZoomDirection;

// ============================================================================
// Requests
// ============================================================================

/// Starts a transition: `zooming = true` heads to the camera, `false` back to rest.
/// Ignored unless the object is initialized and idle.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct SetZooming {
    pub entity:  Entity,
    pub zooming: bool,
}

impl SetZooming {
    pub const fn new(entity: Entity, zooming: bool) -> Self { Self { entity, zooming } }
}

/// Starts whichever transition the object's `ZoomTrigger` is currently armed for.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct ToggleZoom {
    pub entity: Entity,
}

impl ToggleZoom {
    pub const fn new(entity: Entity) -> Self { Self { entity } }
}

// ============================================================================
// Position tween lifecycle
// ============================================================================

/// Fired on the first frame of a `PositionTween`.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct PositionTweenBegin {
    pub entity:      Entity,
    pub from:        Vec3,
    pub to:          Vec3,
    pub duration_ms: f32,
}

/// Fired once a `PositionTween` has reached its destination.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct PositionTweenComplete {
    pub entity:      Entity,
    pub from:        Vec3,
    pub to:          Vec3,
    pub duration_ms: f32,
}

// ============================================================================
// Zoom lifecycle
// ============================================================================

/// Fired when an object's transition starts playing.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct ZoomBegin {
    pub entity:    Entity,
    pub direction: ZoomDirection,
}

/// Fired when a finished transition has been rearmed. `next` is the direction the
/// interaction binding should request on the next toggle.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct ZoomEnd {
    pub entity:    Entity,
    pub completed: ZoomDirection,
    pub next:      ZoomDirection,
}
