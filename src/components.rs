//! Components attached to zoomable objects.

use bevy::prelude::*;

use crate::error::ZoomError;
use crate::fit::Pose;
use crate::transition::ZoomDirection;
use crate::transition::ZoomTransition;

/// Opts an entity into the zoom-to-camera effect.
///
/// On the first frame after insertion the rest and target poses are computed against the
/// active camera and cached in `ZoomPoses`; if that fails the entity gets `ZoomDisabled`.
/// Initialization waits until every mesh in the hierarchy has loaded.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component, Default)]
#[require(ZoomTransition, ZoomTrigger)]
pub struct ZoomToCamera;

/// Rest and target poses, computed once and never updated.
/// Both are expressed in the object's local (parent) space.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ZoomPoses {
    pub rest:     Pose,
    pub target:   Pose,
    /// Camera the target pose was fitted against
    pub camera:   Entity,
    /// Distance from the camera to the target position
    pub distance: f32,
}

impl ZoomPoses {
    /// Position the given direction ends at.
    pub const fn destination(&self, direction: ZoomDirection) -> Vec3 {
        match direction {
            ZoomDirection::ToCamera => self.target.position,
            ZoomDirection::ToRest => self.rest.position,
        }
    }
}

/// Interaction binding: which direction the next `ToggleZoom` requests.
/// Rearmed to the opposite direction after every completed transition.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ZoomTrigger {
    pub next: ZoomDirection,
}

/// Marks an object whose zoom effect could not be initialized.
#[derive(Component, Debug, Clone)]
pub struct ZoomDisabled(pub ZoomError);
