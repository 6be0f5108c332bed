// bevy_zoom_to_camera
// Moves a scene object in front of the active camera so that it fills the view, and back:
// - Compound bounding box extraction over an entity hierarchy
// - Frustum fit of the object's target pose against the camera
// - Transition driver that slerps orientation in step with an eased position tween

use bevy::prelude::*;
use bevy::transform::TransformSystems;

mod bounds;
mod camera_lock;
mod components;
mod error;
mod events;
mod fit;
mod observers;
#[cfg(feature = "picking")]
mod picking;
pub mod prelude;
mod transition;
mod tween;
mod zoom;

// Public API - Events
pub use events::PositionTweenBegin;
pub use events::PositionTweenComplete;
pub use events::SetZooming;
pub use events::ToggleZoom;
pub use events::ZoomBegin;
pub use events::ZoomEnd;

// Public API - Components
pub use components::ZoomDisabled;
pub use components::ZoomPoses;
pub use components::ZoomToCamera;
pub use components::ZoomTrigger;
pub use transition::ZoomTransition;
pub use tween::PositionTween;

// Public API - Value types and errors
pub use bounds::BoundingBox;
pub use error::ZoomError;
pub use fit::CameraParams;
pub use fit::FrustumFit;
pub use fit::Pose;
pub use transition::TransitionPhase;
pub use transition::ZoomDirection;

// Public API - Utility functions
pub use bounds::compute_compound_aabb;
pub use bounds::mesh_bounds;
pub use fit::compute_target_pose;
pub use fit::pose_for_fit;
pub use transition::interpolate_orientation;
pub use transition::progress;

// Public API - Traits
pub use camera_lock::PanOrbitCameraExt;

// Public API - Configuration and resources
pub use camera_lock::OrbitCameraLocks;
pub use camera_lock::OrbitInputStash;
pub use fit::DEFAULT_EYE_HEIGHT_OFFSET;
pub use tween::ZOOM_EASING;
pub use zoom::DEFAULT_DURATION_MS;
pub use zoom::ZoomToCameraConfig;

// Internal - used by plugin, not for external use
use camera_lock::{
    lock_orbit_camera_on_zoom_begin, release_orbit_camera_on_poses_removed,
    release_orbit_camera_on_zoom_end,
};
use observers::{
    begin_transition_on_tween_begin, complete_transition_on_tween_complete, on_set_zooming,
    on_toggle_zoom, rearm_trigger_on_zoom_end,
};
use tween::advance_position_tweens;
use zoom::{drive_zoom_transitions, initialize_zoom_targets};

/// Plugin that adds zoom-to-camera functionality
pub struct ZoomToCameraPlugin;

impl Plugin for ZoomToCameraPlugin {
    fn build(&self, app: &mut App) {
        app
            // Register observers for requests
            .add_observer(on_set_zooming)
            .add_observer(on_toggle_zoom)
            // Register observers for tween and zoom lifecycle events
            .add_observer(begin_transition_on_tween_begin)
            .add_observer(complete_transition_on_tween_complete)
            .add_observer(rearm_trigger_on_zoom_end)
            .add_observer(lock_orbit_camera_on_zoom_begin)
            .add_observer(release_orbit_camera_on_zoom_end)
            .add_observer(release_orbit_camera_on_poses_removed)
            // Add systems
            .add_systems(
                Update,
                (advance_position_tweens, drive_zoom_transitions).chain(),
            )
            .add_systems(
                PostUpdate,
                initialize_zoom_targets.after(TransformSystems::Propagate),
            )
            // Initialize resources
            .init_resource::<ZoomToCameraConfig>()
            .init_resource::<OrbitCameraLocks>();

        #[cfg(feature = "picking")]
        app.add_observer(picking::toggle_zoom_on_click);
    }
}
