use std::collections::HashMap;
use std::collections::HashSet;

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::components::ZoomPoses;
use crate::events::ZoomBegin;
use crate::events::ZoomEnd;
use crate::transition::ZoomDirection;
use crate::zoom::ZoomToCameraConfig;

/// Input state of a `PanOrbitCamera` before zoomed objects locked it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrbitInputStash {
    pub enabled: bool,
    /// Objects currently away from rest in front of this camera
    pub holders: HashSet<Entity>,
}

/// Orbit cameras locked by zoomed objects, keyed by camera entity.
///
/// The target pose is fitted against a snapshot of the camera, so the camera must not orbit
/// away while anything is zoomed in. The original `enabled` flag is restored once the last
/// object has returned to rest.
#[derive(Resource, Debug, Default)]
pub struct OrbitCameraLocks {
    stashes: HashMap<Entity, OrbitInputStash>,
}

impl OrbitCameraLocks {
    pub fn is_locked(&self, camera: Entity) -> bool { self.stashes.contains_key(&camera) }

    pub fn stash(&self, camera: Entity) -> Option<&OrbitInputStash> { self.stashes.get(&camera) }

    /// Drops `holder` from the camera's lock and hands back the stash once nobody holds it.
    fn release(&mut self, camera: Entity, holder: Entity) -> Option<OrbitInputStash> {
        let stash = self.stashes.get_mut(&camera)?;
        stash.holders.remove(&holder);
        if stash.holders.is_empty() {
            self.stashes.remove(&camera)
        } else {
            None
        }
    }

    fn cameras_held_by(&self, holder: Entity) -> Vec<Entity> {
        self.stashes
            .iter()
            .filter(|(_, stash)| stash.holders.contains(&holder))
            .map(|(camera, _)| *camera)
            .collect()
    }
}

/// Extension trait for `PanOrbitCamera` input locking.
pub trait PanOrbitCameraExt {
    /// Stashes the current input state and disables user input.
    fn stash_and_disable_input(&mut self) -> OrbitInputStash;

    /// Restores the input state captured by `stash_and_disable_input`.
    fn restore_input(&mut self, stash: &OrbitInputStash);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn stash_and_disable_input(&mut self) -> OrbitInputStash {
        let stash = OrbitInputStash {
            enabled: self.enabled,
            holders: HashSet::new(),
        };
        self.enabled = false;
        stash
    }

    fn restore_input(&mut self, stash: &OrbitInputStash) { self.enabled = stash.enabled; }
}

/// Observer that locks the fitted camera when an object starts zooming toward it
pub fn lock_orbit_camera_on_zoom_begin(
    begin: On<ZoomBegin>,
    config: Res<ZoomToCameraConfig>,
    mut locks: ResMut<OrbitCameraLocks>,
    poses: Query<&ZoomPoses>,
    mut cameras: Query<&mut PanOrbitCamera>,
) {
    if !config.lock_orbit_camera || begin.direction != ZoomDirection::ToCamera {
        return;
    }

    let Ok(poses) = poses.get(begin.entity) else {
        return;
    };
    let Ok(mut camera) = cameras.get_mut(poses.camera) else {
        return;
    };

    let stash = locks
        .stashes
        .entry(poses.camera)
        .or_insert_with(|| camera.stash_and_disable_input());
    stash.holders.insert(begin.entity);
}

/// Observer that releases the lock once an object is back at rest
pub fn release_orbit_camera_on_zoom_end(
    end: On<ZoomEnd>,
    mut locks: ResMut<OrbitCameraLocks>,
    poses: Query<&ZoomPoses>,
    mut cameras: Query<&mut PanOrbitCamera>,
) {
    if end.completed != ZoomDirection::ToRest {
        return;
    }

    let Ok(poses) = poses.get(end.entity) else {
        return;
    };
    if let Some(stash) = locks.release(poses.camera, end.entity)
        && let Ok(mut camera) = cameras.get_mut(poses.camera)
    {
        camera.restore_input(&stash);
    }
}

/// Observer that releases any lock still held by an object whose poses are removed
pub fn release_orbit_camera_on_poses_removed(
    remove: On<Remove, ZoomPoses>,
    mut locks: ResMut<OrbitCameraLocks>,
    mut cameras: Query<&mut PanOrbitCamera>,
) {
    let holder = remove.entity;

    for camera_entity in locks.cameras_held_by(holder) {
        let Some(stash) = locks.release(camera_entity, holder) else {
            continue;
        };
        debug!("ZoomToCamera: {holder:?} removed while zoomed, releasing {camera_entity:?}");
        if let Ok(mut camera) = cameras.get_mut(camera_entity) {
            camera.restore_input(&stash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stash_round_trip() {
        let mut camera = PanOrbitCamera::default();
        assert!(camera.enabled);

        let stash = camera.stash_and_disable_input();
        assert!(!camera.enabled);
        assert!(stash.enabled);

        camera.restore_input(&stash);
        assert!(camera.enabled);
    }

    #[test]
    fn lock_is_returned_only_when_last_holder_leaves() {
        let mut world = World::new();
        let camera = world.spawn_empty().id();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        let mut locks = OrbitCameraLocks::default();
        let mut stash = PanOrbitCamera::default().stash_and_disable_input();
        stash.holders.extend([first, second]);
        locks.stashes.insert(camera, stash);

        assert_eq!(locks.cameras_held_by(first), vec![camera]);
        assert!(locks.release(camera, first).is_none());
        assert!(locks.is_locked(camera));

        let released = locks.release(camera, second).unwrap();
        assert!(released.enabled);
        assert!(!locks.is_locked(camera));
        assert!(locks.cameras_held_by(second).is_empty());
    }

    #[test]
    fn stash_preserves_disabled_input() {
        let mut camera = PanOrbitCamera {
            enabled: false,
            ..default()
        };
        let stash = camera.stash_and_disable_input();
        camera.restore_input(&stash);
        assert!(!camera.enabled);
    }
}
