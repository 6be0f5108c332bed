//! Configuration, one-shot target initialization and the per-frame transition driver.

use bevy::prelude::*;

use crate::bounds::BoundingBox;
use crate::bounds::compute_compound_aabb;
use crate::components::ZoomDisabled;
use crate::components::ZoomPoses;
use crate::components::ZoomToCamera;
use crate::error::ZoomError;
use crate::events::ZoomEnd;
use crate::fit::CameraParams;
use crate::fit::DEFAULT_EYE_HEIGHT_OFFSET;
use crate::fit::FrustumFit;
use crate::fit::Pose;
use crate::fit::pose_for_fit;
use crate::transition::TransitionPhase;
use crate::transition::ZoomTransition;

/// Default duration of one zoom transition.
pub const DEFAULT_DURATION_MS: f32 = 2000.0;

/// Configuration for zoom-to-camera behavior
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct ZoomToCameraConfig {
    /// Duration of each position tween
    pub duration_ms:       f32,
    /// How far below the camera the zoomed object looks, in world units
    pub eye_height_offset: f32,
    /// Keep zooming objects visible while a transition plays
    pub force_visible:     bool,
    /// Disable `PanOrbitCamera` input while an object is zoomed in
    pub lock_orbit_camera: bool,
}

impl Default for ZoomToCameraConfig {
    fn default() -> Self {
        Self {
            duration_ms:       DEFAULT_DURATION_MS,
            eye_height_offset: DEFAULT_EYE_HEIGHT_OFFSET,
            force_visible:     true,
            lock_orbit_camera: true,
        }
    }
}

/// Picks the camera to zoom toward: the active perspective camera with the highest order.
pub fn find_active_camera(
    cameras: &Query<(Entity, &Camera, &Projection, &GlobalTransform)>,
) -> Result<(Entity, CameraParams), ZoomError> {
    cameras
        .iter()
        .filter(|(_, camera, projection, _)| {
            camera.is_active && matches!(projection, Projection::Perspective(_))
        })
        .max_by_key(|(_, camera, _, _)| camera.order)
        .ok_or(ZoomError::MissingCamera)
        .and_then(|(entity, camera, projection, global_transform)| {
            CameraParams::from_camera(camera, projection, global_transform)
                .map(|params| (entity, params))
        })
}

/// Computes rest and target poses for one object.
///
/// The target is fitted in world space and then expressed relative to `parent` so it can be
/// written straight into the object's `Transform`.
pub fn fit_object(
    transform: &Transform,
    parent: Option<&GlobalTransform>,
    aabb: &BoundingBox,
    camera_entity: Entity,
    camera: &CameraParams,
    eye_height_offset: f32,
) -> Result<ZoomPoses, ZoomError> {
    let rest = Pose::from_transform(transform);
    let fit = FrustumFit::new(aabb, transform.scale, camera)?;
    let world_target = pose_for_fit(&fit, &rest, camera, eye_height_offset);

    let target = parent.map_or(world_target, |parent| world_target.reparented_to(parent));

    Ok(ZoomPoses {
        rest,
        target,
        camera: camera_entity,
        distance: fit.distance(),
    })
}

/// System that caches rest and target poses for newly added `ZoomToCamera` objects.
///
/// Runs after transform propagation so the camera's world transform is current. Objects
/// whose meshes are still loading are left pending and retried next frame; any other
/// failure marks them `ZoomDisabled` for good.
pub fn initialize_zoom_targets(
    mut commands: Commands,
    config: Res<ZoomToCameraConfig>,
    pending: Query<
        (Entity, &Transform, Option<&ChildOf>),
        (With<ZoomToCamera>, Without<ZoomPoses>, Without<ZoomDisabled>),
    >,
    cameras: Query<(Entity, &Camera, &Projection, &GlobalTransform)>,
    global_transforms: Query<&GlobalTransform>,
    children_query: Query<&Children>,
    mesh_query: Query<&Mesh3d>,
    meshes: Res<Assets<Mesh>>,
) {
    if pending.is_empty() {
        return;
    }

    let camera = find_active_camera(&cameras);

    for (entity, transform, child_of) in &pending {
        let parent = child_of.and_then(|c| global_transforms.get(c.parent()).ok());

        let result = camera.clone().and_then(|(camera_entity, params)| {
            let aabb = compute_compound_aabb(entity, &children_query, &mesh_query, &meshes)?;
            fit_object(
                transform,
                parent,
                &aabb,
                camera_entity,
                &params,
                config.eye_height_offset,
            )
        });

        match result {
            Ok(poses) => {
                info!(
                    "ZoomToCamera: {entity:?} fitted at distance {:.3} toward camera {:?}, target={:.3?}",
                    poses.distance, poses.camera, poses.target.position
                );
                commands.entity(entity).insert(poses);
            },
            Err(ZoomError::MeshNotLoaded(node)) => {
                debug!("ZoomToCamera: {entity:?} waiting for mesh on {node:?}");
            },
            Err(error) => {
                warn!("ZoomToCamera: disabling zoom for {entity:?}: {error}");
                commands.entity(entity).insert(ZoomDisabled(error));
            },
        }
    }
}

/// System that advances every zoom transition by one frame.
///
/// While playing, orientation is slerped by the fraction of distance the position tween
/// has covered. A just-completed transition is rearmed for the opposite direction and
/// `ZoomEnd` is fired.
pub fn drive_zoom_transitions(
    mut commands: Commands,
    config: Res<ZoomToCameraConfig>,
    mut query: Query<(
        Entity,
        &mut Transform,
        &ZoomPoses,
        &mut ZoomTransition,
        Option<&mut Visibility>,
    )>,
) {
    for (entity, mut transform, poses, mut transition, visibility) in &mut query {
        match transition.phase() {
            TransitionPhase::Idle => {},
            TransitionPhase::Playing => {
                let Some(orientation) =
                    transition.sample(poses.rest, poses.target, transform.translation)
                else {
                    continue;
                };
                transform.rotation = orientation;

                if config.force_visible
                    && let Some(mut visibility) = visibility
                {
                    visibility.set_if_neq(Visibility::Inherited);
                }
            },
            TransitionPhase::JustCompleted => {
                let completed = transition.direction();
                if let Some(next) = transition.rearm() {
                    debug!("ZoomToCamera: {entity:?} finished {completed:?}, next is {next:?}");
                    commands.trigger(ZoomEnd {
                        entity,
                        completed,
                        next,
                    });
                }
            },
        }
    }
}
