//! Fit algorithm that places an object flush against the camera frustum.
//!
//! The object's compound bounding box is scaled to world size, the camera distance at which
//! that box spans the full vertical (or horizontal) field of view is derived, and the object is
//! placed that far in front of the camera, turned to face a point slightly below the camera.

use bevy::prelude::*;

use crate::bounds::BoundingBox;
use crate::error::ZoomError;

// ============================================================================
// Constants
// ============================================================================

/// Default downward shift of the look-at point, in world units.
pub const DEFAULT_EYE_HEIGHT_OFFSET: f32 = 1.5;

/// Below this, `tan(fov / 2)` is treated as zero.
const MIN_TAN_HALF_FOV: f32 = 1e-6;

// ============================================================================
// Types
// ============================================================================

/// Position and orientation of an object, without scale.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Pose {
    pub position:    Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub const fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }

    /// Expresses a world-space pose in the local space of `parent`.
    pub fn reparented_to(&self, parent: &GlobalTransform) -> Self {
        let world = GlobalTransform::from(
            Transform::from_translation(self.position).with_rotation(self.orientation),
        );
        let local = world.reparented_to(parent);
        Self::new(local.translation, local.rotation)
    }
}

/// Snapshot of the camera parameters the fit depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Full vertical field of view in degrees
    pub vertical_fov_degrees: f32,
    /// Viewport width over height
    pub aspect_ratio:         f32,
    pub world_transform:      Mat4,
}

impl CameraParams {
    pub const fn new(vertical_fov_degrees: f32, aspect_ratio: f32, world_transform: Mat4) -> Self {
        Self {
            vertical_fov_degrees,
            aspect_ratio,
            world_transform,
        }
    }

    /// Snapshots a Bevy camera. Only perspective projections can be fitted against.
    ///
    /// The aspect ratio comes from the camera's logical viewport when it is known, otherwise
    /// from the projection itself.
    pub fn from_camera(
        camera: &Camera,
        projection: &Projection,
        global_transform: &GlobalTransform,
    ) -> Result<Self, ZoomError> {
        let Projection::Perspective(perspective) = projection else {
            return Err(ZoomError::MissingCamera);
        };

        let aspect_ratio = camera
            .logical_viewport_size()
            .map_or(perspective.aspect_ratio, |size| size.x / size.y);

        Ok(Self::new(
            perspective.fov.to_degrees(),
            aspect_ratio,
            Mat4::from(global_transform.affine()),
        ))
    }

    /// Camera position in world space
    pub fn translation(&self) -> Vec3 { self.world_transform.w_axis.truncate() }

    /// Validated `tan` of half the vertical field of view.
    fn tan_half_fov(&self) -> Result<f32, ZoomError> {
        let fov = self.vertical_fov_degrees;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            return Err(ZoomError::InvalidFov(fov));
        }

        let tan_half_fov = (fov.to_radians() * 0.5).tan();
        if !tan_half_fov.is_finite() || tan_half_fov < MIN_TAN_HALF_FOV {
            return Err(ZoomError::InvalidFov(fov));
        }
        Ok(tan_half_fov)
    }

    fn validated_aspect_ratio(&self) -> Result<f32, ZoomError> {
        let aspect = self.aspect_ratio;
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ZoomError::InvalidAspectRatio(aspect));
        }
        Ok(aspect)
    }
}

/// Camera distances at which the object's height and width fill the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumFit {
    pub distance_for_height: f32,
    pub distance_for_width:  f32,
}

impl FrustumFit {
    /// Sizes the box by `object_scale` and derives both distances from the camera's
    /// vertical field of view and aspect ratio.
    pub fn new(
        aabb: &BoundingBox,
        object_scale: Vec3,
        camera: &CameraParams,
    ) -> Result<Self, ZoomError> {
        let tan_half_fov = camera.tan_half_fov()?;
        let aspect_ratio = camera.validated_aspect_ratio()?;

        let size = aabb.size() * object_scale;
        let width = size.x.abs();
        let height = size.y.abs();

        Ok(Self {
            distance_for_height: height / tan_half_fov,
            distance_for_width:  width / (aspect_ratio * tan_half_fov),
        })
    }

    /// The larger of the two distances, so both axes fit. Ties go to width.
    pub fn distance(&self) -> f32 {
        if self.distance_for_width < self.distance_for_height {
            self.distance_for_height
        } else {
            self.distance_for_width
        }
    }

    /// Target position in camera space, straight ahead along `-Z`.
    pub fn camera_local_position(&self) -> Vec3 { Vec3::new(0.0, 0.0, -self.distance()) }
}

// ============================================================================
// Target pose
// ============================================================================

/// Computes the world-space pose that puts the object flush against the camera frustum.
///
/// Works on copies only: nothing about the live object changes. See `pose_for_fit` for
/// how the orientation is chosen.
pub fn compute_target_pose(
    aabb: &BoundingBox,
    object_scale: Vec3,
    rest_pose: &Pose,
    camera: &CameraParams,
    eye_height_offset: f32,
) -> Result<Pose, ZoomError> {
    let fit = FrustumFit::new(aabb, object_scale, camera)?;
    Ok(pose_for_fit(&fit, rest_pose, camera, eye_height_offset))
}

/// Places the object at an already computed fit distance in front of the camera.
///
/// The object faces the camera position lowered by `eye_height_offset` and then carried
/// through the camera's world transform; its local `+Z` axis points at that spot and `+Y`
/// stays up. If the object would sit exactly on that spot, the rest orientation is kept.
pub fn pose_for_fit(
    fit: &FrustumFit,
    rest_pose: &Pose,
    camera: &CameraParams,
    eye_height_offset: f32,
) -> Pose {
    let position = camera
        .world_transform
        .transform_point3(fit.camera_local_position());

    let lowered_eye = camera.translation() - Vec3::Y * eye_height_offset;
    let look_target = camera.world_transform.transform_point3(lowered_eye);

    let away_from_target = position - look_target;
    let orientation = if away_from_target.length_squared() <= f32::EPSILON {
        rest_pose.orientation
    } else {
        Transform::from_translation(position)
            .looking_to(away_from_target, Vec3::Y)
            .rotation
    };

    Pose::new(position, orientation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> BoundingBox { BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)) }

    fn camera_at(transform: Transform) -> CameraParams {
        CameraParams::new(
            60.0,
            1.0,
            Mat4::from_scale_rotation_translation(
                transform.scale,
                transform.rotation,
                transform.translation,
            ),
        )
    }

    #[test]
    fn unit_cube_at_sixty_degrees() {
        let fit = FrustumFit::new(&unit_cube(), Vec3::ONE, &camera_at(Transform::IDENTITY)).unwrap();

        let expected = 2.0 / 30.0_f32.to_radians().tan();
        assert!((fit.distance_for_height - expected).abs() < 1e-4);
        assert!((fit.distance_for_width - expected).abs() < 1e-4);
        assert!((fit.distance() - 3.464).abs() < 1e-3);

        let local = fit.camera_local_position();
        assert_eq!(local.x, 0.0);
        assert_eq!(local.y, 0.0);
        assert!((local.z + 3.464).abs() < 1e-3);
    }

    #[test]
    fn tie_goes_to_width() {
        let fit = FrustumFit {
            distance_for_height: 2.5,
            distance_for_width:  2.5,
        };
        assert_eq!(fit.distance().to_bits(), fit.distance_for_width.to_bits());

        let wider = FrustumFit {
            distance_for_height: 2.5,
            distance_for_width:  3.0,
        };
        assert_eq!(wider.distance(), 3.0);

        let taller = FrustumFit {
            distance_for_height: 4.0,
            distance_for_width:  3.0,
        };
        assert_eq!(taller.distance(), 4.0);
    }

    #[test]
    fn wide_object_is_constrained_by_width() {
        let wide = BoundingBox::new(Vec3::new(-2.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5));
        let camera = CameraParams::new(60.0, 16.0 / 9.0, Mat4::IDENTITY);
        let fit = FrustumFit::new(&wide, Vec3::ONE, &camera).unwrap();

        assert!(fit.distance_for_width > fit.distance_for_height);
        assert_eq!(fit.distance(), fit.distance_for_width);
    }

    #[test]
    fn distance_scales_linearly_with_extents() {
        let camera = camera_at(Transform::IDENTITY);
        let base = FrustumFit::new(&unit_cube(), Vec3::new(1.0, 0.5, 1.0), &camera)
            .unwrap()
            .distance();
        let doubled = FrustumFit::new(&unit_cube(), Vec3::new(2.0, 1.0, 2.0), &camera)
            .unwrap()
            .distance();
        let doubled_box = FrustumFit::new(
            &BoundingBox::new(Vec3::splat(-2.0), Vec3::splat(2.0)),
            Vec3::new(1.0, 0.5, 1.0),
            &camera,
        )
        .unwrap()
        .distance();

        assert!((doubled - 2.0 * base).abs() < 1e-4);
        assert!((doubled_box - 2.0 * base).abs() < 1e-4);
    }

    #[test]
    fn rejects_degenerate_fov() {
        for fov in [0.0, -10.0, 180.0, 270.0, f32::NAN] {
            let camera = CameraParams::new(fov, 1.0, Mat4::IDENTITY);
            let result = FrustumFit::new(&unit_cube(), Vec3::ONE, &camera);
            assert!(matches!(result, Err(ZoomError::InvalidFov(_))), "fov {fov}");
        }
    }

    #[test]
    fn rejects_degenerate_aspect_ratio() {
        for aspect in [0.0, -1.5, f32::INFINITY] {
            let camera = CameraParams::new(60.0, aspect, Mat4::IDENTITY);
            let result = FrustumFit::new(&unit_cube(), Vec3::ONE, &camera);
            assert!(
                matches!(result, Err(ZoomError::InvalidAspectRatio(_))),
                "aspect {aspect}"
            );
        }
    }

    #[test]
    fn target_position_follows_camera_transform() {
        let rest = Pose::new(Vec3::new(4.0, 0.0, -8.0), Quat::IDENTITY);

        let moved = camera_at(Transform::from_xyz(0.0, 2.0, 10.0));
        let pose = compute_target_pose(&unit_cube(), Vec3::ONE, &rest, &moved, 1.5).unwrap();
        assert!(pose.position.abs_diff_eq(Vec3::new(0.0, 2.0, 10.0 - 3.4641), 1e-3));

        let turned = camera_at(Transform::from_rotation(Quat::from_rotation_y(
            std::f32::consts::FRAC_PI_2,
        )));
        let pose = compute_target_pose(&unit_cube(), Vec3::ONE, &rest, &turned, 1.5).unwrap();
        assert!(pose.position.abs_diff_eq(Vec3::new(-3.4641, 0.0, 0.0), 1e-3));
    }

    #[test]
    fn target_faces_point_below_camera() {
        let rest = Pose::new(Vec3::ZERO, Quat::IDENTITY);
        let camera = camera_at(Transform::IDENTITY);
        let pose = compute_target_pose(&unit_cube(), Vec3::ONE, &rest, &camera, 1.5).unwrap();

        let look_target = Vec3::new(0.0, -1.5, 0.0);
        let expected = (look_target - pose.position).normalize();
        let facing = pose.orientation * Vec3::Z;
        assert!(facing.abs_diff_eq(expected, 1e-4));
        assert!(pose.orientation.is_normalized());
    }

    #[test]
    fn zero_offset_faces_camera_straight_on() {
        let rest = Pose::new(Vec3::ZERO, Quat::IDENTITY);
        let camera = camera_at(Transform::IDENTITY);
        let pose = compute_target_pose(&unit_cube(), Vec3::ONE, &rest, &camera, 0.0).unwrap();

        assert!(pose.orientation.abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn precomputed_fit_gives_same_pose() {
        let rest = Pose::new(Vec3::new(2.0, 0.0, -6.0), Quat::from_rotation_z(0.2));
        let camera = camera_at(Transform::from_xyz(1.0, 3.0, 4.0));
        let fit = FrustumFit::new(&unit_cube(), Vec3::splat(0.5), &camera).unwrap();

        let from_fit = pose_for_fit(&fit, &rest, &camera, 1.5);
        let direct = compute_target_pose(&unit_cube(), Vec3::splat(0.5), &rest, &camera, 1.5).unwrap();
        assert_eq!(from_fit, direct);
        assert!((from_fit.position.distance(camera.translation()) - fit.distance()).abs() < 1e-4);
    }

    #[test]
    fn rest_pose_is_left_untouched() {
        let rest = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_x(0.4));
        let before = rest;
        let _ = compute_target_pose(
            &unit_cube(),
            Vec3::ONE,
            &rest,
            &camera_at(Transform::IDENTITY),
            1.5,
        )
        .unwrap();
        assert_eq!(rest, before);
    }

    #[test]
    fn reparenting_inverts_parent_transform() {
        let parent = GlobalTransform::from(
            Transform::from_xyz(1.0, 0.0, -2.0).with_rotation(Quat::from_rotation_y(0.7)),
        );
        let world = Pose::new(Vec3::new(3.0, 1.0, 0.0), Quat::from_rotation_x(0.3));
        let local = world.reparented_to(&parent);

        let back = parent.mul_transform(
            Transform::from_translation(local.position).with_rotation(local.orientation),
        );
        assert!(back.translation().abs_diff_eq(world.position, 1e-4));
        assert!(back.rotation().abs_diff_eq(world.orientation, 1e-4));
    }
}
