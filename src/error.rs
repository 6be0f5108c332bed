//! Error types for zoom target initialization.

use bevy::prelude::Entity;
use thiserror::Error;

/// Reasons a zoomable object could not compute its target pose.
///
/// None of these are fatal: the object keeps its rest pose and ignores zoom requests.
/// `MeshNotLoaded` is transient and only delays initialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomError {
    /// The object and its descendants carry no geometry to bound.
    #[error("object has no geometry to bound")]
    EmptyVolume,

    /// A `Mesh3d` in the hierarchy points at an asset that is not in `Assets<Mesh>` yet.
    #[error("mesh on {0:?} has not finished loading")]
    MeshNotLoaded(Entity),

    /// Vertical field of view outside `(0, 180)` degrees.
    #[error("invalid vertical field of view: {0} degrees")]
    InvalidFov(f32),

    /// Viewport aspect ratio that is not strictly positive.
    #[error("invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),

    /// No active perspective camera to zoom toward.
    #[error("no active perspective camera")]
    MissingCamera,
}
