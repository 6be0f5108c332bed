//! Compound bounding volume extraction for an entity hierarchy.

use bevy::prelude::*;

use crate::error::ZoomError;

/// Axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Builds a box from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing all points, `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, point| {
            Some(acc.map_or(Self { min: point, max: point }, |b| Self {
                min: b.min.min(point),
                max: b.max.max(point),
            }))
        })
    }

    /// Smallest box enclosing both boxes.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Unions every box, seeding from the first one.
    /// Fails with `EmptyVolume` when there is nothing to union.
    pub fn union_all(boxes: impl IntoIterator<Item = Self>) -> Result<Self, ZoomError> {
        boxes
            .into_iter()
            .reduce(Self::union)
            .ok_or(ZoomError::EmptyVolume)
    }

    /// Extents along each axis
    pub fn size(&self) -> Vec3 { self.max - self.min }

    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
}

/// Bounds of a mesh in its own local space, from its position attribute.
pub fn mesh_bounds(mesh: &Mesh) -> Option<BoundingBox> {
    let positions = mesh
        .attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|a| a.as_float3())?;

    BoundingBox::from_points(positions.iter().map(|p| Vec3::from_array(*p)))
}

/// Unions the local-space bounds of every mesh on `root` and its descendants.
///
/// Each mesh contributes its geometry bounds as authored, without the node's transform
/// and without the root's scale; the pose calculator applies scale explicitly. Nodes without
/// a `Mesh3d`, or whose mesh has no positions, are skipped. A `Mesh3d` whose asset is not
/// loaded yet yields `MeshNotLoaded` so the caller can retry on a later frame.
pub fn compute_compound_aabb(
    root: Entity,
    children_query: &Query<&Children>,
    mesh_query: &Query<&Mesh3d>,
    meshes: &Assets<Mesh>,
) -> Result<BoundingBox, ZoomError> {
    let mut boxes = Vec::new();
    for entity in std::iter::once(root).chain(children_query.iter_descendants(root)) {
        let Ok(mesh3d) = mesh_query.get(entity) else {
            continue;
        };
        let Some(mesh) = meshes.get(&mesh3d.0) else {
            return Err(ZoomError::MeshNotLoaded(entity));
        };
        boxes.extend(mesh_bounds(mesh));
    }

    BoundingBox::union_all(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: BoundingBox, b: BoundingBox) -> bool {
        a.min.abs_diff_eq(b.min, 1e-6) && a.max.abs_diff_eq(b.max, 1e-6)
    }

    #[test]
    fn new_orders_corners() {
        let b = BoundingBox::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn from_points_encloses_all() {
        let b = BoundingBox::from_points([
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-1.0, 4.0, 2.0),
            Vec3::new(0.0, -3.0, -2.5),
        ])
        .unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -3.0, -2.5));
        assert_eq!(b.max, Vec3::new(0.5, 4.0, 2.0));
        assert_eq!(b.size(), Vec3::new(1.5, 7.0, 4.5));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn union_is_commutative_and_associative() {
        let a = BoundingBox::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        let b = BoundingBox::new(Vec3::new(0.5, -2.0, 0.3), Vec3::new(3.0, 0.2, 0.4));
        let c = BoundingBox::new(Vec3::new(-0.1, 0.1, -5.0), Vec3::new(0.1, 0.2, -4.0));

        assert!(approx_eq(a.union(b), b.union(a)));
        assert!(approx_eq(a.union(b).union(c), a.union(b.union(c))));

        let forward = BoundingBox::union_all([a, b, c]).unwrap();
        let backward = BoundingBox::union_all([c, b, a]).unwrap();
        let shuffled = BoundingBox::union_all([b, c, a]).unwrap();
        assert!(approx_eq(forward, backward));
        assert!(approx_eq(forward, shuffled));
    }

    #[test]
    fn union_all_without_boxes_is_empty_volume() {
        let result = BoundingBox::union_all(Vec::new());
        assert_eq!(result, Err(ZoomError::EmptyVolume));
    }

    #[test]
    fn mesh_bounds_of_cuboid() {
        let mesh = Mesh::from(Cuboid::new(2.0, 4.0, 6.0));
        let b = mesh_bounds(&mesh).unwrap();
        assert!(approx_eq(
            b,
            BoundingBox::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0))
        ));
        assert_eq!(b.center(), Vec3::ZERO);
    }
}
