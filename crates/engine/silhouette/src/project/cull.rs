use crate::direction::Direction;
use crate::mesh::Triangle;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// The viewer looks along +Z, so faces pointing at -Z face the camera
pub const TOWARD_VIEWER: Vec3 = Vec3::NEG_Z;

/// Faces whose facing value does not exceed this are edge-on and dropped
pub const FACING_EPSILON: f32 = 1e-4;

/// How triangles facing away from the viewer are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullStrategy {
    /// Rotate the triangle's tagged face direction and test it against the
    /// view axis. One decision per direction per rotation.
    #[default]
    DirectionTagged,
    /// Use the cross-product normal of the transformed triangle
    GeometricNormal,
}

/// Which of the six face directions point at the viewer under a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingTable([bool; 6]);

impl FacingTable {
    pub fn new(transform: &Mat4) -> Self {
        Self(Direction::ALL.map(|dir| {
            let rotated = transform.transform_vector3(dir.as_vec3());
            rotated.normalize_or_zero().dot(TOWARD_VIEWER) > FACING_EPSILON
        }))
    }

    #[inline]
    pub fn faces_viewer(&self, dir: Direction) -> bool {
        self.0[dir.index()]
    }
}

/// True when an already transformed triangle faces the viewer
#[inline]
pub fn normal_faces_viewer(transformed: &Triangle) -> bool {
    transformed.normal().normalize_or_zero().dot(TOWARD_VIEWER) > FACING_EPSILON
}

impl CullStrategy {
    /// Decide whether `transformed` (the triangle after `transform`) is kept
    pub(crate) fn keep(self, facing: &FacingTable, transformed: &Triangle) -> bool {
        match self {
            CullStrategy::DirectionTagged => facing.faces_viewer(transformed.direction),
            CullStrategy::GeometricNormal => normal_faces_viewer(transformed),
        }
    }
}
