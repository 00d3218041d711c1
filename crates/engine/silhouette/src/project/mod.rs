//! Rotation, culling and flattening of meshed models onto the view plane
//!
//! The viewer sits on negative Z looking along +Z. Transforms rotate the
//! model about its centroid, culling drops faces pointing away from the
//! viewer and flattening keeps the XY of each surviving vertex.

mod cull;
mod raycast;

pub use cull::{normal_faces_viewer, CullStrategy, FacingTable, FACING_EPSILON, TOWARD_VIEWER};
pub use raycast::{RayCaster, MIN_RESOLUTION};

use crate::color::Rgba;
use crate::mesh::Triangle;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis the sweep rotates around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    X,
    #[default]
    Y,
    Z,
}

impl RotationAxis {
    pub fn as_vec3(self) -> Vec3 {
        match self {
            RotationAxis::X => Vec3::X,
            RotationAxis::Y => Vec3::Y,
            RotationAxis::Z => Vec3::Z,
        }
    }
}

/// How the vertices of a projection group are meant to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Points,
    /// Every three consecutive vertices form one triangle
    Triangles,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedVertex {
    pub position: Vec2,
    pub color: Rgba,
}

/// One flattened view of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub primitive: Primitive,
    pub vertices: Vec<ProjectedVertex>,
}

impl Projection {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of complete triangles (zero for point groups)
    pub fn triangle_count(&self) -> usize {
        match self.primitive {
            Primitive::Points => 0,
            Primitive::Triangles => self.vertices.len() / 3,
        }
    }

    /// Axis-aligned bounding box as (min, max), None when empty
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }

    /// Translate so the bounding box centre lands on `target`
    pub fn recenter(&mut self, target: Vec2) {
        let Some((min, max)) = self.bounds() else {
            return;
        };
        let offset = target - (min + max) * 0.5;
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }
}

/// Mean of all positions, zero for an empty set
pub fn centroid<I>(positions: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let (sum, count) = positions
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(sum, n), p| (sum + p, n + 1));
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Euler tilt in degrees, applied as `Rx * Ry * Rz`
pub fn tilt_matrix(degrees: Vec3) -> Mat4 {
    Mat4::from_rotation_x(degrees.x.to_radians())
        * Mat4::from_rotation_y(degrees.y.to_radians())
        * Mat4::from_rotation_z(degrees.z.to_radians())
}

/// Apply `rotation` about `centre` instead of the origin
pub fn about_centre(centre: Vec3, rotation: Mat4) -> Mat4 {
    Mat4::from_translation(centre) * rotation * Mat4::from_translation(-centre)
}

/// Rotation angles in degrees for a sweep of `intervals` steps.
///
/// Steps run from `intervals` down to 1, each at `i * 360 / intervals`
/// reduced modulo 360, so the full turn comes out as an exact 0.
pub fn sweep_angles(intervals: usize) -> Vec<f32> {
    let step = 360.0 / intervals.max(1) as f32;
    (1..=intervals)
        .rev()
        .map(|i| (i as f32 * step) % 360.0)
        .collect()
}

/// Model matrix for one sweep step
pub fn sweep_matrix(centre: Vec3, axis: RotationAxis, angle_degrees: f32, tilt: &Mat4) -> Mat4 {
    let rotation = Mat4::from_axis_angle(axis.as_vec3(), angle_degrees.to_radians());
    about_centre(centre, rotation * *tilt)
}

/// Projects triangle meshes onto the view plane
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    cull: CullStrategy,
}

impl Projector {
    pub fn new(cull: CullStrategy) -> Self {
        Self { cull }
    }

    /// One projection per rotation step around `axis`, after tilting by
    /// `tilt` degrees
    pub fn project_sweep(
        &self,
        triangles: &[Triangle],
        tilt: Vec3,
        axis: RotationAxis,
        intervals: usize,
    ) -> Vec<Projection> {
        let centre = triangle_centroid(triangles);
        let tilt = tilt_matrix(tilt);

        sweep_angles(intervals)
            .into_iter()
            .map(|angle| {
                let projection =
                    self.project_with(triangles, &sweep_matrix(centre, axis, angle, &tilt));
                tracing::debug!(
                    angle,
                    kept = projection.triangle_count(),
                    total = triangles.len(),
                    "projected sweep step"
                );
                projection
            })
            .collect()
    }

    /// A single projection at fixed Euler angles in degrees
    pub fn project_fixed(&self, triangles: &[Triangle], rotation: Vec3) -> Projection {
        let centre = triangle_centroid(triangles);
        self.project_with(triangles, &about_centre(centre, tilt_matrix(rotation)))
    }

    /// Transform, cull and flatten under an arbitrary model matrix
    pub fn project_with(&self, triangles: &[Triangle], transform: &Mat4) -> Projection {
        let facing = FacingTable::new(transform);
        let mut projection = Projection::new(Primitive::Triangles);

        for triangle in triangles {
            let transformed = Triangle {
                vertices: triangle.vertices.map(|v| transform.transform_point3(v)),
                ..*triangle
            };
            if !self.cull.keep(&facing, &transformed) {
                continue;
            }
            projection
                .vertices
                .extend(transformed.vertices.iter().map(|v| ProjectedVertex {
                    position: v.truncate(),
                    color: transformed.color,
                }));
        }
        projection
    }
}

fn triangle_centroid(triangles: &[Triangle]) -> Vec3 {
    centroid(triangles.iter().flat_map(|t| t.vertices))
}
