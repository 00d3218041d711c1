use super::{
    centroid, sweep_angles, sweep_matrix, tilt_matrix, Primitive, ProjectedVertex, Projection,
    RotationAxis,
};
use crate::grid::{SurfaceVoxel, VoxelGrid};
use glam::{IVec2, IVec3, Vec2, Vec3};
use std::collections::{HashMap, HashSet};

/// Finest ray spacing accepted, in voxels
pub const MIN_RESOLUTION: f32 = 0.25;

/// Point-cloud projection by casting rays through the rotated surface voxels.
///
/// Rays run parallel to the view axis on an `(x, y)` lattice with spacing
/// `resolution`, stepping from the far face `z = size.z` toward `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCaster {
    resolution: f32,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

impl RayCaster {
    /// Non-positive or non-finite resolutions fall back to 1.0; finer ones
    /// are raised to [`MIN_RESOLUTION`]
    pub fn new(resolution: f32) -> Self {
        if resolution.is_finite() && resolution > 0.0 {
            Self {
                resolution: resolution.max(MIN_RESOLUTION),
            }
        } else {
            Self::default()
        }
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// One point projection per sweep step.
    ///
    /// Surface voxels are rotated about their centroid with the same sweep
    /// order and matrices the triangle projector uses.
    pub fn project_onto_planes(
        &self,
        grid: &VoxelGrid,
        intervals: usize,
        axis: RotationAxis,
        tilt: Vec3,
    ) -> Vec<Projection> {
        let surface = grid.surface_voxels();
        let centre = centroid(surface.iter().map(|v| v.position));
        let tilt = tilt_matrix(tilt);

        sweep_angles(intervals)
            .into_iter()
            .map(|angle| {
                let transform = sweep_matrix(centre, axis, angle, &tilt);
                let rotated: Vec<SurfaceVoxel> = surface
                    .iter()
                    .map(|v| SurfaceVoxel {
                        position: transform.transform_point3(v.position),
                        color: v.color,
                    })
                    .collect();
                let projection = self.cast(&rotated, grid.size().as_vec3());
                tracing::debug!(
                    angle,
                    hits = projection.len(),
                    surface = surface.len(),
                    "ray cast sweep step"
                );
                projection
            })
            .collect()
    }

    fn cast(&self, voxels: &[SurfaceVoxel], extent: Vec3) -> Projection {
        let r = self.resolution;
        let index = BucketIndex::new(voxels, r);
        let columns = (extent.x / r).ceil() as usize;
        let rows = (extent.y / r).ceil() as usize;
        let steps = (extent.z / r).floor() as usize;

        let mut seen = HashSet::new();
        let mut projection = Projection::new(Primitive::Points);

        for i in 0..columns {
            let x = i as f32 * r;
            if x >= extent.x {
                break;
            }
            for j in 0..rows {
                let y = j as f32 * r;
                if y >= extent.y {
                    break;
                }
                if !index.column_near(Vec2::new(x, y)) {
                    continue;
                }
                for k in 0..=steps {
                    let sample = Vec3::new(x, y, extent.z - k as f32 * r);
                    let Some(hit) = index.first_within(voxels, sample, r) else {
                        continue;
                    };
                    if seen.insert(hit) {
                        let voxel = &voxels[hit];
                        projection.vertices.push(ProjectedVertex {
                            position: voxel.position.truncate(),
                            color: voxel.color,
                        });
                    }
                    break;
                }
            }
        }
        projection
    }
}

/// Uniform hash grid over voxel positions with cell size equal to the search
/// radius, so a query only has to look at the 27 surrounding buckets
struct BucketIndex {
    cell: f32,
    buckets: HashMap<IVec3, Vec<usize>>,
    /// `(x, y)` keys of every non-empty bucket
    columns: HashSet<IVec2>,
}

impl BucketIndex {
    fn new(voxels: &[SurfaceVoxel], cell: f32) -> Self {
        let mut buckets: HashMap<IVec3, Vec<usize>> = HashMap::new();
        for (i, voxel) in voxels.iter().enumerate() {
            buckets
                .entry(Self::key(voxel.position, cell))
                .or_default()
                .push(i);
        }
        let columns = buckets.keys().map(|key| key.truncate()).collect();
        Self {
            cell,
            buckets,
            columns,
        }
    }

    /// Whether any voxel could be in range of a ray through `(x, y)`
    fn column_near(&self, point: Vec2) -> bool {
        let centre = (point / self.cell).floor().as_ivec2();
        (-1..=1).any(|dx| {
            (-1..=1).any(|dy| self.columns.contains(&(centre + IVec2::new(dx, dy))))
        })
    }

    fn key(position: Vec3, cell: f32) -> IVec3 {
        (position / cell).floor().as_ivec3()
    }

    /// Lowest index among voxels strictly closer than `radius`
    fn first_within(&self, voxels: &[SurfaceVoxel], point: Vec3, radius: f32) -> Option<usize> {
        let centre = Self::key(point, self.cell);
        let limit = radius * radius;
        let mut first: Option<usize> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.buckets.get(&(centre + IVec3::new(dx, dy, dz))) else {
                        continue;
                    };
                    // buckets hold ascending indices
                    let hit = bucket
                        .iter()
                        .copied()
                        .take_while(|&i| first.map_or(true, |j| i < j))
                        .find(|&i| voxels[i].position.distance_squared(point) < limit);
                    if hit.is_some() {
                        first = hit;
                    }
                }
            }
        }
        first
    }
}
