//! Dense voxel grid
//!
//! Cells live in a single flat buffer indexed `x * sy * sz + y * sz + z`.
//! Every coordinate inside `size` holds a [`Voxel`]; cells that were never
//! painted are invisible.

use crate::color::Rgba;
use crate::direction::Direction;
use glam::{IVec3, UVec3, Vec3};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Voxel {
    pub color: Rgba,
    /// The cell holds solid material
    pub is_visible: bool,
    /// Set by hollowing when all six neighbors are solid
    pub is_interior: bool,
}

impl Voxel {
    pub const EMPTY: Voxel = Voxel {
        color: Rgba::TRANSPARENT,
        is_visible: false,
        is_interior: false,
    };

    pub const fn solid(color: Rgba) -> Self {
        Self {
            color,
            is_visible: true,
            is_interior: false,
        }
    }

    /// Solid and not enclosed
    #[inline]
    pub fn is_exposed(&self) -> bool {
        self.is_visible && !self.is_interior
    }
}

/// Position and color of a voxel that survived hollowing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVoxel {
    pub position: Vec3,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    size: UVec3,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Create a grid with every cell empty
    pub fn new(size: UVec3) -> Self {
        let len = size.x as usize * size.y as usize * size.z as usize;
        Self {
            size,
            voxels: vec![Voxel::EMPTY; len],
        }
    }

    #[inline]
    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// True when any dimension is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Check a signed coordinate against the grid bounds
    #[inline]
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all() && pos.as_uvec3().cmplt(self.size).all()
    }

    #[inline]
    fn index(&self, pos: UVec3) -> Option<usize> {
        if !pos.cmplt(self.size).all() {
            return None;
        }
        let (sy, sz) = (self.size.y as usize, self.size.z as usize);
        Some(pos.x as usize * sy * sz + pos.y as usize * sz + pos.z as usize)
    }

    #[inline]
    fn position(&self, index: usize) -> UVec3 {
        let (sy, sz) = (self.size.y as usize, self.size.z as usize);
        UVec3::new(
            (index / (sy * sz)) as u32,
            ((index / sz) % sy) as u32,
            (index % sz) as u32,
        )
    }

    pub fn get(&self, pos: UVec3) -> Option<&Voxel> {
        self.index(pos).map(|i| &self.voxels[i])
    }

    pub fn get_mut(&mut self, pos: UVec3) -> Option<&mut Voxel> {
        self.index(pos).map(|i| &mut self.voxels[i])
    }

    /// Write a cell. Returns false when `pos` is outside the grid.
    pub fn set(&mut self, pos: UVec3, voxel: Voxel) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = voxel;
                true
            }
            None => false,
        }
    }

    /// Paint every cell in the inclusive box `min..=max` (clamped to the grid)
    pub fn fill_box(&mut self, min: UVec3, max: UVec3, color: Rgba) {
        if self.is_empty() {
            return;
        }
        let max = max.min(self.size - UVec3::ONE);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set(UVec3::new(x, y, z), Voxel::solid(color));
                }
            }
        }
    }

    /// The adjacent cell in `dir`, or None past the grid boundary
    pub fn neighbor(&self, pos: UVec3, dir: Direction) -> Option<&Voxel> {
        let next = pos.as_ivec3() + dir.as_ivec3();
        if !self.contains(next) {
            return None;
        }
        self.get(next.as_uvec3())
    }

    /// All cells with their coordinates, x-major
    pub fn iter(&self) -> impl Iterator<Item = (UVec3, &Voxel)> + '_ {
        self.voxels
            .iter()
            .enumerate()
            .map(|(i, voxel)| (self.position(i), voxel))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    pub fn visible_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_visible).count()
    }

    /// Visible cells that are not interior
    pub fn surface_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_exposed()).count()
    }

    /// Reset every interior flag so all solid cells count as surface again
    pub fn clear_interior(&mut self) {
        for voxel in &mut self.voxels {
            voxel.is_interior = false;
        }
    }

    /// Positions and colors of every exposed cell, x-major
    pub fn surface_voxels(&self) -> Vec<SurfaceVoxel> {
        self.iter()
            .filter(|(_, v)| v.is_exposed())
            .map(|(pos, v)| SurfaceVoxel {
                position: pos.as_vec3(),
                color: v.color,
            })
            .collect()
    }
}
