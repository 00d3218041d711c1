//! Per-direction face masks
//!
//! A mask flattens the grid along one axis. Each cell records the color of
//! the outward face seen from that direction, or `None` when no exposed,
//! color-distinct face was found.

use crate::color::Rgba;
use crate::direction::Direction;
use crate::grid::VoxelGrid;
use glam::UVec3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    direction: Direction,
    rows: usize,
    cols: usize,
    layer: u32,
    cells: Vec<Option<Rgba>>,
}

impl Mask {
    /// Create an all-`None` mask
    pub fn new(direction: Direction, rows: usize, cols: usize, layer: u32) -> Self {
        Self {
            direction,
            rows,
            cols,
            layer,
            cells: vec![None; rows * cols],
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Fixed-axis coordinate of the outermost slice in this direction
    #[inline]
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// True when the mask has zero rows or columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Rgba> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<Rgba>) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = value;
        }
    }

    /// Number of `Some` cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Build all six masks, in [`Direction::ALL`] order
pub fn build_masks(grid: &VoxelGrid) -> [Mask; 6] {
    Direction::ALL.map(|dir| build_mask(grid, dir))
}

/// Build the mask for one direction.
///
/// Slices are scanned from the face opposite `dir` toward the face `dir`
/// points at, so the last visible voxel written into a cell is the one
/// nearest to `dir`. A visible voxel writes its color when it sits on the
/// grid boundary in `dir`, or its neighbor in `dir` is empty or a different
/// color; otherwise (including interior voxels) it writes `None`. Empty
/// cells do not write.
pub fn build_mask(grid: &VoxelGrid, dir: Direction) -> Mask {
    let size = grid.size();
    let axis = dir.axis();
    let (row_axis, col_axis) = dir.plane_axes();
    let extent = size[axis];
    let layer = if dir.is_positive() {
        extent.saturating_sub(1)
    } else {
        0
    };

    let mut mask = Mask::new(dir, size[row_axis] as usize, size[col_axis] as usize, layer);
    if mask.is_empty() || extent == 0 {
        return mask;
    }

    for step in 0..extent {
        let depth = if dir.is_positive() { step } else { extent - 1 - step };
        for row in 0..size[row_axis] {
            for col in 0..size[col_axis] {
                let mut pos = UVec3::ZERO;
                pos[axis] = depth;
                pos[row_axis] = row;
                pos[col_axis] = col;

                let Some(voxel) = grid.get(pos) else {
                    continue;
                };
                if !voxel.is_visible {
                    continue;
                }

                let exposed = !voxel.is_interior
                    && match grid.neighbor(pos, dir) {
                        None => true,
                        Some(next) => !next.is_visible || next.color != voxel.color,
                    };
                mask.set(row as usize, col as usize, exposed.then_some(voxel.color));
            }
        }
    }

    tracing::debug!(
        direction = %dir,
        rows = mask.rows,
        cols = mask.cols,
        filled = mask.filled_count(),
        "built mask"
    );
    mask
}
