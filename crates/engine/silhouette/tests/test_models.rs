//! Shared voxel models and `.vox` byte builders for integration tests

#![allow(dead_code)]

use glam::UVec3;
use silhouette::{Rgba, VoxelGrid};
use std::path::{Path, PathBuf};

pub const RED: Rgba = Rgba::rgb(255, 0, 0);
pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);

// ============================================================================
// Grid models
// ============================================================================

/// Fully solid `n`³ cube in one color
pub fn solid_cube(n: u32, color: Rgba) -> VoxelGrid {
    let mut grid = VoxelGrid::new(UVec3::splat(n));
    grid.fill_box(UVec3::ZERO, UVec3::splat(n - 1), color);
    grid
}

/// 10³ cube with two corner notches carved out
///
/// - a 1×1×4 column at x=0, y=0, z=0..=3
/// - a 1×7×8 slab at x=9, y=3..=9, z=2..=9
///
/// 940 voxels remain, 470 of them enclosed.
pub fn notched_cube() -> VoxelGrid {
    let mut grid = solid_cube(10, Rgba::WHITE);
    for z in 0..=3 {
        grid.set(UVec3::new(0, 0, z), silhouette::Voxel::EMPTY);
    }
    for y in 3..=9 {
        for z in 2..=9 {
            grid.set(UVec3::new(9, y, z), silhouette::Voxel::EMPTY);
        }
    }
    grid
}

/// Solid sphere of radius `r` centred in a `(2r + 1)`³ grid
pub fn sphere(r: u32) -> VoxelGrid {
    let n = 2 * r + 1;
    let mut grid = VoxelGrid::new(UVec3::splat(n));
    let centre = UVec3::splat(r).as_ivec3();
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let pos = UVec3::new(x, y, z);
                let d = pos.as_ivec3() - centre;
                if d.length_squared() <= (r * r) as i32 {
                    grid.fill_box(pos, pos, BLUE);
                }
            }
        }
    }
    grid
}

/// Cube split into a red lower half and green upper half along y
pub fn two_tone_cube(n: u32) -> VoxelGrid {
    let mut grid = solid_cube(n, RED);
    grid.fill_box(UVec3::new(0, n / 2, 0), UVec3::splat(n - 1), GREEN);
    grid
}

// ============================================================================
// .vox byte builders
// ============================================================================

/// Assembles `.vox` files chunk by chunk
#[derive(Debug, Clone, Default)]
pub struct VoxFile {
    children: Vec<u8>,
}

pub fn chunk(id: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(content.len() as u32).to_le_bytes());
    out.extend_from_slice(&(children.len() as u32).to_le_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(children);
    out
}

pub fn header() -> Vec<u8> {
    let mut out = b"VOX ".to_vec();
    out.extend_from_slice(&150u32.to_le_bytes());
    out
}

impl VoxFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, x: u32, y: u32, z: u32) -> Self {
        let content: Vec<u8> = [x, y, z].iter().flat_map(|v| v.to_le_bytes()).collect();
        self.children.extend(chunk(b"SIZE", &content, &[]));
        self
    }

    pub fn voxels(mut self, voxels: &[[u8; 4]]) -> Self {
        let mut content = (voxels.len() as u32).to_le_bytes().to_vec();
        content.extend(voxels.iter().flatten());
        self.children.extend(chunk(b"XYZI", &content, &[]));
        self
    }

    /// Palette chunk; `colors[k]` becomes palette index `k + 1`
    pub fn palette(mut self, colors: &[Rgba]) -> Self {
        let mut content = Vec::with_capacity(1024);
        for k in 0..256 {
            let c = colors.get(k).copied().unwrap_or(Rgba::TRANSPARENT);
            content.extend([c.r, c.g, c.b, c.a]);
        }
        self.children.extend(chunk(b"RGBA", &content, &[]));
        self
    }

    pub fn raw_chunk(mut self, id: &[u8; 4], content: &[u8]) -> Self {
        self.children.extend(chunk(id, content, &[]));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = header();
        out.extend(chunk(b"MAIN", &[], &self.children));
        out
    }

    /// Every visible cell of `grid`, with the given palette index
    pub fn from_grid(grid: &VoxelGrid, color_index: u8) -> Self {
        let size = grid.size();
        let voxels: Vec<[u8; 4]> = grid
            .iter()
            .filter(|(_, v)| v.is_visible)
            .map(|(p, _)| [p.x as u8, p.y as u8, p.z as u8, color_index])
            .collect();
        Self::new().size(size.x, size.y, size.z).voxels(&voxels)
    }
}

/// Write `<dir>/<name>.vox`, creating `dir`
pub fn write_vox(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create vox directory");
    let path = dir.join(format!("{name}.vox"));
    std::fs::write(&path, bytes).expect("Failed to write vox file");
    path
}
