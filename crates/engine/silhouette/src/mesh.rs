//! Greedy meshing of face masks into quads and triangles

use crate::color::Rgba;
use crate::direction::Direction;
use crate::mask::Mask;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A flat-colored triangle tagged with the face direction it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub color: Rgba,
    pub direction: Direction,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: Rgba, direction: Direction) -> Self {
        Self {
            vertices: [v0, v1, v2],
            color,
            direction,
        }
    }

    /// Unnormalized geometric normal `(v1 - v0) x (v2 - v0)`
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0)
    }

    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }
}

/// A solid rectangle of identically colored mask cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub direction: Direction,
    pub layer: u32,
    pub row: usize,
    pub col: usize,
    /// Extent in rows
    pub height: usize,
    /// Extent in columns
    pub width: usize,
    pub color: Rgba,
}

impl Quad {
    /// Number of mask cells covered
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// World position of a mask lattice point on this quad's face
    fn corner(&self, row: usize, col: usize) -> Vec3 {
        let (row_axis, col_axis) = self.direction.plane_axes();
        let offset = if self.direction.is_positive() { 1 } else { 0 };
        let mut p = Vec3::ZERO;
        p[self.direction.axis()] = (self.layer + offset) as f32;
        p[row_axis] = row as f32;
        p[col_axis] = col as f32;
        p
    }

    /// Split into two triangles wound counter-clockwise seen from outside,
    /// so each normal points along `direction`
    pub fn triangles(&self) -> [Triangle; 2] {
        let p00 = self.corner(self.row, self.col);
        let p10 = self.corner(self.row + self.height, self.col);
        let p01 = self.corner(self.row, self.col + self.width);
        let p11 = self.corner(self.row + self.height, self.col + self.width);

        let (row_axis, col_axis) = self.direction.plane_axes();
        let row_dir = Vec3::AXES[row_axis];
        let col_dir = Vec3::AXES[col_axis];
        let aligned = row_dir.cross(col_dir).dot(self.direction.as_vec3()) > 0.0;

        let (a, b) = if aligned { (p10, p01) } else { (p01, p10) };
        [
            Triangle::new(p00, a, b, self.color, self.direction),
            Triangle::new(b, a, p11, self.color, self.direction),
        ]
    }
}

/// Which quad cover to emit for a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshStrategy {
    /// Merge runs of identical color into rectangles
    #[default]
    Greedy,
    /// One quad per filled cell
    PerCell,
}

impl MeshStrategy {
    pub fn quads(self, mask: &Mask) -> Vec<Quad> {
        match self {
            MeshStrategy::Greedy => greedy_quads(mask),
            MeshStrategy::PerCell => cell_quads(mask),
        }
    }

    pub fn mesh(self, masks: &[Mask]) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for mask in masks {
            if mask.is_empty() {
                tracing::debug!(direction = %mask.direction(), "skipping empty mask");
                continue;
            }
            let quads = self.quads(mask);
            tracing::debug!(direction = %mask.direction(), quads = quads.len(), "meshed mask");
            triangles.extend(quads.iter().flat_map(Quad::triangles));
        }
        triangles
    }
}

/// Greedy rectangle cover of a mask.
///
/// Cells are visited row-major. From each unvisited filled cell the run is
/// first widened along the row while the color matches, then grown down one
/// row at a time while the whole candidate row matches. The cover is
/// deterministic, not minimal.
pub fn greedy_quads(mask: &Mask) -> Vec<Quad> {
    let (rows, cols) = (mask.rows(), mask.cols());
    let mut quads = Vec::new();
    if mask.is_empty() {
        return quads;
    }

    let mut visited = vec![false; rows * cols];
    let open = |visited: &[bool], row: usize, col: usize, color: Rgba| {
        !visited[row * cols + col] && mask.get(row, col) == Some(color)
    };

    for row in 0..rows {
        for col in 0..cols {
            if visited[row * cols + col] {
                continue;
            }
            let Some(color) = mask.get(row, col) else {
                continue;
            };

            let mut width = 1;
            while col + width < cols && open(&visited, row, col + width, color) {
                width += 1;
            }

            let mut height = 1;
            while row + height < rows
                && (col..col + width).all(|c| open(&visited, row + height, c, color))
            {
                height += 1;
            }

            for r in row..row + height {
                visited[r * cols + col..r * cols + col + width].fill(true);
            }

            quads.push(Quad {
                direction: mask.direction(),
                layer: mask.layer(),
                row,
                col,
                height,
                width,
                color,
            });
        }
    }
    quads
}

/// Unmerged cover: one unit quad per filled cell
pub fn cell_quads(mask: &Mask) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(mask.filled_count());
    for row in 0..mask.rows() {
        for col in 0..mask.cols() {
            if let Some(color) = mask.get(row, col) {
                quads.push(Quad {
                    direction: mask.direction(),
                    layer: mask.layer(),
                    row,
                    col,
                    height: 1,
                    width: 1,
                    color,
                });
            }
        }
    }
    quads
}

/// Greedy-mesh every mask into triangles
pub fn greedy_mesh(masks: &[Mask]) -> Vec<Triangle> {
    MeshStrategy::Greedy.mesh(masks)
}

/// Per-cell mesh of every mask
pub fn cell_mesh(masks: &[Mask]) -> Vec<Triangle> {
    MeshStrategy::PerCell.mesh(masks)
}
