use glam::{IVec3, Vec3};

/// Axis-aligned face direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Per-direction geometry: the axis the normal lies on, its sign and the two
/// in-plane axes used as mask (row, column)
#[derive(Debug, Clone, Copy)]
struct DirectionInfo {
    axis: usize,
    positive: bool,
    row_axis: usize,
    col_axis: usize,
}

#[rustfmt::skip]
const TABLE: [DirectionInfo; 6] = [
    DirectionInfo { axis: 0, positive: true, row_axis: 1, col_axis: 2 },
    DirectionInfo { axis: 0, positive: false, row_axis: 1, col_axis: 2 },
    DirectionInfo { axis: 1, positive: true, row_axis: 0, col_axis: 2 },
    DirectionInfo { axis: 1, positive: false, row_axis: 0, col_axis: 2 },
    DirectionInfo { axis: 2, positive: true, row_axis: 0, col_axis: 1 },
    DirectionInfo { axis: 2, positive: false, row_axis: 0, col_axis: 1 },
];

impl Direction {
    /// All six directions, in mask order
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    #[inline]
    fn info(self) -> DirectionInfo {
        TABLE[self.index()]
    }

    /// Position of this direction in [`Direction::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::PosX => 0,
            Direction::NegX => 1,
            Direction::PosY => 2,
            Direction::NegY => 3,
            Direction::PosZ => 4,
            Direction::NegZ => 5,
        }
    }

    /// Axis index (0 = x, 1 = y, 2 = z) the normal lies on
    #[inline]
    pub fn axis(self) -> usize {
        self.info().axis
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.info().positive
    }

    /// The two axes orthogonal to this direction as (row axis, column axis)
    #[inline]
    pub fn plane_axes(self) -> (usize, usize) {
        let info = self.info();
        (info.row_axis, info.col_axis)
    }

    /// Convert to unit normal
    pub fn as_vec3(self) -> Vec3 {
        self.as_ivec3().as_vec3()
    }

    /// Convert to integer step
    pub fn as_ivec3(self) -> IVec3 {
        let mut step = IVec3::ZERO;
        step[self.axis()] = if self.is_positive() { 1 } else { -1 };
        step
    }

    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::PosX => "pos_x",
            Direction::NegX => "neg_x",
            Direction::PosY => "pos_y",
            Direction::NegY => "neg_y",
            Direction::PosZ => "pos_z",
            Direction::NegZ => "neg_z",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
