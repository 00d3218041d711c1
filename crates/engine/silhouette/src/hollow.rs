use crate::direction::Direction;
use crate::grid::VoxelGrid;

/// Mark every solid cell whose six neighbors are all solid as interior.
///
/// All cells are evaluated against the unmodified grid before any flag is
/// written, so the result does not depend on visiting order. Cells on the
/// grid boundary always have a missing neighbor and are never interior.
/// `is_visible` is left untouched. Returns the number of interior cells.
pub fn hollow(grid: &mut VoxelGrid) -> usize {
    let enclosed: Vec<bool> = grid
        .iter()
        .map(|(pos, voxel)| {
            voxel.is_visible
                && Direction::ALL
                    .iter()
                    .all(|&dir| grid.neighbor(pos, dir).is_some_and(|n| n.is_visible))
        })
        .collect();

    let mut interior = 0;
    for (voxel, enclosed) in grid.cells_mut().iter_mut().zip(enclosed) {
        voxel.is_interior = enclosed;
        interior += enclosed as usize;
    }

    tracing::debug!(
        interior,
        surface = grid.surface_count(),
        "hollowed voxel grid"
    );
    interior
}
