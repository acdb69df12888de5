//! Grid geometry: bounds checks and free-cell placement.

use crate::game::types::Cell;
use rand::Rng;

/// True if the cell lies inside the square grid.
pub fn in_bounds(cell: Cell, grid_size: i16) -> bool {
    cell.x >= 0 && cell.x < grid_size && cell.y >= 0 && cell.y < grid_size
}

/// Pick a uniformly random cell not rejected by `occupied`.
///
/// The search is bounded: after `max_attempts` misses it returns `None`
/// rather than spinning on a nearly full board. Callers decide whether that
/// means "skip this placement" or "fall back to a scan".
pub fn random_free_cell<R: Rng, F: Fn(Cell) -> bool>(
    rng: &mut R,
    grid_size: i16,
    occupied: F,
    max_attempts: u32,
) -> Option<Cell> {
    for _ in 0..max_attempts {
        let cell = Cell::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !occupied(cell) {
            return Some(cell);
        }
    }
    None
}

/// First free cell in row-major order, if the board has one at all.
///
/// Deterministic fallback for placements that must succeed whenever any
/// free cell exists.
pub fn first_free_cell<F: Fn(Cell) -> bool>(grid_size: i16, occupied: F) -> Option<Cell> {
    for y in 0..grid_size {
        for x in 0..grid_size {
            let cell = Cell::new(x, y);
            if !occupied(cell) {
                return Some(cell);
            }
        }
    }
    None
}
