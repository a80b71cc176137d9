//! Wall dilation
//!
//! Walls are the 8-connected dilation of the floor region minus the floor
//! itself. Cells outside the grid contribute nothing.

use super::{CharGrid, Symbol};

/// Moore neighborhood offsets
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Check if any of the 8 neighbors of `(x, y)` is floor
fn touches_floor(mask: &CharGrid, x: usize, y: usize) -> bool {
    NEIGHBORS.iter().any(|&(dx, dy)| {
        match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
            (Some(nx), Some(ny)) => mask.get(nx, ny) == Some(Symbol::Floor),
            _ => false,
        }
    })
}

/// Cells that touch floor (diagonals included) without being floor
pub fn wall_ring(mask: &CharGrid) -> Vec<(usize, usize)> {
    mask.iter()
        .filter(|&(x, y, s)| s != Symbol::Floor && touches_floor(mask, x, y))
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Surround the floor of a mask with walls
///
/// Floor cells are never touched. The ring is computed in full before any
/// cell is written, so the result does not depend on scan order.
pub fn add_walls(mask: &mut CharGrid) {
    for (x, y) in wall_ring(mask) {
        mask[(x, y)] = Symbol::Wall;
    }
}
