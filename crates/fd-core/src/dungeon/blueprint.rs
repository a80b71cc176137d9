//! The level blueprint: the authoritative record of placed rooms

use serde::{Deserialize, Serialize};

use super::{CharGrid, Room, Symbol};

/// Global character grid that rooms are merged into
///
/// Starts all [`Symbol::Empty`]. Occupied cells never go back to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    grid: CharGrid,
}

impl Blueprint {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: CharGrid::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Get the symbol at a coordinate, `None` outside the map
    pub fn get(&self, x: usize, y: usize) -> Option<Symbol> {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &CharGrid {
        &self.grid
    }

    /// Write a room cell; empty never overwrites
    pub(crate) fn write(&mut self, x: usize, y: usize, symbol: Symbol) {
        if symbol != Symbol::Empty {
            self.grid.set(x, y, symbol);
        }
    }

    /// Merge a designed room if its floor lands on unoccupied cells
    ///
    /// Returns false (and leaves the blueprint untouched) on collision.
    pub fn try_add(&mut self, room: &Room) -> bool {
        if room.collision_check(self) {
            return false;
        }
        room.add_to_blueprint(self);
        true
    }
}
