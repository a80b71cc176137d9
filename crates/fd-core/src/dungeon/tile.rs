//! Tile grid handed to the renderer

use serde::{Deserialize, Serialize};

use super::{CharGrid, Symbol};

/// Per-cell gameplay record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub blocked: bool,
    pub blocks_vision: bool,
}

impl Tile {
    /// A tile that blocks vision exactly when it blocks movement
    pub const fn new(blocked: bool) -> Self {
        Self {
            blocked,
            blocks_vision: blocked,
        }
    }

    pub const fn with_vision(blocked: bool, blocks_vision: bool) -> Self {
        Self {
            blocked,
            blocks_vision,
        }
    }

    /// Tile for a blueprint symbol: only floor is passable
    pub const fn from_symbol(symbol: Symbol) -> Self {
        Self::new(!matches!(symbol, Symbol::Floor))
    }

    /// Open the tile up
    pub fn dig(&mut self) {
        if self.blocked {
            self.blocked = false;
            self.blocks_vision = false;
        }
    }

    /// Close the tile off
    pub fn fill(&mut self) {
        if !self.blocked {
            self.blocked = true;
            self.blocks_vision = true;
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Grid of tiles, indexed `[x][y]` like the blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
}

impl TileGrid {
    /// All-blocked grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::default(); height]; width],
        }
    }

    /// Derive one tile per blueprint cell
    pub fn from_blueprint(grid: &CharGrid) -> Self {
        let mut tiles = Self::new(grid.width(), grid.height());
        for (x, y, symbol) in grid.iter() {
            tiles.tiles[x][y] = Tile::from_symbol(symbol);
        }
        tiles
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get(x).and_then(|col| col.get(y))
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(x).and_then(|col| col.get_mut(y))
    }

    /// Number of passable tiles
    pub fn open_count(&self) -> usize {
        self.tiles.iter().flatten().filter(|t| !t.blocked).count()
    }
}
