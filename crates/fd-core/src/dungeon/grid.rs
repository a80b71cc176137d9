//! Character grids: room masks and the level blueprint

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Blueprint cell state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Symbol {
    /// Undug rock
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
    /// Reserved for shaped walls, no generator emits it yet
    Corner = 3,
}

impl Symbol {
    /// Blueprint character for this symbol (also the prefab file format)
    pub const fn to_char(self) -> char {
        match self {
            Symbol::Empty => 'x',
            Symbol::Wall => 'w',
            Symbol::Floor => 'f',
            Symbol::Corner => 'c',
        }
    }

    /// Parse a blueprint character
    pub const fn from_char(c: char) -> Option<Symbol> {
        match c {
            'x' => Some(Symbol::Empty),
            'w' => Some(Symbol::Wall),
            'f' => Some(Symbol::Floor),
            'c' => Some(Symbol::Corner),
            _ => None,
        }
    }

    /// Floor and wall cells belong to some room
    pub const fn is_occupied(self) -> bool {
        matches!(self, Symbol::Wall | Symbol::Floor)
    }
}

/// A width x height grid of [`Symbol`]s, indexed `[(x, y)]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharGrid {
    width: usize,
    height: usize,
    /// Column-major cells, `cells[x][y]`
    cells: Vec<Vec<Symbol>>,
}

impl CharGrid {
    /// Create a grid filled with [`Symbol::Empty`]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Symbol::Empty; height]; width],
        }
    }

    /// Build a grid from text rows, one string per `y`
    ///
    /// Returns `None` if the rows are ragged or contain unknown characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return None;
            }
            for (x, c) in row.chars().enumerate() {
                grid.cells[x][y] = Symbol::from_char(c)?;
            }
        }
        Some(grid)
    }

    /// Text rows in blueprint characters, one string per `y`
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.cells[x][y].to_char()).collect())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a coordinate lies inside the grid
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get the symbol at a coordinate, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Symbol> {
        self.cells.get(x).and_then(|col| col.get(y)).copied()
    }

    /// Set the symbol at a coordinate; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, symbol: Symbol) {
        if self.in_bounds(x, y) {
            self.cells[x][y] = symbol;
        }
    }

    /// Paint `[x, x + w) x [y, y + h)`, clipped to the grid
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, symbol: Symbol) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for col in self.cells.iter_mut().take(x_end).skip(x) {
            for cell in col.iter_mut().take(y_end).skip(y) {
                *cell = symbol;
            }
        }
    }

    /// Mirror top to bottom
    pub fn flip_vertical(&mut self) {
        for col in &mut self.cells {
            col.reverse();
        }
    }

    /// Mirror left to right
    pub fn flip_horizontal(&mut self) {
        self.cells.reverse();
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&s| s == symbol)
            .count()
    }

    /// Iterate over all cells as `(x, y, symbol)`, column by column
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Symbol)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(x, col)| col.iter().enumerate().map(move |(y, &s)| (x, y, s)))
    }
}

impl Index<(usize, usize)> for CharGrid {
    type Output = Symbol;

    fn index(&self, (x, y): (usize, usize)) -> &Symbol {
        &self.cells[x][y]
    }
}

impl IndexMut<(usize, usize)> for CharGrid {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Symbol {
        &mut self.cells[x][y]
    }
}
