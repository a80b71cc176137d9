//! Rooms: a local mask placed at an absolute origin

use fd_rng::RandomSource;

use super::prefab::PrefabLoader;
use super::shape::{Orientation, draw_donut, draw_ellipse, draw_full_rect, draw_l_shape};
use super::{Blueprint, CharGrid, RoomShape, Symbol, add_walls};
use crate::config::GenConfig;
use crate::error::RoomError;

/// Clamp one axis of an origin so `pos + size + 1 <= limit`
///
/// Returns `None` if the room cannot fit at all.
pub fn clamp_origin(pos: usize, size: usize, limit: usize) -> Option<usize> {
    if size + 1 > limit {
        None
    } else if pos + size + 1 > limit {
        Some(limit - size - 1)
    } else {
        Some(pos)
    }
}

/// A candidate or placed room
///
/// `width` x `height` is the size of the mask, which includes the wall ring:
/// a 9x9 mask holds at most a 7x7 floor.
#[derive(Debug, Clone)]
pub struct Room {
    /// Absolute top-left x on the level
    pub x: usize,
    /// Absolute top-left y on the level
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub shape: RoomShape,
    mask: CharGrid,
    map_width: usize,
    map_height: usize,
}

impl Room {
    /// Create an undesigned room, pulling the origin back inside the map
    pub fn new(
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        map_width: usize,
        map_height: usize,
    ) -> Result<Self, RoomError> {
        let too_large = || RoomError::TooLarge {
            width,
            height,
            map_width,
            map_height,
        };
        let abs_x = clamp_origin(x, width, map_width).ok_or_else(too_large)?;
        let abs_y = clamp_origin(y, height, map_height).ok_or_else(too_large)?;

        Ok(Self {
            x: abs_x,
            y: abs_y,
            width,
            height,
            shape: RoomShape::FullRect,
            mask: CharGrid::new(width, height),
            map_width,
            map_height,
        })
    }

    /// The room's local mask
    pub fn mask(&self) -> &CharGrid {
        &self.mask
    }

    /// Rasterize the mask for `shape`
    ///
    /// Shapes whose random ranges cannot work at this size, and masks that
    /// end up with no floor, are rejected before they can reach the
    /// blueprint.
    pub fn design<R: RandomSource + ?Sized>(
        &mut self,
        shape: RoomShape,
        config: &GenConfig,
        rng: &mut R,
        prefabs: &dyn PrefabLoader,
    ) -> Result<(), RoomError> {
        let min = shape.min_dim();
        if self.width < min || self.height < min {
            return Err(self.degenerate(shape));
        }

        let mut mask = CharGrid::new(self.width, self.height);
        match shape {
            RoomShape::FullRect => draw_full_rect(&mut mask),
            RoomShape::FullEllipse => draw_ellipse(&mut mask, config.ellipse_epsilon),
            RoomShape::LShaped => draw_l_shape(&mut mask, rng),
            RoomShape::Donut => draw_donut(&mut mask, rng),
            RoomShape::Prefab => {
                let id = rng
                    .choose_index(config.prefabs.len())
                    .map_or(crate::DEFAULT_PREFAB, |i| config.prefabs[i].as_str());
                mask = prefabs.load(id)?;
                self.resize(mask.width(), mask.height())?;
                Orientation::random(rng).apply(&mut mask);
            }
        }

        if shape.needs_walls() {
            add_walls(&mut mask);
        }
        if mask.count(Symbol::Floor) == 0 {
            return Err(self.degenerate(shape));
        }

        self.shape = shape;
        self.mask = mask;
        Ok(())
    }

    /// Take on a prefab's size, re-clamping the origin
    fn resize(&mut self, width: usize, height: usize) -> Result<(), RoomError> {
        let too_large = RoomError::TooLarge {
            width,
            height,
            map_width: self.map_width,
            map_height: self.map_height,
        };
        let (Some(x), Some(y)) = (
            clamp_origin(self.x, width, self.map_width),
            clamp_origin(self.y, height, self.map_height),
        ) else {
            return Err(too_large);
        };
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn degenerate(&self, shape: RoomShape) -> RoomError {
        RoomError::Degenerate {
            shape,
            width: self.width,
            height: self.height,
        }
    }

    /// Check the room's floor against the blueprint
    ///
    /// Returns true if any floor cell lands on a blueprint cell that is
    /// already floor or wall. Only floor is tested: wall rings of
    /// neighbouring rooms may overlap.
    pub fn collision_check(&self, blueprint: &Blueprint) -> bool {
        self.floor_cells()
            .any(|(x, y)| blueprint.get(x, y).is_none_or(Symbol::is_occupied))
    }

    /// Write floor and wall cells into the blueprint, overwriting what is there
    pub fn add_to_blueprint(&self, blueprint: &mut Blueprint) {
        for (x, y, symbol) in self.mask.iter() {
            if symbol.is_occupied() {
                blueprint.write(self.x + x, self.y + y, symbol);
            }
        }
    }

    /// Absolute coordinates of every floor cell
    pub fn floor_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .iter()
            .filter(|&(_, _, s)| s == Symbol::Floor)
            .map(|(x, y, _)| (self.x + x, self.y + y))
    }

    /// Check if an absolute coordinate is floor of this room
    pub fn has_floor_at(&self, x: usize, y: usize) -> bool {
        x.checked_sub(self.x)
            .zip(y.checked_sub(self.y))
            .and_then(|(lx, ly)| self.mask.get(lx, ly))
            == Some(Symbol::Floor)
    }

    /// Number of floor cells
    pub fn floor_area(&self) -> usize {
        self.mask.count(Symbol::Floor)
    }
}
