//! Dungeon generation
//!
//! Contains the character grid, room shapes, wall dilation, prefabs, rooms,
//! the blueprint, the placement loop and the tile grid.

mod blueprint;
mod grid;
mod level;
mod prefab;
mod render;
mod room;
mod shape;
mod tile;
mod walls;

pub use blueprint::Blueprint;
pub use grid::{CharGrid, Symbol};
pub use level::{GenerationReport, Level, Outcome, generate_level};
pub use prefab::{FilePrefabLoader, MemoryPrefabLoader, PrefabLoader, parse_prefab};
pub use render::{render_blueprint, render_tiles};
pub use room::{Room, clamp_origin};
pub use shape::{
    Orientation, RoomShape, draw_donut, draw_ellipse, draw_full_rect, draw_l_shape,
    weighted_choice,
};
pub use tile::{Tile, TileGrid};
pub use walls::{add_walls, wall_ring};
