//! Default generation settings and display glyphs

/// Default map width in cells
pub const DEFAULT_MAP_WIDTH: usize = 80;

/// Default map height in cells
pub const DEFAULT_MAP_HEIGHT: usize = 50;

/// Room mask size ranges (the mask includes the wall border)
pub const RECT_MIN_WID: usize = 10;
pub const RECT_MAX_WID: usize = 18;
pub const RECT_MIN_HEI: usize = 10;
pub const RECT_MAX_HEI: usize = 18;

/// Target number of rooms per level
pub const MAX_ROOMS: usize = 20;

/// Rejected placements tolerated before generation stops early
pub const MAX_TRIES: usize = 150;

/// Smallest mask dimension that can hold a floor cell inside its wall ring
pub const MIN_ROOM_DIM: usize = 3;

/// Ellipse cells are floor when their normalized distance is <= 1 - epsilon
pub const ELLIPSE_EPSILON: f64 = 1e-10;

/// Prefab used when the configuration names none
pub const DEFAULT_PREFAB: &str = "room.txt";

// Display glyphs
pub const GLYPH_WALL: char = '#';
pub const GLYPH_FLOOR: char = '.';
pub const GLYPH_NONE: char = ' ';
