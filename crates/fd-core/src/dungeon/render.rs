//! Text rendering of a finished level

use super::{Level, Symbol};
use crate::{GLYPH_FLOOR, GLYPH_NONE, GLYPH_WALL};

/// Draw the level as the player sees it: `#` wall, `.` floor, space for rock
pub fn render_tiles(level: &Level) -> String {
    let bp = level.blueprint();
    rows(level, |x, y| {
        match level.tiles().get(x, y) {
            Some(tile) if !tile.blocked => GLYPH_FLOOR,
            _ => match bp.get(x, y) {
                Some(Symbol::Empty) | None => GLYPH_NONE,
                Some(_) => GLYPH_WALL,
            },
        }
    })
}

/// Draw the raw blueprint symbols, for debugging
pub fn render_blueprint(level: &Level) -> String {
    let bp = level.blueprint();
    rows(level, |x, y| bp.get(x, y).unwrap_or_default().to_char())
}

fn rows(level: &Level, glyph: impl Fn(usize, usize) -> char) -> String {
    (0..level.height)
        .map(|y| (0..level.width).map(|x| glyph(x, y)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
