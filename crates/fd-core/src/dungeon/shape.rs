//! Room shapes and their rasterizers
//!
//! Every rasterizer works on a local mask that starts out all
//! [`Symbol::Empty`] and paints floor only. Walls are added afterwards by
//! [`super::add_walls`], except for prefabs which bring their own.

use fd_rng::RandomSource;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{CharGrid, Symbol};

/// Room shape variants
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomShape {
    FullRect,
    FullEllipse,
    Prefab,
    LShaped,
    Donut,
}

impl RoomShape {
    /// Smallest mask width/height this shape can be rasterized into
    ///
    /// Below this the shape's random ranges collapse and no floor would
    /// survive. Prefabs size themselves.
    pub const fn min_dim(self) -> usize {
        match self {
            RoomShape::FullRect | RoomShape::FullEllipse => crate::MIN_ROOM_DIM,
            RoomShape::LShaped | RoomShape::Donut => 5,
            RoomShape::Prefab => 0,
        }
    }

    /// Whether walls are produced by dilation after rasterizing
    pub const fn needs_walls(self) -> bool {
        !matches!(self, RoomShape::Prefab)
    }
}

/// Whole-mask mirror applied after carving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Orientation {
    Identity,
    FlipVertical,
    FlipHorizontal,
    Both,
}

impl Orientation {
    /// Pick one of the four orientations uniformly
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        match rng.randint(1, 4) {
            1 => Orientation::Identity,
            2 => Orientation::FlipVertical,
            3 => Orientation::FlipHorizontal,
            _ => Orientation::Both,
        }
    }

    pub fn apply(self, mask: &mut CharGrid) {
        match self {
            Orientation::Identity => {}
            Orientation::FlipVertical => mask.flip_vertical(),
            Orientation::FlipHorizontal => mask.flip_horizontal(),
            Orientation::Both => {
                mask.flip_vertical();
                mask.flip_horizontal();
            }
        }
    }
}

/// Draw from `[lo, hi]`, lowering `lo` to `hi` when the range is inverted
fn randint_clamped<R: RandomSource + ?Sized>(rng: &mut R, lo: isize, hi: isize) -> usize {
    let hi = hi.max(0);
    let lo = lo.clamp(0, hi);
    rng.randint(lo as u32, hi as u32) as usize
}

/// Fill `[1, w-1) x [1, h-1)` with floor, leaving a one-cell border for walls
pub fn draw_full_rect(mask: &mut CharGrid) {
    let w = mask.width().saturating_sub(2);
    let h = mask.height().saturating_sub(2);
    mask.fill_rect(1, 1, w, h, Symbol::Floor);
}

/// Fill an axis-aligned ellipse inscribed in the mask's inner `(w-2) x (h-2)` area
///
/// A cell is floor when `((x-x0)/a)^2 + ((y-y0)/b)^2 <= 1 - epsilon`. A zero
/// semi-axis collapses the ellipse to one floor cell at its centre.
pub fn draw_ellipse(mask: &mut CharGrid, epsilon: f64) {
    let wid = mask.width().saturating_sub(2);
    let hei = mask.height().saturating_sub(2);
    let x0 = wid / 2;
    let y0 = hei / 2;

    if x0 == 0 || y0 == 0 {
        mask.set(x0.max(1), y0.max(1), Symbol::Floor);
        return;
    }

    let (a, b) = (x0 as f64, y0 as f64);
    let limit = 1.0 - epsilon;
    for x in 0..wid {
        for y in 0..hei {
            let dx = (x as f64 - x0 as f64) / a;
            let dy = (y as f64 - y0 as f64) / b;
            if dx * dx + dy * dy <= limit {
                mask[(x, y)] = Symbol::Floor;
            }
        }
    }
}

/// Full rectangle with a corner block removed
///
/// The removed block is anchored at `(1, 1)` and sized from
/// `[5, w/2] x [5, h/2]`; the random orientation decides which corner it
/// ends up in.
pub fn draw_l_shape<R: RandomSource + ?Sized>(mask: &mut CharGrid, rng: &mut R) {
    draw_full_rect(mask);

    let sub_w = randint_clamped(rng, 5, (mask.width() / 2) as isize);
    let sub_h = randint_clamped(rng, 5, (mask.height() / 2) as isize);
    mask.fill_rect(1, 1, sub_w, sub_h, Symbol::Empty);

    Orientation::random(rng).apply(mask);
}

/// Full rectangle with a hole cut out of its middle
///
/// Hole size and offset are drawn per axis; the hole is then kept inside
/// `[2, dim-2)` so a floor ring of at least one cell always surrounds it.
pub fn draw_donut<R: RandomSource + ?Sized>(mask: &mut CharGrid, rng: &mut R) {
    draw_full_rect(mask);

    let (w, h) = (mask.width() as isize, mask.height() as isize);
    let sub_w = randint_clamped(rng, 4.min(w - 3), 4.max(w - 3)) as isize;
    let sub_h = randint_clamped(rng, 4.min(h - 3), 4.max(h - 3)) as isize;
    let sub_x = randint_clamped(rng, 4.min(w - sub_w - 2), 4.max(w - sub_w - 2)) as isize;
    let sub_y = randint_clamped(rng, 4.min(h - sub_h - 2), 4.max(h - sub_h - 2)) as isize;

    let (x_lo, x_hi) = (sub_x.max(2), (sub_x + sub_w - 2).min(w - 2));
    let (y_lo, y_hi) = (sub_y.max(2), (sub_y + sub_h - 2).min(h - 2));
    if x_hi > x_lo && y_hi > y_lo {
        mask.fill_rect(
            x_lo as usize,
            y_lo as usize,
            (x_hi - x_lo) as usize,
            (y_hi - y_lo) as usize,
            Symbol::Empty,
        );
    }

    Orientation::random(rng).apply(mask);
}

/// Cumulative-weight sampling over an ordered table
///
/// Draws `r` uniformly from `[0, total)` and returns the first entry whose
/// running total (inclusive) is `>= r`. Zero-weight entries are never
/// chosen. Returns `None` when the total weight is zero.
pub fn weighted_choice<T: Copy, R: RandomSource + ?Sized>(
    choices: &[(T, u32)],
    rng: &mut R,
) -> Option<T> {
    let total: u64 = choices.iter().map(|&(_, w)| w as u64).sum();
    if total == 0 {
        return None;
    }

    let draw = rng.uniform(0.0, total as f64);
    let mut running = 0u64;
    for &(choice, weight) in choices {
        if weight == 0 {
            continue;
        }
        running += weight as u64;
        if running as f64 >= draw {
            return Some(choice);
        }
    }
    choices.iter().rev().find(|&&(_, w)| w > 0).map(|&(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::add_walls;
    use fd_rng::{GameRng, ScriptedRng};

    #[test]
    fn test_full_rect_floor_extent() {
        let mut mask = CharGrid::new(10, 8);
        draw_full_rect(&mut mask);
        assert_eq!(mask.count(Symbol::Floor), 8 * 6);
        assert_eq!(mask[(0, 0)], Symbol::Empty);
        assert_eq!(mask[(1, 1)], Symbol::Floor);
        assert_eq!(mask[(8, 6)], Symbol::Floor);
        assert_eq!(mask[(9, 7)], Symbol::Empty);
    }

    #[test]
    fn test_ellipse_is_symmetric_and_inside() {
        let mut mask = CharGrid::new(14, 12);
        draw_ellipse(&mut mask, crate::ELLIPSE_EPSILON);
        // centre (6, 5), semi-axes 6 and 5
        assert_eq!(mask[(6, 5)], Symbol::Floor);
        assert_eq!(mask[(0, 5)], Symbol::Empty);
        assert_eq!(mask[(1, 5)], Symbol::Floor);
        assert_eq!(mask[(11, 5)], Symbol::Floor);
        assert_eq!(mask[(6, 0)], Symbol::Empty);
        for (x, y, s) in mask.iter() {
            if s == Symbol::Floor {
                assert!(x >= 1 && y >= 1 && x <= 11 && y <= 9);
                assert_eq!(mask[(12 - x, y)], Symbol::Floor);
                assert_eq!(mask[(x, 10 - y)], Symbol::Floor);
            }
        }
    }

    #[test]
    fn test_ellipse_epsilon_trims_tangent_cells() {
        // (x0 + a, y0) sits exactly on the rim
        let mut strict = CharGrid::new(14, 12);
        draw_ellipse(&mut strict, crate::ELLIPSE_EPSILON);
        let mut inclusive = CharGrid::new(14, 12);
        draw_ellipse(&mut inclusive, 0.0);
        assert_eq!(strict[(0, 5)], Symbol::Empty);
        assert_eq!(inclusive[(0, 5)], Symbol::Floor);
        assert!(inclusive.count(Symbol::Floor) > strict.count(Symbol::Floor));
    }

    #[test]
    fn test_degenerate_ellipse_single_cell() {
        let mut mask = CharGrid::new(3, 9);
        draw_ellipse(&mut mask, crate::ELLIPSE_EPSILON);
        assert_eq!(mask.count(Symbol::Floor), 1);
        assert_eq!(mask[(1, 3)], Symbol::Floor);
    }

    #[test]
    fn test_l_shape_removes_one_corner() {
        // sub block 5x6, identity orientation
        let mut rng = ScriptedRng::new([5, 6, 1], []);
        let mut mask = CharGrid::new(12, 14);
        draw_l_shape(&mut mask, &mut rng);
        assert_eq!(mask.count(Symbol::Floor), 10 * 12 - 5 * 6);
        assert_eq!(mask[(1, 1)], Symbol::Empty);
        assert_eq!(mask[(5, 6)], Symbol::Empty);
        assert_eq!(mask[(6, 1)], Symbol::Floor);
        assert_eq!(mask[(1, 7)], Symbol::Floor);
        assert_eq!(mask[(10, 12)], Symbol::Floor);
    }

    #[test]
    fn test_l_shape_flipped_corner() {
        // both flips move the cut to the bottom-right
        let mut rng = ScriptedRng::new([5, 5, 4], []);
        let mut mask = CharGrid::new(10, 10);
        draw_l_shape(&mut mask, &mut rng);
        assert_eq!(mask[(1, 1)], Symbol::Floor);
        assert_eq!(mask[(8, 8)], Symbol::Empty);
        assert_eq!(mask[(4, 4)], Symbol::Empty);
        assert_eq!(mask[(3, 3)], Symbol::Floor);
    }

    #[test]
    fn test_l_shape_small_mask_clamps() {
        let mut rng = GameRng::new(3);
        let mut mask = CharGrid::new(6, 6);
        draw_l_shape(&mut mask, &mut rng);
        assert!(mask.count(Symbol::Floor) > 0);
    }

    #[test]
    fn test_donut_keeps_ring_and_corners() {
        let mut rng = GameRng::new(2024);
        for _ in 0..200 {
            let mut mask = CharGrid::new(12, 12);
            draw_donut(&mut mask, &mut rng);
            add_walls(&mut mask);
            for (x, y) in [(0, 0), (11, 0), (0, 11), (11, 11)] {
                assert!(mask[(x, y)].is_occupied(), "corner ({x}, {y}) left empty");
            }
            for i in 1..11 {
                assert_eq!(mask[(i, 1)], Symbol::Floor);
                assert_eq!(mask[(i, 10)], Symbol::Floor);
                assert_eq!(mask[(1, i)], Symbol::Floor);
                assert_eq!(mask[(10, i)], Symbol::Floor);
            }
        }
    }

    #[test]
    fn test_donut_cuts_hole() {
        // sub 6x6 at (4, 4): hole [4, 8) on both axes
        let mut rng = ScriptedRng::new([6, 6, 4, 4, 1], []);
        let mut mask = CharGrid::new(12, 12);
        draw_donut(&mut mask, &mut rng);
        assert_eq!(mask.count(Symbol::Floor), 100 - 16);
        assert_eq!(mask[(4, 4)], Symbol::Empty);
        assert_eq!(mask[(7, 7)], Symbol::Empty);
        assert_eq!(mask[(8, 8)], Symbol::Floor);
    }

    #[test]
    fn test_orientation_draw() {
        let mut rng = ScriptedRng::new([1, 2, 3, 4], []);
        assert_eq!(Orientation::random(&mut rng), Orientation::Identity);
        assert_eq!(Orientation::random(&mut rng), Orientation::FlipVertical);
        assert_eq!(Orientation::random(&mut rng), Orientation::FlipHorizontal);
        assert_eq!(Orientation::random(&mut rng), Orientation::Both);
    }

    #[test]
    fn test_weighted_choice_midpoint_picks_first() {
        let mut rng = ScriptedRng::new([], [50.0]);
        assert_eq!(weighted_choice(&[("A", 50), ("B", 50)], &mut rng), Some("A"));
    }

    #[test]
    fn test_weighted_choice_buckets() {
        let table = [("A", 50), ("B", 15), ("C", 10)];
        let mut rng = ScriptedRng::new([], [0.0, 50.5, 65.0, 74.9]);
        assert_eq!(weighted_choice(&table, &mut rng), Some("A"));
        assert_eq!(weighted_choice(&table, &mut rng), Some("B"));
        assert_eq!(weighted_choice(&table, &mut rng), Some("B"));
        assert_eq!(weighted_choice(&table, &mut rng), Some("C"));
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let mut rng = ScriptedRng::new([], [0.0]);
        assert_eq!(weighted_choice(&[("A", 0), ("B", 3)], &mut rng), Some("B"));
        let mut rng = ScriptedRng::lowest();
        assert_eq!(weighted_choice::<&str, _>(&[("A", 0)], &mut rng), None);
        assert_eq!(weighted_choice::<&str, _>(&[], &mut rng), None);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(RoomShape::LShaped.to_string(), "l_shaped");
        assert_eq!(RoomShape::FullEllipse.to_string(), "full_ellipse");
    }
}
