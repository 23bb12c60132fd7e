//! Line-of-sight for champions.
//!
//! Sight is a fan of rays cast from the champion towards every cell of the line
//! perpendicular to its facing at the far arena edge. Each ray is a Bresenham
//! walk that stops after the first cell that blocks sight (walls and other
//! champions). This is an approximation of shadowcasting with direction-dependent
//! rounding; arenas and bots are tuned against it as-is.

use std::collections::BTreeSet;

use super::*;

impl Arena {
    pub fn visible_coords(&self, id: ChampionId) -> BTreeSet<Coords> {
        match self.champion(id) {
            Some(champion) => visible_from(&self.terrain, champion.position(), champion.facing()),
            None => BTreeSet::new(),
        }
    }
}

pub(crate) fn visible_from(terrain: &Terrain, origin: Coords, facing: Facing) -> BTreeSet<Coords> {
    let width = terrain.width() as i32;
    let height = terrain.height() as i32;

    let targets: Vec<Coords> = match facing {
        Facing::Up => (0..width).map(|x| Coords::new(x, 0)).collect(),
        Facing::Down => (0..width).map(|x| Coords::new(x, height - 1)).collect(),
        Facing::Left => (0..height).map(|y| Coords::new(0, y)).collect(),
        Facing::Right => (0..height).map(|y| Coords::new(width - 1, y)).collect(),
    };

    let mut visible = BTreeSet::new();
    visible.insert(origin);
    for target in targets {
        for coords in bresenham(origin, target).into_iter().skip(1) {
            let Some(tile) = terrain.tile(coords) else {
                break;
            };
            visible.insert(coords);
            if !tile.transparent() {
                break;
            }
        }
    }
    visible
}

/// Rasterised segment from `from` to `to`, both ends included.
fn bresenham(from: Coords, to: Coords) -> Vec<Coords> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let x_sign = if dx > 0 { 1 } else { -1 };
    let y_sign = if dy > 0 { 1 } else { -1 };
    let (dx, dy) = (dx.abs(), dy.abs());

    // Walk along the major axis; (xx, xy) is its step, (yx, yy) the minor step.
    let (major, minor, xx, xy, yx, yy) = if dx > dy {
        (dx, dy, x_sign, 0, 0, y_sign)
    } else {
        (dy, dx, 0, y_sign, x_sign, 0)
    };

    let mut cells = Vec::with_capacity(major as usize + 1);
    let mut error = 2 * minor - major;
    let mut offset = 0;
    for step in 0..=major {
        cells.push(Coords::new(from.x + step * xx + offset * yx, from.y + step * xy + offset * yy));
        if error >= 0 {
            offset += 1;
            error -= 2 * major;
        }
        error += 2 * minor;
    }
    cells
}
