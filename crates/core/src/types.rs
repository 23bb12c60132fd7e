use std::fmt;
use std::ops::{Add, Sub};

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::random::pick_index;

new_key_type! {
    pub struct ChampionId;
}

/// Grid position. Ordering is row-major so ordered collections iterate the arena
/// top-to-bottom, left-to-right.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coords {
    pub y: i32,
    pub x: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }
}

impl Add for Coords {
    type Output = Coords;

    fn add(self, rhs: Coords) -> Coords {
        Coords { y: self.y + rhs.y, x: self.x + rhs.x }
    }
}

impl Sub for Coords {
    type Output = Coords;

    fn sub(self, rhs: Coords) -> Coords {
        Coords { y: self.y - rhs.y, x: self.x - rhs.x }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub fn delta(self) -> Coords {
        match self {
            Facing::Up => Coords::new(0, -1),
            Facing::Down => Coords::new(0, 1),
            Facing::Left => Coords::new(-1, 0),
            Facing::Right => Coords::new(1, 0),
        }
    }

    pub fn turn_left(self) -> Facing {
        match self {
            Facing::Up => Facing::Left,
            Facing::Left => Facing::Down,
            Facing::Down => Facing::Right,
            Facing::Right => Facing::Up,
        }
    }

    pub fn turn_right(self) -> Facing {
        match self {
            Facing::Up => Facing::Right,
            Facing::Right => Facing::Down,
            Facing::Down => Facing::Left,
            Facing::Left => Facing::Up,
        }
    }

    pub fn random(rng: &mut ChaCha8Rng) -> Facing {
        Self::ALL[pick_index(rng, Self::ALL.len())]
    }
}

/// Everything a controller may ask its champion to do in one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    TurnRight,
    StepForward,
    Attack,
    DoNothing,
}

impl Action {
    pub const ALL: [Action; 5] =
        [Action::TurnLeft, Action::TurnRight, Action::StepForward, Action::Attack, Action::DoNothing];
}

/// Display colour a controller picks for its champion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tabard {
    Blue,
    Brown,
    Grey,
    Green,
    Lime,
    Orange,
    Pink,
    Red,
    Stripes,
    Turquoise,
    Violet,
    White,
    Yellow,
}
