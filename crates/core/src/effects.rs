//! Tile-attached hazards and attack consequences.

use std::cmp::Ordering;

/// Wounds dealt every tick a champion stands in the mist.
pub const MIST_DAMAGE: u32 = 1;
/// Wounds dealt once by a weapon cut.
pub const CUT_DAMAGE: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectLifetime {
    /// Applies on every `stay` while a champion occupies the tile.
    Eternal,
    /// Applies once when instants are triggered, then is removed.
    Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Mist,
    WeaponCut,
}

impl Effect {
    /// Application order on a tile; lower goes first.
    pub fn priority(self) -> u8 {
        match self {
            Effect::Mist => 0,
            Effect::WeaponCut => 1,
        }
    }

    pub fn lifetime(self) -> EffectLifetime {
        match self {
            Effect::Mist => EffectLifetime::Eternal,
            Effect::WeaponCut => EffectLifetime::Instant,
        }
    }

    /// Wounds for a champion that remains on the tile for a tick.
    pub fn stay_wounds(self) -> u32 {
        match self {
            Effect::Mist => MIST_DAMAGE,
            Effect::WeaponCut => 0,
        }
    }

    /// Wounds for the occupant when instants are triggered.
    pub fn instant_wounds(self) -> u32 {
        match self {
            Effect::Mist => 0,
            Effect::WeaponCut => CUT_DAMAGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::Mist => "mist",
            Effect::WeaponCut => "weapon_cut",
        }
    }
}

impl Ord for Effect {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for Effect {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
