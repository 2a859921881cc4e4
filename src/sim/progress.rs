//! Egg currency and perk unlocks

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_PER_EGG, SCORE_PER_WAVE};

/// Unlockable perks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perk {
    /// Movement speed boost
    QuickFeet,
    /// Slow fall while jump is held
    Flutter,
}

impl Perk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perk::QuickFeet => "Quick Feet",
            Perk::Flutter => "Flutter",
        }
    }

    /// Perk unlocked by clearing the given wave index, if any
    pub fn for_cleared_wave(wave_index: u32) -> Option<Perk> {
        match wave_index {
            0 => Some(Perk::QuickFeet),
            1 => Some(Perk::Flutter),
            _ => None,
        }
    }
}

/// One-way unlock flags (never revoked within a session)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlocks {
    quick_feet: bool,
    flutter: bool,
}

impl Unlocks {
    pub fn is_unlocked(&self, perk: Perk) -> bool {
        match perk {
            Perk::QuickFeet => self.quick_feet,
            Perk::Flutter => self.flutter,
        }
    }

    /// Unlock a perk. Returns true only the first time.
    pub fn unlock(&mut self, perk: Perk) -> bool {
        let flag = match perk {
            Perk::QuickFeet => &mut self.quick_feet,
            Perk::Flutter => &mut self.flutter,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }
}

/// Egg counter; gameplay only ever adds to it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    eggs: u64,
}

impl Currency {
    pub fn new(eggs: u64) -> Self {
        Self { eggs }
    }

    pub fn eggs(&self) -> u64 {
        self.eggs
    }

    /// One egg per wave win
    pub fn award_egg(&mut self) -> u64 {
        self.eggs = self.eggs.saturating_add(1);
        self.eggs
    }

    /// Explicit progress reset from the start screen
    pub fn reset(&mut self) {
        self.eggs = 0;
    }
}

/// Score from progression reached: eggs × 100 + wave × 10
pub fn score(eggs: u64, wave_index: u32) -> u64 {
    eggs.saturating_mul(SCORE_PER_EGG)
        .saturating_add(u64::from(wave_index) * SCORE_PER_WAVE)
}
