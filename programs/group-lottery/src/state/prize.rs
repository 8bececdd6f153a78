use anchor_lang::prelude::*;
use serde::Serialize;

use crate::error::LotteryError;

/// Prize tiers an activity can hand out. `None` is the fallback outcome and is
/// never configured with stock.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrizeLevel {
    Special,
    First,
    Second,
    Third,
    None,
}

// (level, config key, label, emoji)
const LEVEL_TABLE: [(PrizeLevel, &str, &str, &str); 5] = [
    (PrizeLevel::Special, "special", "Special Prize", "🎊"),
    (PrizeLevel::First, "first", "First Prize", "🥇"),
    (PrizeLevel::Second, "second", "Second Prize", "🥈"),
    (PrizeLevel::Third, "third", "Third Prize", "🥉"),
    (PrizeLevel::None, "none", "No Prize", "😢"),
];

impl PrizeLevel {
    pub const ALL: [PrizeLevel; 5] = [
        PrizeLevel::Special,
        PrizeLevel::First,
        PrizeLevel::Second,
        PrizeLevel::Third,
        PrizeLevel::None,
    ];

    fn row(self) -> &'static (PrizeLevel, &'static str, &'static str, &'static str) {
        &LEVEL_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.row().1
    }

    pub fn label(self) -> &'static str {
        self.row().2
    }

    pub fn emoji(self) -> &'static str {
        self.row().3
    }

    pub fn is_prize(self) -> bool {
        !matches!(self, PrizeLevel::None)
    }

    /// Case-insensitive lookup by configuration key, e.g. `"FIRST"`.
    pub fn from_key(key: &str) -> Result<PrizeLevel> {
        let key = key.trim();
        LEVEL_TABLE
            .iter()
            .find(|(_, name, _, _)| name.eq_ignore_ascii_case(key))
            .map(|(level, _, _, _)| *level)
            .ok_or_else(|| error!(LotteryError::UnknownPrizeLevel))
    }
}

impl std::fmt::Display for PrizeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable prize state of one level inside one activity.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct PrizeState {
    pub probability: f64,
    pub count: u32,
    pub remaining: u32,
    pub name: String,
}

impl PrizeState {
    pub fn new(probability: f64, count: u32, name: String) -> Self {
        Self {
            probability,
            count,
            remaining: count,
            name,
        }
    }

    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }

    /// Takes one unit of stock. Returns false when the level is exhausted.
    pub fn consume(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct PrizeSlot {
    pub level: PrizeLevel,
    pub state: PrizeState,
}

/// Per-level prize state kept in template order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct PrizeTable {
    slots: Vec<PrizeSlot>,
}

impl PrizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the state for `level`, keeping its original position.
    pub fn insert(&mut self, level: PrizeLevel, state: PrizeState) {
        match self.get_mut(level) {
            Some(existing) => *existing = state,
            None => self.slots.push(PrizeSlot { level, state }),
        }
    }

    pub fn get(&self, level: PrizeLevel) -> Option<&PrizeState> {
        self.slots
            .iter()
            .find(|slot| slot.level == level)
            .map(|slot| &slot.state)
    }

    pub fn get_mut(&mut self, level: PrizeLevel) -> Option<&mut PrizeState> {
        self.slots
            .iter_mut()
            .find(|slot| slot.level == level)
            .map(|slot| &mut slot.state)
    }

    pub fn contains(&self, level: PrizeLevel) -> bool {
        self.get(level).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrizeLevel, &PrizeState)> {
        self.slots.iter().map(|slot| (slot.level, &slot.state))
    }

    pub fn levels(&self) -> impl Iterator<Item = PrizeLevel> + '_ {
        self.slots.iter().map(|slot| slot.level)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [PrizeSlot] {
        &mut self.slots
    }
}
