//! Types for the major fortune cycle.

use chrono::{DateTime, FixedOffset};
use ganji_base::Ganzhi;
use ganji_search::SolarTermEvent;
use serde::Serialize;

/// Direction the fortune pillars advance from the month pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// +1 for forward, −1 for backward.
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Starting age derived from the days between birth and the anchor term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartingAge {
    /// elapsed_days / 3, before clamping.
    pub raw_years: f64,
    /// Whole years after clamping.
    pub years: u32,
    /// Fractional year carried into the precise start; zero when clamped.
    pub fraction: f64,
    pub clamped: bool,
}

/// One ten-year fortune block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FortuneBlock {
    /// 1-based position in the sequence.
    pub order: u32,
    pub start_age: u32,
    /// Inclusive; `start_age + 9`.
    pub end_age: u32,
    pub pillar: Ganzhi,
}

/// Major fortune cycle (大運) of a birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FortuneCycle {
    pub direction: Direction,
    /// Jieqi measured to: the next one when forward, the previous one when
    /// backward.
    pub anchor: SolarTermEvent,
    pub elapsed_days: f64,
    pub starting_age: StartingAge,
    /// Instant the first block begins.
    pub precise_start: DateTime<FixedOffset>,
    pub blocks: Vec<FortuneBlock>,
}

impl FortuneCycle {
    /// Block covering `age`, if within the computed span.
    pub fn block_for_age(&self, age: u32) -> Option<&FortuneBlock> {
        self.blocks
            .iter()
            .find(|b| (b.start_age..=b.end_age).contains(&age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Backward.sign(), -1);
    }
}
