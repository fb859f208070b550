//! Four Pillars (四柱) and the major fortune cycle (大運).
//!
//! This crate provides:
//! - [`PillarCalculator`]: year, month, day, and hour pillars of a birth,
//!   resolved against a [`SolarTermTable`](ganji_search::SolarTermTable)
//! - The major fortune cycle: direction, anchor term, starting age, and
//!   ten-year pillar blocks
//! - Annual (歲運), monthly (月運), and daily (日運) pillars
//! - [`SajuConfig`]: named policies for the conventions that differ between
//!   schools

pub mod birth;
pub mod config;
pub mod error;
pub mod fortune;
pub mod fortune_types;
pub mod pillars;

pub use birth::{BirthMoment, Gender};
pub use config::{AgeClamp, SajuConfig, YearBoundary, ZiHourPolicy};
pub use error::SajuError;
pub use fortune::{direction_for, starting_age};
pub use fortune_types::{Direction, FortuneBlock, FortuneCycle, StartingAge};
pub use pillars::{
    Chart, FourPillars, PillarCalculator, day_pillar, day_pillars_for, month_pillar_for,
    year_pillar_for,
};
