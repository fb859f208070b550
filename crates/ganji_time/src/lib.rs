//! Time-scale helpers for solar-term computation.
//!
//! This crate provides:
//! - Julian Day ↔ `chrono` date-time conversions
//! - ΔT (TT − UT) from the Espenak–Meeus polynomial fit
//! - UT ↔ TT conversion on Julian Days
//! - Whole-second rounding used for persisted solar-term instants

pub mod delta_t;
pub mod error;
pub mod julian;

pub use delta_t::{delta_t_seconds, tt_from_ut, ut_from_tt};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, datetime_from_jd, decimal_year, jd_from_datetime,
    julian_centuries, julian_millennia, round_to_second,
};
