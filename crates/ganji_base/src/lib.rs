//! Closed enumerations of the sexagenary calendar.
//!
//! - [`Stem`]: the 10 heavenly stems (天干)
//! - [`Branch`]: the 12 earthly branches (地支)
//! - [`Ganzhi`]: a parity-consistent stem–branch pair, one of 60
//! - [`Jieqi`]: the 12 month-starting solar terms (節氣)
//! - [`tables`]: static derivation tables for month and hour stems
//!
//! Everything here is pure data and arithmetic on cycle indices.

pub mod branch;
pub mod error;
pub mod ganzhi;
pub mod jieqi;
pub mod stem;
pub mod tables;

pub use branch::{ALL_BRANCHES, Branch};
pub use error::BaseError;
pub use ganzhi::{CYCLE_LEN, Ganzhi};
pub use jieqi::{ALL_JIEQI, Jieqi, is_zhongqi_name};
pub use stem::{ALL_STEMS, Stem};
pub use tables::{HOUR_STEM_TABLE, MONTH_STEM_TABLE, hour_branch, hour_stem, month_stem};
