//! Solar-term search and the precomputed solar-term table.
//!
//! This crate provides:
//! - The solar-term locator: bisection on apparent solar longitude for the
//!   instant the Sun reaches a month-starting term
//! - [`SolarTermTable`]: every term for a span of years, built in parallel,
//!   with data-quality checks, boundary scans, and JSON persistence

pub mod error;
pub mod locator;
pub mod locator_types;
pub mod table;
pub mod table_io;
pub mod table_types;

pub use error::SearchError;
pub use locator::{estimate, locate, locate_or_estimate, sun_longitude_at};
pub use locator_types::{LocatorConfig, Precision, SolarTermEvent};
pub use table::SolarTermTable;
pub use table_types::{DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, TableConfig};
