//! Apparent geocentric longitude of the Sun.
//!
//! The model combines a truncated VSOP87D Earth series, the dominant terms of
//! IAU 2000B nutation in longitude, the FK5 frame correction, and annual
//! aberration. Accuracy is about one arcsecond (a few seconds of time at a
//! solar-term crossing) over 1900–2100.

pub mod angle;
pub mod earth;
pub mod nutation;
pub mod sun;
pub mod vsop87;

pub use angle::{normalize_360, normalize_to_pm180};
pub use earth::{HeliocentricEarth, earth_heliocentric};
pub use nutation::{fundamental_arguments, nutation_in_longitude_arcsec};
pub use sun::{sun_apparent_longitude_deg, sun_apparent_longitude_ut};
