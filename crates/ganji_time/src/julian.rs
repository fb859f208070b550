//! Julian Day arithmetic bridged to `chrono`.
//!
//! All Julian Days here are continuous day counts; the caller decides whether
//! a value is on the UT or TT scale.

use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};

use crate::error::TimeError;

/// Julian Day of the J2000.0 epoch (2000-01-01T12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of 1970-01-01T00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

const NANOS_PER_SECOND: f64 = 1e9;

/// Julian Day (UT) of a zoned date-time.
pub fn jd_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / NANOS_PER_SECOND;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// UTC date-time of a Julian Day (UT), with nanosecond rounding.
pub fn datetime_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let secs_f = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let mut secs = secs_f.floor();
    let mut nanos = ((secs_f - secs) * NANOS_PER_SECOND).round();
    if nanos >= NANOS_PER_SECOND {
        secs += 1.0;
        nanos = 0.0;
    }
    if secs.abs() > i64::MAX as f64 / 2.0 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::from_timestamp(secs as i64, nanos as u32).ok_or(TimeError::OutOfRange(jd))
}

/// Round a date-time to the nearest whole second (half rounds up).
pub fn round_to_second<Tz: TimeZone>(dt: DateTime<Tz>) -> DateTime<Tz> {
    let nanos = dt.timestamp_subsec_nanos();
    let Some(floor) = dt.with_nanosecond(0) else {
        return dt;
    };
    if nanos >= 500_000_000 {
        floor + TimeDelta::seconds(1)
    } else {
        floor
    }
}

/// Decimal Gregorian year of a Julian Day, accurate enough for ΔT lookup.
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Julian millennia since J2000.0 (the VSOP87 time argument τ).
pub fn julian_millennia(jd: f64) -> f64 {
    (jd - J2000_JD) / 365_250.0
}
