//! Locate the instant the Sun's apparent longitude reaches a solar term.
//!
//! The target is bracketed by a window around the term's typical civil date
//! and refined by bisection on f(t) = normalize_to_pm180(λ(t) − L), which is
//! monotone within the window since λ advances about 1° per day.

use chrono::{DateTime, TimeZone, Utc};
use ganji_base::Jieqi;
use ganji_ephem::{normalize_to_pm180, sun_apparent_longitude_ut};
use ganji_time::{datetime_from_jd, jd_from_datetime, round_to_second};

use crate::error::SearchError;
use crate::locator_types::{LocatorConfig, Precision, SolarTermEvent};

/// Apparent solar longitude in degrees [0, 360) at a civil instant.
pub fn sun_longitude_at<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    sun_apparent_longitude_ut(jd_from_datetime(instant))
}

/// Signed longitude distance of the Sun from `target_deg` at `jd_ut`.
fn longitude_offset(jd_ut: f64, target_deg: f64) -> f64 {
    normalize_to_pm180(sun_apparent_longitude_ut(jd_ut) - target_deg)
}

/// Julian Day (UT) of the term's typical civil date at 12:00 UT.
fn seed_jd(year: i32, term: Jieqi) -> Result<f64, SearchError> {
    let (month, day) = term.typical_date();
    let seed = Utc
        .with_ymd_and_hms(term.civil_year(year), month, day, 12, 0, 0)
        .single()
        .ok_or(SearchError::UnsupportedYear(year))?;
    Ok(jd_from_datetime(&seed))
}

/// Bisect a bracket `[a, b]` with `f(a) < 0 < f(b)`.
///
/// Returns the root estimate and whether the tolerance was met.
fn bisect(mut a: f64, mut b: f64, target_deg: f64, config: &LocatorConfig) -> (f64, Precision) {
    for _ in 0..config.max_iterations {
        let mid = 0.5 * (a + b);
        let f_mid = longitude_offset(mid, target_deg);
        if f_mid.abs() < config.tolerance_deg {
            return (mid, Precision::Converged);
        }
        if f_mid < 0.0 {
            a = mid;
        } else {
            b = mid;
        }
    }
    (0.5 * (a + b), Precision::IterationCap)
}

/// Find the instant `term` begins in sexagenary year `year`.
///
/// Fails with [`SearchError::AstronomicalSearch`] when the window does not
/// bracket the target longitude. An exhausted iteration cap is not an error;
/// the event is returned flagged [`Precision::IterationCap`].
pub fn locate(year: i32, term: Jieqi, config: &LocatorConfig) -> Result<SolarTermEvent, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;

    let target = term.longitude_deg();
    let center = seed_jd(year, term)?;
    let a = center - config.window_days;
    let b = center + config.window_days;

    let f_a = longitude_offset(a, target);
    let f_b = longitude_offset(b, target);
    if !(f_a < 0.0 && f_b > 0.0) {
        return Err(SearchError::AstronomicalSearch { year, term });
    }

    let (jd, precision) = bisect(a, b, target, config);
    if precision == Precision::IterationCap {
        tracing::debug!(year, term = term.name(), "iteration cap reached");
    }
    let instant = round_to_second(datetime_from_jd(jd)?).with_timezone(&config.civil_offset);

    Ok(SolarTermEvent {
        term,
        calendar_year: year,
        instant,
        precision,
    })
}

/// Static estimate: the term's typical civil date at 12:00 in the civil zone.
pub fn estimate(year: i32, term: Jieqi, config: &LocatorConfig) -> Result<SolarTermEvent, SearchError> {
    let (month, day) = term.typical_date();
    let instant = config
        .civil_offset
        .with_ymd_and_hms(term.civil_year(year), month, day, 12, 0, 0)
        .single()
        .ok_or(SearchError::UnsupportedYear(year))?;
    Ok(SolarTermEvent {
        term,
        calendar_year: year,
        instant,
        precision: Precision::Estimated,
    })
}

/// [`locate`], falling back to [`estimate`] when the target is not bracketed.
pub fn locate_or_estimate(
    year: i32,
    term: Jieqi,
    config: &LocatorConfig,
) -> Result<SolarTermEvent, SearchError> {
    match locate(year, term, config) {
        Err(SearchError::AstronomicalSearch { .. }) => {
            tracing::warn!(year, term = term.name(), "search failed, using static estimate");
            estimate(year, term, config)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn lichun_2024() {
        let ev = locate(2024, Jieqi::Lichun, &LocatorConfig::default()).unwrap();
        assert_eq!(ev.precision, Precision::Converged);
        assert_eq!((ev.instant.month(), ev.instant.day()), (2, 4));
        assert_eq!(ev.instant.hour(), 16);
        assert_eq!(ev.instant.nanosecond(), 0);
        assert_eq!(ev.calendar_year, 2024);
    }

    #[test]
    fn xiaohan_lands_in_next_january() {
        let ev = locate(2023, Jieqi::Xiaohan, &LocatorConfig::default()).unwrap();
        assert_eq!(ev.instant.year(), 2024);
        assert_eq!(ev.instant.month(), 1);
        assert_eq!(ev.calendar_year, 2023);
    }

    #[test]
    fn longitude_at_event_matches_target() {
        let ev = locate(2010, Jieqi::Liqiu, &LocatorConfig::default()).unwrap();
        let off = normalize_to_pm180(sun_longitude_at(&ev.instant) - 135.0);
        // rounding to whole seconds moves λ by at most ~6e-6°
        assert!(off.abs() < 2e-5, "offset {off}");
    }

    #[test]
    fn narrow_window_fails_to_bracket() {
        let config = LocatorConfig {
            window_days: 0.01,
            ..LocatorConfig::default()
        };
        let err = locate(2024, Jieqi::Lichun, &config).unwrap_err();
        assert_eq!(err, SearchError::AstronomicalSearch { year: 2024, term: Jieqi::Lichun });
    }

    #[test]
    fn fallback_gives_noon_estimate() {
        let config = LocatorConfig {
            window_days: 0.01,
            ..LocatorConfig::default()
        };
        let ev = locate_or_estimate(2024, Jieqi::Lichun, &config).unwrap();
        assert_eq!(ev.precision, Precision::Estimated);
        assert_eq!((ev.instant.month(), ev.instant.day(), ev.instant.hour()), (2, 4, 12));
    }

    #[test]
    fn iteration_cap_is_flagged() {
        let config = LocatorConfig {
            max_iterations: 3,
            ..LocatorConfig::default()
        };
        let ev = locate(2024, Jieqi::Lichun, &config).unwrap();
        assert_eq!(ev.precision, Precision::IterationCap);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = LocatorConfig {
            tolerance_deg: -1.0,
            ..LocatorConfig::default()
        };
        assert!(matches!(
            locate(2024, Jieqi::Lichun, &config),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
