//! Apparent geocentric ecliptic longitude of the Sun.

use ganji_time::{julian_millennia, tt_from_ut};

use crate::angle::normalize_360;
use crate::earth::earth_heliocentric;
use crate::nutation::nutation_in_longitude_arcsec;

/// FK5 frame correction to VSOP87 longitude, arcseconds.
const FK5_CORRECTION_ARCSEC: f64 = -0.09033;

/// Constant of annual aberration times 1 au, arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;

/// Apparent longitude of the Sun in degrees [0, 360) at Julian Day `jd_tt` (TT).
///
/// Geometric longitude is the Earth's heliocentric longitude plus 180°,
/// then corrected for FK5, nutation in longitude, and aberration.
pub fn sun_apparent_longitude_deg(jd_tt: f64) -> f64 {
    let tau = julian_millennia(jd_tt);
    let earth = earth_heliocentric(tau);
    let geometric = earth.lon_rad.to_degrees() + 180.0;
    let dpsi = nutation_in_longitude_arcsec(tau * 10.0);
    let aberration = -ABERRATION_ARCSEC / earth.radius_au;
    normalize_360(geometric + (FK5_CORRECTION_ARCSEC + dpsi + aberration) / 3600.0)
}

/// Apparent longitude of the Sun in degrees at Julian Day `jd_ut` (UT).
pub fn sun_apparent_longitude_ut(jd_ut: f64) -> f64 {
    sun_apparent_longitude_deg(tt_from_ut(jd_ut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normalize_to_pm180;

    #[test]
    fn advances_about_one_degree_per_day() {
        let jd = 2_451_545.0;
        let d = normalize_to_pm180(sun_apparent_longitude_deg(jd + 1.0) - sun_apparent_longitude_deg(jd));
        assert!((0.95..1.03).contains(&d), "daily motion {d}");
    }

    #[test]
    fn j2000_longitude() {
        // Apparent solar longitude at J2000.0 ≈ 280.37°
        let lon = sun_apparent_longitude_deg(2_451_545.0);
        assert!((lon - 280.37).abs() < 0.02, "λ = {lon}");
    }
}
