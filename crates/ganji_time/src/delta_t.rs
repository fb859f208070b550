//! ΔT = TT − UT.
//!
//! Piecewise polynomials of Espenak & Meeus (NASA Five Millennium Canon),
//! valid to a few seconds over 1800–2150. Outside that span the long-term
//! parabola −20 + 32u² is used.

use crate::julian::{SECONDS_PER_DAY, decimal_year};

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < 1800.0 {
        long_term(y)
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.006_861_2 * t.powi(2) + 0.004_111_6 * t.powi(3)
            - 0.000_374_36 * t.powi(4)
            + 0.000_012_127_2 * t.powi(5)
            - 0.000_000_169_9 * t.powi(6)
            + 0.000_000_000_875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251_754 * t.powi(2) + 0.016_806_68 * t.powi(3)
            - 0.000_447_362_4 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
            - 0.000_197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
            + 0.001_727_5 * t.powi(3)
            + 0.000_651_814 * t.powi(4)
            + 0.000_023_735_99 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Julian Day TT from Julian Day UT.
pub fn tt_from_ut(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(decimal_year(jd_ut)) / SECONDS_PER_DAY
}

/// Julian Day UT from Julian Day TT (fixed-point, three iterations).
pub fn ut_from_tt(jd_tt: f64) -> f64 {
    let mut jd_ut = jd_tt;
    for _ in 0..3 {
        jd_ut = jd_tt - delta_t_seconds(decimal_year(jd_ut)) / SECONDS_PER_DAY;
    }
    jd_ut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        // Published ΔT: 1900 ≈ −2.8 s, 1950 ≈ 29.1 s, 2000 ≈ 63.8 s, 2020 ≈ 69.4 s
        assert!((delta_t_seconds(1900.0) + 2.79).abs() < 0.5);
        assert!((delta_t_seconds(1950.0) - 29.07).abs() < 0.5);
        assert!((delta_t_seconds(2000.0) - 63.86).abs() < 0.5);
        let d2020 = delta_t_seconds(2020.0);
        assert!((d2020 - 71.6).abs() < 3.0, "ΔT(2020) = {d2020}");
    }

    #[test]
    fn continuous_at_segment_joins() {
        for y in [1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0, 2150.0] {
            let before = delta_t_seconds(y - 1e-6);
            let after = delta_t_seconds(y + 1e-6);
            assert!((before - after).abs() < 2.0, "jump at {y}: {before} vs {after}");
        }
    }

    #[test]
    fn ut_tt_roundtrip() {
        let jd_ut = 2_460_345.1;
        let back = ut_from_tt(tt_from_ut(jd_ut));
        assert!((back - jd_ut).abs() * SECONDS_PER_DAY < 1e-3);
    }
}
