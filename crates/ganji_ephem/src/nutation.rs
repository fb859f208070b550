//! Nutation in longitude from the leading IAU 2000B lunisolar terms.
//!
//! Only Δψ is needed for apparent solar longitude. The thirteen largest
//! terms reproduce the full series to about 0.05″.

use std::f64::consts::TAU;

const AS2RAD: f64 = TAU / 1_296_000.0;

/// Delaunay arguments `[l, l', F, D, Ω]` in radians (IERS 2010, Table 5.2e).
///
/// `t` = Julian centuries (TT) since J2000.0.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;

    let l = (485868.249036 + 1717915923.2178 * t + 31.8792 * t2 + 0.051635 * t3) * AS2RAD;
    let lp = (1287104.79305 + 129596581.0481 * t - 0.5532 * t2 + 0.000136 * t3) * AS2RAD;
    let f = (335779.526232 + 1739527262.8478 * t - 12.7512 * t2 - 0.001037 * t3) * AS2RAD;
    let d = (1072260.70369 + 1602961601.2090 * t - 6.3706 * t2 + 0.006593 * t3) * AS2RAD;
    let om = (450160.398036 - 6962890.5431 * t + 7.4722 * t2 + 0.007702 * t3) * AS2RAD;

    [l, lp, f, d, om]
}

/// `[nl, nl', nF, nD, nΩ, S, S']`, amplitudes in 1e-7 arcsec.
#[rustfmt::skip]
static DPSI_TERMS: [[i64; 7]; 13] = [
    [ 0,  0,  0,  0,  1, -172064161, -174666],
    [ 0,  0,  2, -2,  2,  -13170906,   -1675],
    [ 0,  0,  2,  0,  2,   -2276413,    -234],
    [ 0,  0,  0,  0,  2,    2074554,     207],
    [ 0,  1,  0,  0,  0,    1475877,   -3633],
    [ 0,  1,  2, -2,  2,    -516821,    1226],
    [ 1,  0,  0,  0,  0,     711159,      73],
    [ 0,  0,  2,  0,  1,    -387298,    -367],
    [ 1,  0,  2,  0,  2,    -301461,     -36],
    [ 0, -1,  2, -2,  2,     215829,    -494],
    [ 0,  0,  2, -2,  1,     128227,     137],
    [-1,  0,  2,  0,  2,     123457,      11],
    [-1,  0,  0,  2,  0,     156994,      10],
];

/// Nutation in longitude Δψ in arcseconds at `t` Julian centuries (TT).
pub fn nutation_in_longitude_arcsec(t: f64) -> f64 {
    let args = fundamental_arguments(t);
    let dpsi: f64 = DPSI_TERMS
        .iter()
        .map(|row| {
            let arg: f64 = row[..5]
                .iter()
                .zip(args.iter())
                .map(|(&n, &a)| n as f64 * a)
                .sum();
            (row[5] as f64 + row[6] as f64 * t) * arg.sin()
        })
        .sum();
    dpsi * 1e-7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_amplitude() {
        for i in 0..40 {
            let t = -1.0 + i as f64 * 0.05;
            let dpsi = nutation_in_longitude_arcsec(t);
            assert!(dpsi.abs() < 19.0, "|Δψ| = {dpsi} at T = {t}");
        }
    }

    #[test]
    fn j2000_value() {
        // Δψ at J2000.0 is about −13.9″
        let dpsi = nutation_in_longitude_arcsec(0.0);
        assert!((dpsi + 13.9).abs() < 0.3, "Δψ = {dpsi}");
    }

    #[test]
    fn node_period_dominates() {
        // Half an 18.6-year node cycle flips the sign of the leading term
        let t1 = 0.05;
        let t2 = t1 + 9.3 / 100.0;
        let a = nutation_in_longitude_arcsec(t1);
        let b = nutation_in_longitude_arcsec(t2);
        assert!(a * b < 0.0 || a.abs() < 3.0 || b.abs() < 3.0, "{a} vs {b}");
    }
}
