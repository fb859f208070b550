//! Heliocentric ecliptic coordinates of the Earth (VSOP87D, of date).

use crate::vsop87::{B_SERIES, R_SERIES, L_SERIES, Term};

/// Heliocentric position of the Earth, mean ecliptic and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricEarth {
    /// Longitude in radians, normalized to [0, 2π).
    pub lon_rad: f64,
    /// Latitude in radians.
    pub lat_rad: f64,
    /// Sun–Earth distance in au.
    pub radius_au: f64,
}

fn evaluate(series: &[&[Term]], tau: f64) -> f64 {
    let mut sum = 0.0;
    let mut tau_k = 1.0;
    for terms in series {
        let s: f64 = terms.iter().map(|&(a, b, c)| a * (b + c * tau).cos()).sum();
        sum += s * tau_k;
        tau_k *= tau;
    }
    sum * 1e-8
}

/// Evaluate the Earth series at `tau` Julian millennia (TT) from J2000.0.
pub fn earth_heliocentric(tau: f64) -> HeliocentricEarth {
    HeliocentricEarth {
        lon_rad: evaluate(L_SERIES, tau).rem_euclid(std::f64::consts::TAU),
        lat_rad: evaluate(B_SERIES, tau),
        radius_au: evaluate(R_SERIES, tau),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_position() {
        // Meeus ex. 25.b-style sanity: at J2000 the Earth is near L = 100.4°, R = 0.9833 au
        let e = earth_heliocentric(0.0);
        let lon_deg = e.lon_rad.to_degrees();
        assert!((lon_deg - 100.38).abs() < 0.05, "L = {lon_deg}");
        assert!((e.radius_au - 0.98333).abs() < 1e-4, "R = {}", e.radius_au);
        assert!(e.lat_rad.abs() < 1e-5);
    }

    #[test]
    fn radius_stays_near_one_au() {
        for i in 0..24 {
            let tau = i as f64 / 240.0;
            let r = earth_heliocentric(tau).radius_au;
            assert!((0.98..1.02).contains(&r), "R = {r} at tau = {tau}");
        }
    }
}
