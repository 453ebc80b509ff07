//! Great-circle distance between two coordinates.

/// Mean Earth radius used for every distance shown to visitors.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between `(lat1, lon1)` and `(lat2, lon2)`,
/// all in decimal degrees.
///
/// NaN in any argument propagates to the result.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLANDRE: (f64, f64) = (48.893_015, 2.377_504);
    const BALARD: (f64, f64) = (48.841_116, 2.278_023);

    #[test]
    fn same_point_is_zero() {
        for (lat, lng) in [FLANDRE, BALARD, (0.0, 0.0), (-33.86, 151.2), (89.9, -179.9)] {
            assert_eq!(distance_km(lat, lng, lat, lng), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(FLANDRE.0, FLANDRE.1, BALARD.0, BALARD.1);
        let back = distance_km(BALARD.0, BALARD.1, FLANDRE.0, FLANDRE.1);
        assert!((there - back).abs() < 1e-9, "{there} vs {back}");
    }

    #[test]
    fn paris_centers_are_a_few_km_apart() {
        let d = distance_km(FLANDRE.0, FLANDRE.1, BALARD.0, BALARD.1);
        assert!((8.0..10.0).contains(&d), "unexpected distance {d}");
    }

    #[test]
    fn one_degree_of_latitude_matches_radius() {
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn nan_propagates() {
        assert!(distance_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }
}
