//! Great-circle distance.

use crate::Coordinate;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// The intermediate term is clamped to [0, 1]: floating-point overshoot near
/// antipodal or identical points would otherwise feed a negative value to
/// `sqrt` and return NaN.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Coordinate; 6] = [
        Coordinate::new(0.0, 0.0),
        Coordinate::new(33.5731, -7.5898),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(90.0, 0.0),
        Coordinate::new(-90.0, 180.0),
        Coordinate::new(51.5007, -0.1246),
    ];

    #[test]
    fn distance_to_self_is_zero() {
        for point in SAMPLES {
            assert_eq!(distance_meters(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                let (ab, ba) = (distance_meters(a, b), distance_meters(b, a));
                assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
            }
        }
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() <= 50.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!(d.is_finite());
        assert!((d - half).abs() < 1.0, "got {d}");

        let poles = distance_meters(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0));
        assert!((poles - half).abs() < 1.0, "got {poles}");
    }

    #[test]
    fn nearly_identical_points_stay_finite() {
        let a = Coordinate::new(45.0, 7.0);
        let b = Coordinate::new(45.0 + 1e-12, 7.0 - 1e-12);
        let d = distance_meters(a, b);
        assert!(d.is_finite());
        assert!(d < 0.001);
    }
}
