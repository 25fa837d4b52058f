//! Zone membership classification.

use crate::geo::distance_meters;
use crate::{CheckInStatus, Coordinate, Zone};

/// Result of testing one sample against the zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipVerdict {
    pub distance_meters: f64,
    pub in_zone: bool,
}

impl MembershipVerdict {
    pub fn status(&self) -> CheckInStatus {
        CheckInStatus::from_in_zone(self.in_zone)
    }
}

/// Classifies `sample` against `zone`.
///
/// Returns `None` until both inputs are known. A sample exactly on the
/// boundary is inside. Any radius is accepted; a negative one simply never
/// contains anything.
pub fn evaluate(sample: Option<Coordinate>, zone: Option<&Zone>) -> Option<MembershipVerdict> {
    let (sample, zone) = (sample?, zone?);
    let distance = distance_meters(sample, zone.center);

    Some(MembershipVerdict {
        distance_meters: distance,
        in_zone: distance <= zone.radius_meters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_at(center: Coordinate, radius: f64) -> Zone {
        Zone::new(center, radius)
    }

    #[test]
    fn needs_both_sample_and_zone() {
        let point = Coordinate::new(10.0, 10.0);
        let zone = zone_at(point, 100.0);
        assert!(evaluate(None, Some(&zone)).is_none());
        assert!(evaluate(Some(point), None).is_none());
        assert!(evaluate(None, None).is_none());
    }

    #[test]
    fn at_center_is_in_zone_with_zero_distance() {
        let center = Coordinate::new(33.5731, -7.5898);
        let verdict = evaluate(Some(center), Some(&zone_at(center, 100.0))).unwrap();
        assert_eq!(verdict.distance_meters, 0.0);
        assert!(verdict.in_zone);
        assert_eq!(verdict.status(), CheckInStatus::InZone);
    }

    #[test]
    fn distance_equal_to_radius_counts_as_inside() {
        let center = Coordinate::new(0.0, 0.0);
        let sample = Coordinate::new(0.0, 0.001);
        let exact = distance_meters(sample, center);

        let verdict = evaluate(Some(sample), Some(&zone_at(center, exact))).unwrap();
        assert_eq!(verdict.distance_meters, exact);
        assert!(verdict.in_zone);

        let just_short = evaluate(Some(sample), Some(&zone_at(center, exact - 1e-9))).unwrap();
        assert!(!just_short.in_zone);
    }

    #[test]
    fn one_hundred_fifty_meters_out_of_a_hundred_meter_zone() {
        let center = Coordinate::new(0.0, 0.0);
        // 150 m north: 150 / 111_195 degrees of latitude.
        let sample = Coordinate::new(150.0 / 111_195.0, 0.0);
        let verdict = evaluate(Some(sample), Some(&zone_at(center, 100.0))).unwrap();
        assert!(!verdict.in_zone);
        assert!((verdict.distance_meters - 150.0).abs() <= 5.0);
        assert_eq!(verdict.status(), CheckInStatus::OutOfZone);
    }

    #[test]
    fn out_of_range_radius_does_not_error() {
        let center = Coordinate::new(5.0, 5.0);
        let sample = Coordinate::new(5.0, 5.0001);
        assert!(!evaluate(Some(sample), Some(&zone_at(center, 0.0))).unwrap().in_zone);
        assert!(!evaluate(Some(sample), Some(&zone_at(center, -10.0))).unwrap().in_zone);
        assert!(evaluate(Some(sample), Some(&zone_at(center, 1e9))).unwrap().in_zone);
        assert!(evaluate(Some(center), Some(&zone_at(center, 0.0))).unwrap().in_zone);
    }
}
