use geo::{Distance, HaversineMeasure};

/// Mean Earth radius used by the great-circle model.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

const HAVERSINE: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_METERS);

/// A geographic position, stored as a `geo::Point` (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn is_finite(&self) -> bool {
        self.lat().is_finite() && self.lon().is_finite()
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat()) && (-180.0..=180.0).contains(&self.lon())
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, to: &Location) -> f64 {
        HAVERSINE.distance(self.point, to.point)
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

impl From<&Location> for geo::Coord<f64> {
    fn from(val: &Location) -> Self {
        geo::Coord {
            x: val.lon(),
            y: val.lat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_same_point() {
        let location = Location::from_lat_lon(12.9716, 77.5946);
        assert_eq!(location.haversine_distance(&location), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let from = Location::from_lat_lon(0.0, 0.0);
        let to = Location::from_lat_lon(1.0, 0.0);

        // One degree along a meridian is R * pi / 180
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        assert!((from.haversine_distance(&to) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_point_conversion_uses_lon_as_x() {
        let location = Location::from_lat_lon(48.85, 2.35);
        let point: geo::Point = (&location).into();

        assert_eq!(point.x(), 2.35);
        assert_eq!(point.y(), 48.85);
    }

    #[test]
    fn test_range_validation() {
        assert!(Location::from_lat_lon(45.0, 120.0).is_in_range());
        assert!(!Location::from_lat_lon(91.0, 0.0).is_in_range());
        assert!(!Location::from_lat_lon(0.0, -181.0).is_in_range());
        assert!(!Location::from_lat_lon(f64::NAN, 0.0).is_finite());
    }
}
