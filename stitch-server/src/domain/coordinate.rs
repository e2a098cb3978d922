//! Geographic coordinates and great-circle distance.

use std::fmt;

use super::DomainError;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Scale used to quantize coordinates for hashing (1e-5 degrees, roughly a metre).
const QUANTIZE_SCALE: f64 = 100_000.0;

/// A WGS84 latitude/longitude pair in degrees.
///
/// Coordinates are validated at construction: both components are finite,
/// latitude is within ±90 and longitude within ±180.
///
/// # Examples
///
/// ```
/// use stitch_server::domain::Coordinate;
///
/// let farmgate = Coordinate::new(23.7523, 90.3933).unwrap();
/// assert_eq!(farmgate.latitude(), 23.7523);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::InvalidCoordinate("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate(
                "latitude must be within -90..=90",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate(
                "longitude must be within -180..=180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another coordinate, in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_meters(self, other)
    }

    /// Format as `lat,lng` for use in provider query strings.
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Integer key at 1e-5 degree resolution, usable in hash maps.
    pub fn quantized(&self) -> (i64, i64) {
        (
            (self.latitude * QUANTIZE_SCALE).round() as i64,
            (self.longitude * QUANTIZE_SCALE).round() as i64,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Haversine distance between two coordinates, in metres.
pub fn haversine_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h fractionally above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(-90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn zero_distance_to_self() {
        let p = coord(23.7339, 90.4142);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = coord(0.0, 0.0);
        let b = coord(1.0, 0.0);
        // 2πR / 360
        assert!((haversine_meters(&a, &b) - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn city_scale_distance() {
        // Motijheel to Farmgate is a little under 3 km
        let motijheel = coord(23.7339, 90.4142);
        let farmgate = coord(23.7523, 90.3933);
        let d = motijheel.distance_to(&farmgate);
        assert!(d > 2_800.0 && d < 3_100.0, "got {d}");
    }

    #[test]
    fn display_and_query_formats() {
        let p = coord(23.7339, 90.4142);
        assert_eq!(p.to_string(), "23.73390, 90.41420");
        assert_eq!(p.to_query_param(), "23.7339,90.4142");
    }

    #[test]
    fn quantized_is_stable_for_nearby_noise() {
        let a = coord(23.733_900_1, 90.414_200_2);
        let b = coord(23.733_899_9, 90.414_199_8);
        assert_eq!(a.quantized(), b.quantized());
        assert_eq!(a.quantized(), (2_373_390, 9_041_420));
    }
}
