use std::fmt;
use std::fmt::Formatter;

/// A validated point on the globe
///
/// The only way to get hold of one is through [`Coordinates::new`], so anything
/// accepting `Coordinates` can rely on the values being in range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validates and wraps a latitude/longitude pair
    ///
    /// Latitude is checked before longitude. NaN is never in range.
    ///
    /// # Arguments
    ///
    /// * 'latitude' - degrees, -90 to 90 inclusive
    /// * 'longitude' - degrees, -180 to 180 inclusive
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "lat {}, lon {}", self.latitude, self.longitude)
    }
}

/// Coordinate out of range, carrying the rejected value
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CoordinateError {
    Latitude(f64),
    Longitude(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::Latitude(v) => write!(f, "Latitude must be between -90 and 90 degrees, got {}.", v),
            CoordinateError::Longitude(v) => write!(f, "Longitude must be between -180 and 180 degrees, got {}.", v),
        }
    }
}
