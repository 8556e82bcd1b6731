use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoLocationError {
    #[error("Expected two space-separated coordinates, got {0} token(s)")]
    WrongTokenCount(usize),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Latitude/longitude pair of a geotagged sound
///
/// The remote API transmits geotags as a single string of two
/// space-separated decimal numbers, e.g. `"41.0082325664 28.9731252193"`.
/// Parsing and formatting round-trip through that representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a location from raw coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl FromStr for GeoLocation {
    type Err = GeoLocationError;

    /// Parse from the API's `"lat lon"` string
    ///
    /// # Examples
    /// ```
    /// # use sound_primitives::{GeoLocation, GeoLocationError};
    /// let geo: GeoLocation = "41.0082325664 28.9731252193".parse()?;
    /// assert_eq!(geo.latitude(), 41.0082325664);
    /// assert_eq!(geo.longitude(), 28.9731252193);
    /// # Ok::<(), GeoLocationError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();

        if tokens.len() != 2 {
            return Err(GeoLocationError::WrongTokenCount(tokens.len()));
        }

        let latitude = tokens[0]
            .parse::<f64>()
            .map_err(|_| GeoLocationError::InvalidCoordinate(tokens[0].to_string()))?;
        let longitude = tokens[1]
            .parse::<f64>()
            .map_err(|_| GeoLocationError::InvalidCoordinate(tokens[1].to_string()))?;

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{}` on f64 prints the shortest representation that parses back
        // to the same value, so Display/FromStr round-trip exactly.
        write!(f, "{} {}", self.latitude, self.longitude)
    }
}

// Serialize as the API's string form
impl Serialize for GeoLocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// Deserialize from the API's string form
impl<'de> Deserialize<'de> for GeoLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
