use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The map services speak longitude first.
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        Self::new(latitude, longitude)
    }

    pub fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

pub const HOURS_NOT_SPECIFIED: &str = "Opening hours not specified";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub address: String,
    pub hours: String,
    pub coordinate: Coordinate,
    pub url: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub address: String,
    pub origin: Coordinate,
    pub place: PlaceRecord,
    pub distance_km: f64,
}

/// Map image bytes that are known to decode.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub bytes: Vec<u8>,
    pub format: image::ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl MapImage {
    pub fn decode(bytes: Vec<u8>) -> crate::utils::error::Result<Self> {
        let format = image::guess_format(&bytes)?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            format,
        })
    }

    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}
