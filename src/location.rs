use crate::{Coordinate, Point};
use geo_types::Rect;
use serde::{Deserialize, Serialize};

/// Marker used by the IP providers for loopback addresses
pub static LOCALHOST: &str = "localhost";

/// A bounding box
///
/// Either all four edges are known or the box is absent altogether.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Bounds {
            south,
            west,
            north,
            east,
        }
    }

    /// A zero-area box sitting on a single point
    pub fn from_point(latitude: f64, longitude: f64) -> Self {
        Bounds::new(latitude, longitude, latitude, longitude)
    }

    /// Convert into a `Rect` in lon, lat (x, y) order
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coordinate {
                x: self.west,
                y: self.south,
            },
            Coordinate {
                x: self.east,
                y: self.north,
            },
        )
    }
}

/// The canonical result of a geocoding lookup, whatever service produced it.
///
/// Every field a service did not supply is `None`. A value the service
/// returned as an empty string stays `Some("")`.
///
/// The administrative fields go from finest (`street_number`) to coarsest
/// (`country`). `timezone` is part of the record but none of the bundled
/// providers fill it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bounds: Option<Bounds>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub county: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub timezone: Option<String>,
}

impl Location {
    /// The synthetic record returned for loopback addresses
    pub fn localhost() -> Self {
        Location {
            locality: Some(LOCALHOST.to_string()),
            county: Some(LOCALHOST.to_string()),
            region: Some(LOCALHOST.to_string()),
            country: Some(LOCALHOST.to_string()),
            ..Default::default()
        }
    }

    /// The coordinates as a `Point` in lon, lat (x, y) order, if both are known
    pub fn coordinates(&self) -> Option<Point<f64>> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

/// Normalize a country code to uppercase ISO alpha-2 form
pub(crate) fn normalize_country_code(code: &str) -> String {
    code.trim().to_uppercase()
}
