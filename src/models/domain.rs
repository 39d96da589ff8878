use serde::{Deserialize, Serialize};

/// A pair of raw coordinates (x = latitude, y = longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Airport record as stored in the `airports` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Airport {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub iata: String,
}

impl Airport {
    pub fn new(id: i64, x: f64, y: f64, iata: impl Into<String>) -> Self {
        Self {
            id,
            x,
            y,
            iata: iata.into(),
        }
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Airport annotated with its planar distance to the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAirport {
    #[serde(flatten)]
    pub airport: Airport,
    pub dist: f64,
}

/// Output of the nearest-airport selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub user: Point,
    pub nearest: RankedAirport,
    #[serde(rename = "nearest_dist")]
    pub nearest_distance: f64,
    pub others: Vec<RankedAirport>,
}

/// Restaurant recommended near an airport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Display name as returned by the search API, not URL-encoded
    pub name: String,
    /// Google Maps search link centred on the business
    pub gmap: String,
    /// Mobile business page on the search provider
    pub yelp: String,
    pub x: f64,
    pub y: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}
