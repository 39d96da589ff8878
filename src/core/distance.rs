use std::convert::Infallible;
use std::str::FromStr;

use crate::models::{BoundingBox, Point};

/// Statute miles per degree of arc (60 nautical miles * 1.1515)
const MILES_PER_DEGREE: f64 = 60.0 * 1.1515;
const KM_PER_MILE: f64 = 1.609344;
const NAUTICAL_PER_MILE: f64 = 0.8684;

/// Unit of a reported great-circle distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
    NauticalMiles,
}

impl DistanceUnit {
    fn convert_miles(self, miles: f64) -> f64 {
        match self {
            DistanceUnit::Miles => miles,
            DistanceUnit::Kilometers => miles * KM_PER_MILE,
            DistanceUnit::NauticalMiles => miles * NAUTICAL_PER_MILE,
        }
    }
}

/// `K` and `N` select kilometers and nautical miles, anything else is miles
impl FromStr for DistanceUnit {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "K" => DistanceUnit::Kilometers,
            "N" => DistanceUnit::NauticalMiles,
            _ => DistanceUnit::Miles,
        })
    }
}

/// Euclidean distance in raw coordinate units
///
/// Only meaningful for ranking candidates against each other.
#[inline]
pub fn planar_distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx.powi(2) + dy.powi(2)).sqrt()
}

/// Great-circle distance between two points using the spherical law of cosines
///
/// # Arguments
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
/// * `unit` - Unit of the returned distance
#[inline]
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: DistanceUnit) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let theta = (lon1 - lon2).to_radians();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let cos_arc = lat1_rad.sin() * lat2_rad.sin() + lat1_rad.cos() * lat2_rad.cos() * theta.cos();

    // Rounding can push identical or antipodal points just outside acos' domain
    let arc = cos_arc.clamp(-1.0, 1.0).acos().to_degrees();

    unit.convert_miles(arc * MILES_PER_DEGREE)
}

/// Square box of `closeness` degrees on each side of `center`
pub fn bounding_box(center: Point, closeness: f64) -> BoundingBox {
    BoundingBox {
        min_x: center.x - closeness,
        max_x: center.x + closeness,
        min_y: center.y - closeness,
        max_y: center.y + closeness,
    }
}

/// Check if a point is within a bounding box (bounds inclusive)
#[inline]
pub fn is_within_bounding_box(point: Point, bbox: &BoundingBox) -> bool {
    point.x >= bbox.min_x
        && point.x <= bbox.max_x
        && point.y >= bbox.min_y
        && point.y <= bbox.max_y
}
