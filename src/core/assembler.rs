use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::distance::{great_circle_distance, DistanceUnit};
use crate::models::{Business, Point, Selection};

/// Combined payload returned for a nearest-airport lookup
///
/// Serializes as one flat JSON object: the selection fields, then the
/// business fields (which win on a name clash), then the two distances.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub selection: Selection,
    pub business: Business,
    pub dist_to_airport: f64,
    /// Currently computed from the same two points as `dist_to_airport`
    pub dist_to_food: f64,
}

impl Response {
    /// Flatten into a single JSON object
    pub fn to_json_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut fields = merge_objects(
            serde_json::to_value(&self.selection)?,
            serde_json::to_value(&self.business)?,
        );
        fields.insert("dist_to_airport".to_string(), Value::from(self.dist_to_airport));
        fields.insert("dist_to_food".to_string(), Value::from(self.dist_to_food));
        Ok(fields)
    }
}

/// Keys of `overlay` replace same-named keys of `base`
fn merge_objects(base: Value, overlay: Value) -> Map<String, Value> {
    let mut merged = object_fields(base);
    merged.extend(object_fields(overlay));
    merged
}

fn object_fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Merge the selection and the recommended business into a response
///
/// Both reported distances are great-circle distances from the nearest
/// airport to the user.
pub fn assemble(selection: Selection, business: Business, query: Point, unit: DistanceUnit) -> Response {
    let airport = &selection.nearest.airport;
    let dist_to_airport = great_circle_distance(airport.x, airport.y, query.x, query.y, unit);
    let dist_to_food = great_circle_distance(airport.x, airport.y, query.x, query.y, unit);

    Response {
        selection,
        business,
        dist_to_airport,
        dist_to_food,
    }
}
