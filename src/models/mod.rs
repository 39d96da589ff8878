// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Airport, BoundingBox, Business, Point, RankedAirport, Selection};
pub use requests::NearestQuery;
pub use responses::{ErrorResponse, HealthResponse};
