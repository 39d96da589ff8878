// Core algorithm exports
pub mod assembler;
pub mod distance;
pub mod error;
pub mod resolver;
pub mod selector;

pub use assembler::{assemble, Response};
pub use distance::{bounding_box, great_circle_distance, is_within_bounding_box, planar_distance, DistanceUnit};
pub use error::ResolveError;
pub use resolver::Resolver;
pub use selector::select_nearest;
