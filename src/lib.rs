//! Airport Eats - nearest airport lookup with a restaurant recommendation
//!
//! Given a user's coordinates, finds the closest airport in a fixed search
//! box and pairs it with a top-rated restaurant from a business search API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{great_circle_distance, planar_distance, select_nearest, DistanceUnit, ResolveError, Resolver, Response};
pub use crate::models::{Airport, Business, Point, Selection};
