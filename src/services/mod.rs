// Service exports
pub mod postgres;
pub mod yelp;

pub use postgres::{PostgresClient, PostgresError};
pub use yelp::{YelpClient, YelpError, YelpSearch};

use async_trait::async_trait;

use crate::core::ResolveError;
use crate::models::{Airport, Business, Point};

/// Source of airports around a query point
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Airports inside the square box of `radius` degrees around `query`
    async fn find_near(&self, query: Point, radius: f64) -> Result<Vec<Airport>, ResolveError>;

    async fn health_check(&self) -> bool {
        true
    }
}

/// Source of restaurant recommendations near an airport
#[async_trait]
pub trait EnrichmentClient: Send + Sync {
    async fn find_nearest_restaurant(
        &self,
        location: Point,
        location_code: &str,
    ) -> Result<Business, ResolveError>;
}
