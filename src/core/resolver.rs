use std::sync::Arc;

use crate::core::{assemble, select_nearest, DistanceUnit, ResolveError, Response};
use crate::models::Point;
use crate::services::{CandidateProvider, EnrichmentClient};

/// Nearest-airport lookup pipeline
///
/// # Pipeline Stages
/// 1. Candidate airports inside the configured box around the user
/// 2. Nearest-airport selection
/// 3. Restaurant lookup at the selected airport
/// 4. Response assembly
///
/// The first failing stage ends the lookup.
#[derive(Clone)]
pub struct Resolver {
    candidates: Arc<dyn CandidateProvider>,
    enrichment: Arc<dyn EnrichmentClient>,
    closeness: f64,
    unit: DistanceUnit,
}

impl Resolver {
    pub fn new(
        candidates: Arc<dyn CandidateProvider>,
        enrichment: Arc<dyn EnrichmentClient>,
        closeness: f64,
        unit: DistanceUnit,
    ) -> Self {
        Self {
            candidates,
            enrichment,
            closeness,
            unit,
        }
    }

    pub async fn resolve(&self, query: Point) -> Result<Response, ResolveError> {
        let airports = self.candidates.find_near(query, self.closeness).await?;

        tracing::debug!(
            "Found {} candidate airports around ({}, {})",
            airports.len(),
            query.x,
            query.y
        );

        let selection = select_nearest(query, airports)?;
        let nearest = &selection.nearest.airport;

        let business = self
            .enrichment
            .find_nearest_restaurant(nearest.location(), &nearest.iata)
            .await?;

        tracing::info!(
            "Resolved ({}, {}) to {} with restaurant {}",
            query.x,
            query.y,
            nearest.iata,
            business.name
        );

        Ok(assemble(selection, business, query, self.unit))
    }

    /// Whether the airport store answers
    pub async fn storage_healthy(&self) -> bool {
        self.candidates.health_check().await
    }
}
