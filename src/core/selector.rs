use crate::core::distance::planar_distance;
use crate::core::ResolveError;
use crate::models::{Airport, Point, RankedAirport, Selection};

/// Pick the airport closest to `query` and keep the rest as `others`
///
/// Candidates are scanned once, in input order. The first candidate becomes
/// the current nearest; a later candidate replaces it only when strictly
/// closer, and the demoted airport is appended to `others` at that moment.
/// Ties keep the earlier candidate. `others` is therefore in scan order of
/// demotion, not sorted by distance.
///
/// # Errors
/// `ResolveError::NoCandidateFound` when `candidates` is empty.
pub fn select_nearest(query: Point, candidates: Vec<Airport>) -> Result<Selection, ResolveError> {
    let mut nearest: Option<RankedAirport> = None;
    let mut others = Vec::with_capacity(candidates.len().saturating_sub(1));

    for airport in candidates {
        let dist = planar_distance(query, airport.location());
        let ranked = RankedAirport { airport, dist };

        match nearest.take() {
            Some(current) if dist < current.dist => {
                others.push(current);
                nearest = Some(ranked);
            }
            Some(current) => {
                others.push(ranked);
                nearest = Some(current);
            }
            None => nearest = Some(ranked),
        }
    }

    let nearest = nearest.ok_or(ResolveError::NoCandidateFound)?;

    tracing::debug!(
        "Selected {} at planar distance {:.4} ({} others)",
        nearest.airport.iata,
        nearest.dist,
        others.len()
    );

    Ok(Selection {
        user: query,
        nearest_distance: nearest.dist,
        nearest,
        others,
    })
}
