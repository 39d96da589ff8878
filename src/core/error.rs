use thiserror::Error;

/// Message returned when the bounding box around the user holds no airport
pub const NO_AIRPORT_MESSAGE: &str =
    "You don't appear to be at an airport. Or near one. Or even within 70 miles of a far one. Awkward :/";

/// Failures that stop a nearest-airport lookup
///
/// The `Display` text of every variant is what the HTTP layer returns in
/// the `err` field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{}", NO_AIRPORT_MESSAGE)]
    NoCandidateFound,

    #[error("Airport storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Business search unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("No restaurant found: {0}")]
    NoResultFound(String),
}
