use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::ResolveError;
use crate::models::Point;

/// Query string of the nearest-airport endpoint
///
/// Unknown parameters are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NearestQuery {
    #[validate(required, custom(function = "validate_coordinate"))]
    pub x: Option<String>,
    #[validate(required, custom(function = "validate_coordinate"))]
    pub y: Option<String>,
}

impl NearestQuery {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    /// Validate both coordinates and convert them into a query point
    pub fn point(&self) -> Result<Point, ResolveError> {
        if let Err(errors) = self.validate() {
            let codes: Vec<String> = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .map(|e| e.code.to_string())
                .collect();
            let has = |code: &str| codes.iter().any(|c| c == code);

            // A missing parameter wins, then a non-numeric one; a numeric value
            // with characters outside digits, `-` and `.` counts as missing.
            return Err(if has("required") || !has("coordinate") {
                ResolveError::InvalidInput("GET arguments x and y are required.".to_string())
            } else {
                ResolveError::InvalidInput("GET arguments x and y must be coordinates.".to_string())
            });
        }

        match (self.x.as_deref(), self.y.as_deref()) {
            (Some(x), Some(y)) => Ok(Point::new(parse_coordinate(x)?, parse_coordinate(y)?)),
            _ => Err(ResolveError::InvalidInput(
                "GET arguments x and y are required.".to_string(),
            )),
        }
    }
}

fn parse_coordinate(value: &str) -> Result<f64, ResolveError> {
    value.trim().parse::<f64>().map_err(|_| {
        ResolveError::InvalidInput("GET arguments x and y must be coordinates.".to_string())
    })
}

/// Coordinates may only contain digits, `-` and `.`, and must parse as a number
///
/// Values that read as numbers but use other characters (`1e3`, `+1`, ` 1`)
/// fail with code `filtered` rather than `coordinate`.
fn validate_coordinate(value: &str) -> Result<(), ValidationError> {
    let allowed = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '.');

    if allowed && value.parse::<f64>().is_ok() {
        return Ok(());
    }

    if looks_numeric(value) {
        return Err(ValidationError::new("filtered"));
    }

    Err(ValidationError::new("coordinate"))
}

/// Decimal or exponent notation, optionally signed and padded with whitespace
fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok()
}
