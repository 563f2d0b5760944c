// src/models/status.rs
// DOCUMENTATION: Provider status codes
// PURPOSE: Typed view of the status string attached to every provider reply

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status reported by the Places service alongside every result
/// DOCUMENTATION: `Ok` is the only success sentinel. Any other value,
/// `ZeroResults` included, is treated as a failed lookup by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacesServiceStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    UnknownError,
    /// Any status string this crate does not know about
    #[serde(other)]
    Unrecognized,
}

impl PlacesServiceStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, PlacesServiceStatus::Ok)
    }

    /// Wire representation, as the provider spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacesServiceStatus::Ok => "OK",
            PlacesServiceStatus::ZeroResults => "ZERO_RESULTS",
            PlacesServiceStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            PlacesServiceStatus::RequestDenied => "REQUEST_DENIED",
            PlacesServiceStatus::InvalidRequest => "INVALID_REQUEST",
            PlacesServiceStatus::NotFound => "NOT_FOUND",
            PlacesServiceStatus::UnknownError => "UNKNOWN_ERROR",
            PlacesServiceStatus::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for PlacesServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
