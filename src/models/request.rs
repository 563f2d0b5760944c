// src/models/request.rs
// DOCUMENTATION: Request structures
// PURPOSE: Provider requests issued by the facade and query DTOs accepted over HTTP

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{PlaceDetail, PlacesServiceStatus, Prediction};

/// Fields requested on every detail lookup
pub const DETAIL_FIELDS: [&str; 5] = [
    "place_id",
    "address_components",
    "formatted_address",
    "geometry",
    "name",
];

/// Autocomplete request sent to the provider
/// DOCUMENTATION: No place-type filter is ever applied
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompletionRequest {
    /// Trimmed user input
    pub input: String,
    /// Autocomplete session the request belongs to
    pub session_token: Option<Uuid>,
}

/// Detail request sent to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailsRequest {
    pub place_id: String,
    pub fields: Vec<String>,
    /// Session opened by the preceding autocomplete requests, if any
    pub session_token: Option<Uuid>,
}

impl PlaceDetailsRequest {
    /// Build a request for the fixed detail field set
    pub fn new(place_id: impl Into<String>, session_token: Option<Uuid>) -> Self {
        Self {
            place_id: place_id.into(),
            fields: DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
            session_token,
        }
    }
}

/// Query string for GET /maps/predictions
#[derive(Debug, Deserialize, Validate)]
pub struct PredictionQuery {
    /// Raw user input; trimmed by the facade
    #[serde(default)]
    #[validate(length(max = 256))]
    pub q: String,
}

/// Response body for prediction endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionsResponse {
    pub query: String,
    pub predictions: Vec<Prediction>,
    /// Set when the provider reported no match (ZERO_RESULTS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_status: Option<PlacesServiceStatus>,
}

/// Response body for GET /maps/places/{place_id}
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceDetailResponse {
    pub result: PlaceDetail,
    pub html_attributions: Vec<String>,
}
