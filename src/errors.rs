// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::models::PlacesServiceStatus;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure the facade can report
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum MapsError {
    /// Loader could not be built (missing key, bad options) or never loaded
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A lookup was attempted before the SDK finished loading
    #[error("Map service is not ready")]
    NotReady,

    /// The provider answered with a status other than OK
    #[error("Provider returned status {0}")]
    ProviderStatus(PlacesServiceStatus),

    /// A sub-service handle could not be instantiated
    #[error("Failed to construct {0}")]
    Construction(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MapsError {
    fn error_code(&self) -> &'static str {
        match self {
            MapsError::Configuration(_) => "CONFIGURATION_ERROR",
            MapsError::NotReady => "NOT_READY",
            MapsError::ProviderStatus(_) => "PROVIDER_STATUS",
            MapsError::Construction(_) => "CONSTRUCTION_ERROR",
            MapsError::ExternalApi(_) => "EXTERNAL_API_ERROR",
            MapsError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

/// Convert MapsError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for MapsError {
    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        if let MapsError::ProviderStatus(status) = self {
            body["error"]["provider_status"] = json!(status.as_str());
        }

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            MapsError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            MapsError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            MapsError::ProviderStatus(status) => match status {
                PlacesServiceStatus::NotFound | PlacesServiceStatus::ZeroResults => {
                    StatusCode::NOT_FOUND
                }
                PlacesServiceStatus::OverQueryLimit => StatusCode::TOO_MANY_REQUESTS,
                PlacesServiceStatus::InvalidRequest => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            MapsError::Construction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MapsError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            MapsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}
