// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Places provider
// PURPOSE: Implement the SDK boundary on top of the Places web service

use crate::errors::MapsError;
use crate::models::{
    AutocompletionRequest, PlaceDetail, PlaceDetailsRequest, PlacesServiceStatus, Prediction,
};
use crate::services::sdk::{
    AttributionContainer, AutocompleteService, DetailsCallback, LoaderFactory, LoaderOptions,
    MapsLoader, MapsNamespace, PlacesService, PredictionsCallback,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Library that must be requested for autocomplete and details
const PLACES_LIBRARY: &str = "places";

/// Builds Google loaders
/// DOCUMENTATION: Validates loader options before anything touches the network
pub struct GoogleLoaderFactory {
    /// Base URL for the Places web service
    base_url: String,
}

impl GoogleLoaderFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LoaderFactory for GoogleLoaderFactory {
    fn create(&self, options: LoaderOptions) -> Result<Arc<dyn MapsLoader>, MapsError> {
        if options.api_key.trim().is_empty() {
            return Err(MapsError::Configuration(
                "Google Maps API key not configured".to_string(),
            ));
        }

        if !options.libraries.iter().any(|l| l == PLACES_LIBRARY) {
            return Err(MapsError::Configuration(format!(
                "the '{}' library must be requested",
                PLACES_LIBRARY
            )));
        }

        reqwest::Url::parse(&self.base_url).map_err(|e| {
            MapsError::Configuration(format!("invalid base URL {}: {}", self.base_url, e))
        })?;

        Ok(Arc::new(GoogleMapsLoader {
            options,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        }))
    }
}

/// Google SDK loader
pub struct GoogleMapsLoader {
    options: LoaderOptions,
    base_url: String,
}

#[async_trait]
impl MapsLoader for GoogleMapsLoader {
    async fn load(&self) -> Result<Arc<dyn MapsNamespace>, MapsError> {
        let client = Client::builder()
            .user_agent(concat!("auphere-maps/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                log::error!("Failed to build HTTP client: {}", e);
                MapsError::ExternalApi(format!("HTTP client: {}", e))
            })?;

        log::info!(
            "Google Maps loaded (version={}, libraries={})",
            self.options.version,
            self.options.libraries.join(",")
        );

        Ok(Arc::new(GoogleMapsNamespace {
            api: Arc::new(GoogleApi {
                client,
                api_key: self.options.api_key.clone(),
                base_url: self.base_url.clone(),
                language: self.options.language.clone(),
            }),
        }))
    }
}

/// Loaded Google namespace
pub struct GoogleMapsNamespace {
    api: Arc<GoogleApi>,
}

impl MapsNamespace for GoogleMapsNamespace {
    fn autocomplete_service(&self) -> Result<Arc<dyn AutocompleteService>, MapsError> {
        Handle::try_current()
            .map_err(|e| MapsError::Construction(format!("autocomplete service: {}", e)))?;

        Ok(Arc::new(GoogleAutocompleteService {
            api: self.api.clone(),
        }))
    }

    fn places_service(
        &self,
        container: AttributionContainer,
    ) -> Result<Arc<dyn PlacesService>, MapsError> {
        Handle::try_current()
            .map_err(|e| MapsError::Construction(format!("places service: {}", e)))?;

        Ok(Arc::new(GooglePlacesService {
            api: self.api.clone(),
            container,
        }))
    }
}

/// Autocomplete backed by /autocomplete/json
/// DOCUMENTATION: Requests run on the runtime of the calling task
pub struct GoogleAutocompleteService {
    api: Arc<GoogleApi>,
}

impl AutocompleteService for GoogleAutocompleteService {
    fn get_place_predictions(&self, request: AutocompletionRequest, callback: PredictionsCallback) {
        let api = self.api.clone();
        tokio::spawn(async move {
            let (predictions, status) = api.autocomplete(&request).await;
            callback(predictions, status);
        });
    }
}

/// Place details backed by /details/json
pub struct GooglePlacesService {
    api: Arc<GoogleApi>,
    container: AttributionContainer,
}

impl PlacesService for GooglePlacesService {
    fn get_details(&self, request: PlaceDetailsRequest, callback: DetailsCallback) {
        let api = self.api.clone();
        let container = self.container.clone();
        tokio::spawn(async move {
            let (detail, status, attributions) = api.details(&request).await;
            container.record(&attributions);
            callback(detail, status);
        });
    }
}

/// Response from Place Autocomplete
#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
    status: PlacesServiceStatus,
    error_message: Option<String>,
}

/// Response from Place Details
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetail>,
    status: PlacesServiceStatus,
    #[serde(default)]
    html_attributions: Vec<String>,
    error_message: Option<String>,
}

/// Shared HTTP plumbing
/// DOCUMENTATION: Transport and parse failures surface as UNKNOWN_ERROR,
/// the same way the browser SDK reports a failed network round trip.
/// The key travels in the query string, so errors are logged without their URL
struct GoogleApi {
    client: Client,
    api_key: String,
    base_url: String,
    language: Option<String>,
}

impl GoogleApi {
    async fn autocomplete(
        &self,
        request: &AutocompletionRequest,
    ) -> (Vec<Prediction>, PlacesServiceStatus) {
        let url = format!("{}/autocomplete/json", self.base_url);

        let mut params = vec![
            ("input", request.input.clone()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = request.session_token {
            params.push(("sessiontoken", token.to_string()));
        }
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }

        log::debug!("Google autocomplete: input={:?}", request.input);

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Google autocomplete request failed: {}", e.without_url());
                return (Vec::new(), PlacesServiceStatus::UnknownError);
            }
        };

        if !response.status().is_success() {
            log::error!("Google autocomplete HTTP error {}", response.status());
            return (Vec::new(), PlacesServiceStatus::UnknownError);
        }

        match response.json::<AutocompleteResponse>().await {
            Ok(body) => {
                if let Some(msg) = &body.error_message {
                    log::warn!("Google autocomplete status {}: {}", body.status, msg);
                }
                (body.predictions, body.status)
            }
            Err(e) => {
                log::error!("Failed to parse autocomplete response: {}", e.without_url());
                (Vec::new(), PlacesServiceStatus::UnknownError)
            }
        }
    }

    async fn details(
        &self,
        request: &PlaceDetailsRequest,
    ) -> (Option<PlaceDetail>, PlacesServiceStatus, Vec<String>) {
        let url = format!("{}/details/json", self.base_url);

        let mut params = vec![
            ("place_id", request.place_id.clone()),
            ("fields", request.fields.join(",")),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = request.session_token {
            params.push(("sessiontoken", token.to_string()));
        }
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }

        log::debug!("Google details lookup: place_id={}", request.place_id);

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Google details request failed: {}", e.without_url());
                return (None, PlacesServiceStatus::UnknownError, Vec::new());
            }
        };

        if !response.status().is_success() {
            log::error!("Google details HTTP error {}", response.status());
            return (None, PlacesServiceStatus::UnknownError, Vec::new());
        }

        match response.json::<DetailsResponse>().await {
            Ok(body) => {
                if let Some(msg) = &body.error_message {
                    log::warn!("Google details status {}: {}", body.status, msg);
                }
                (body.result, body.status, body.html_attributions)
            }
            Err(e) => {
                log::error!("Failed to parse details response: {}", e.without_url());
                (None, PlacesServiceStatus::UnknownError, Vec::new())
            }
        }
    }
}
