// src/services/sdk.rs
// DOCUMENTATION: Provider SDK boundary
// PURPOSE: Traits the facade drives; implemented by the Google client and by test stubs

use crate::errors::MapsError;
use crate::models::{
    AutocompletionRequest, PlaceDetail, PlaceDetailsRequest, PlacesServiceStatus, Prediction,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Completion callback for autocomplete requests
pub type PredictionsCallback = Box<dyn FnOnce(Vec<Prediction>, PlacesServiceStatus) + Send>;

/// Completion callback for detail requests
pub type DetailsCallback = Box<dyn FnOnce(Option<PlaceDetail>, PlacesServiceStatus) + Send>;

/// Options the SDK loader is configured with
/// DOCUMENTATION: Immutable once the loader is built
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    pub api_key: String,
    /// Pinned release channel
    pub version: String,
    /// Feature libraries to load (e.g., ["places"])
    pub libraries: Vec<String>,
    pub language: Option<String>,
}

/// Builds SDK loaders from options
pub trait LoaderFactory: Send + Sync {
    fn create(&self, options: LoaderOptions) -> Result<Arc<dyn MapsLoader>, MapsError>;
}

/// SDK bootstrap loader
#[async_trait]
pub trait MapsLoader: Send + Sync {
    /// Load the SDK and hand back its root namespace
    async fn load(&self) -> Result<Arc<dyn MapsNamespace>, MapsError>;
}

/// Loaded SDK root namespace
pub trait MapsNamespace: Send + Sync {
    fn autocomplete_service(&self) -> Result<Arc<dyn AutocompleteService>, MapsError>;

    /// The places service needs somewhere to put attributions; the facade
    /// passes a detached container that is never displayed.
    fn places_service(
        &self,
        container: AttributionContainer,
    ) -> Result<Arc<dyn PlacesService>, MapsError>;
}

/// Autocomplete sub-service
pub trait AutocompleteService: Send + Sync {
    /// Invokes `callback` exactly once with the results and status
    fn get_place_predictions(&self, request: AutocompletionRequest, callback: PredictionsCallback);
}

/// Places-detail sub-service
pub trait PlacesService: Send + Sync {
    /// Invokes `callback` exactly once with the result and status
    fn get_details(&self, request: PlaceDetailsRequest, callback: DetailsCallback);
}

/// Off-screen sink for provider attributions
/// DOCUMENTATION: Clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct AttributionContainer {
    attributions: Arc<Mutex<Vec<String>>>,
}

impl AttributionContainer {
    /// Create a container not attached to any visible surface
    pub fn detached() -> Self {
        Self::default()
    }

    /// Record attributions, skipping ones already present
    pub fn record(&self, html_attributions: &[String]) {
        if let Ok(mut stored) = self.attributions.lock() {
            for attribution in html_attributions {
                if !stored.contains(attribution) {
                    stored.push(attribution.clone());
                }
            }
        }
    }

    pub fn attributions(&self) -> Vec<String> {
        self.attributions
            .lock()
            .map(|stored| stored.clone())
            .unwrap_or_default()
    }
}
