// src/services/map_facade.rs
// DOCUMENTATION: Map service facade
// PURPOSE: Lazily load the maps SDK, cache its service handles, and proxy lookups

use crate::errors::MapsError;
use crate::models::{
    AutocompletionRequest, PlaceDetail, PlaceDetailsRequest, PlacesServiceStatus, Prediction,
};
use crate::services::sdk::{
    AttributionContainer, AutocompleteService, LoaderFactory, LoaderOptions, MapsLoader,
    MapsNamespace, PlacesService,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex, OnceCell, RwLock};
use uuid::Uuid;

/// How far initialization has progressed
/// DOCUMENTATION: Uninitialized -> LoaderReady -> ServiceReady, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacadeState {
    Uninitialized,
    LoaderReady,
    ServiceReady,
}

/// Per-client autocomplete state
/// DOCUMENTATION: Holds one client's last predictions and its current
/// autocomplete session token. Never shared between clients.
pub struct MapSession {
    /// Last fetched predictions, replaced wholesale
    predictions: RwLock<Vec<Prediction>>,
    /// Current autocomplete session; ended by the next detail lookup
    token: Mutex<Option<Uuid>>,
}

impl MapSession {
    pub fn new() -> Self {
        Self {
            predictions: RwLock::new(Vec::new()),
            token: Mutex::new(None),
        }
    }

    /// Snapshot of this client's last predictions
    pub async fn predictions(&self) -> Vec<Prediction> {
        self.predictions.read().await.clone()
    }

    async fn replace_predictions(&self, predictions: Vec<Prediction>) {
        *self.predictions.write().await = predictions;
    }

    async fn clear_predictions(&self) {
        self.predictions.write().await.clear();
    }

    /// Token of the open session, minting one if none is open
    async fn token(&self) -> Uuid {
        *self.token.lock().await.get_or_insert_with(Uuid::new_v4)
    }

    /// Close the open session, returning its token
    async fn end(&self) -> Option<Uuid> {
        self.token.lock().await.take()
    }
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Facade over the maps SDK
/// DOCUMENTATION: One instance per process, shared by all request handlers.
/// Handles are process-wide; per-client state lives in `MapSession`. The
/// facade keeps one session of its own for single-consumer use.
/// Every handle is built at most once; concurrent callers wait on the same
/// in-flight construction. Failed constructions leave the cell empty, so a
/// later explicit call may try again.
pub struct MapServiceFacade {
    options: LoaderOptions,
    factory: Arc<dyn LoaderFactory>,
    loader: OnceCell<Arc<dyn MapsLoader>>,
    service: OnceCell<Arc<dyn MapsNamespace>>,
    autocomplete: OnceCell<Arc<dyn AutocompleteService>>,
    places: OnceCell<Arc<dyn PlacesService>>,
    /// Off-screen container handed to the places service
    attributions: AttributionContainer,
    /// Session used by the session-less lookups
    session: MapSession,
}

impl MapServiceFacade {
    pub fn new(options: LoaderOptions, factory: Arc<dyn LoaderFactory>) -> Self {
        Self {
            options,
            factory,
            loader: OnceCell::new(),
            service: OnceCell::new(),
            autocomplete: OnceCell::new(),
            places: OnceCell::new(),
            attributions: AttributionContainer::detached(),
            session: MapSession::new(),
        }
    }

    /// Build the loader and load the SDK
    /// DOCUMENTATION: Idempotent. Never fails to the caller; failures are
    /// logged and the facade stays in the last state it reached.
    pub async fn initialize(&self) {
        log::info!(
            "Initializing map service (version={}, libraries={})",
            self.options.version,
            self.options.libraries.join(",")
        );

        let loader = match self.ensure_loader().await {
            Some(loader) => loader,
            None => {
                log::error!("Map service not configured: no loader available");
                return;
            }
        };

        if self.service.initialized() {
            log::debug!("Map service already loaded");
            return;
        }

        match self
            .service
            .get_or_try_init(|| async { loader.load().await })
            .await
        {
            Ok(_) => log::info!("Map service ready"),
            Err(e) => log::error!("Failed to load map service: {}", e),
        }
    }

    async fn ensure_loader(&self) -> Option<Arc<dyn MapsLoader>> {
        let result = self
            .loader
            .get_or_try_init(|| async {
                log::info!("Creating map loader");
                self.factory.create(self.options.clone())
            })
            .await;

        match result {
            Ok(loader) => Some(loader.clone()),
            Err(e) => {
                log::error!("Failed to create map loader: {}", e);
                None
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.service.initialized()
    }

    pub fn state(&self) -> FacadeState {
        if self.service.initialized() {
            FacadeState::ServiceReady
        } else if self.loader.initialized() {
            FacadeState::LoaderReady
        } else {
            FacadeState::Uninitialized
        }
    }

    /// Snapshot of the predictions last fetched through the facade's own session
    #[allow(dead_code)]
    pub async fn predictions(&self) -> Vec<Prediction> {
        self.session.predictions().await
    }

    /// Attributions collected from detail lookups so far
    pub fn attributions(&self) -> Vec<String> {
        self.attributions.attributions()
    }

    /// Fetch predictions for `query`, reporting failures only through the log
    #[allow(dead_code)]
    pub async fn fetch_predictions(&self, query: &str) {
        let _ = self.try_fetch_predictions(query).await;
    }

    /// Fetch predictions for `query` in the facade's own session
    #[allow(dead_code)]
    pub async fn try_fetch_predictions(&self, query: &str) -> Result<Vec<Prediction>, MapsError> {
        self.try_fetch_predictions_in(&self.session, query).await
    }

    /// Fetch predictions for `query` on behalf of `session`
    /// DOCUMENTATION: Blank input clears the list without a provider call.
    /// Not-ready and construction failures leave the list untouched; a
    /// failed lookup clears it so stale results never stay visible.
    pub async fn try_fetch_predictions_in(
        &self,
        session: &MapSession,
        query: &str,
    ) -> Result<Vec<Prediction>, MapsError> {
        let query = query.trim();
        if query.is_empty() {
            session.clear_predictions().await;
            return Ok(Vec::new());
        }

        let namespace = self.namespace()?;

        let service = self
            .autocomplete
            .get_or_try_init(|| async { namespace.autocomplete_service() })
            .await
            .map_err(|e| {
                log::error!("Autocomplete service unavailable: {}", e);
                e
            })?
            .clone();

        let request = AutocompletionRequest {
            input: query.to_string(),
            session_token: Some(session.token().await),
        };

        match request_predictions(service.as_ref(), request).await {
            Ok(predictions) => {
                log::debug!("{} predictions for {:?}", predictions.len(), query);
                session.replace_predictions(predictions.clone()).await;
                Ok(predictions)
            }
            Err(e) => {
                log::error!("Prediction lookup for {:?} failed: {}", query, e);
                session.clear_predictions().await;
                Err(e)
            }
        }
    }

    /// Fetch a place detail, returning `None` on any failure
    #[allow(dead_code)]
    pub async fn fetch_place_detail(&self, place_id: &str) -> Option<PlaceDetail> {
        self.try_fetch_place_detail(place_id).await.ok()
    }

    /// Fetch a place detail in the facade's own session
    #[allow(dead_code)]
    pub async fn try_fetch_place_detail(&self, place_id: &str) -> Result<PlaceDetail, MapsError> {
        self.try_fetch_place_detail_in(&self.session, place_id).await
    }

    /// Fetch a place detail on behalf of `session`
    /// DOCUMENTATION: Requests the fixed field set and ends the session's
    /// autocomplete session token. Results are never cached.
    pub async fn try_fetch_place_detail_in(
        &self,
        session: &MapSession,
        place_id: &str,
    ) -> Result<PlaceDetail, MapsError> {
        let namespace = self.namespace()?;

        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(MapsError::InvalidInput("place id is empty".to_string()));
        }

        let service = self
            .places
            .get_or_try_init(|| async { namespace.places_service(self.attributions.clone()) })
            .await
            .map_err(|e| {
                log::error!("Places service unavailable: {}", e);
                e
            })?
            .clone();

        let session_token = session.end().await;
        let request = PlaceDetailsRequest::new(place_id, session_token);

        request_details(service.as_ref(), request)
            .await
            .map_err(|e| {
                log::error!("Detail lookup for {} failed: {}", place_id, e);
                e
            })
    }

    fn namespace(&self) -> Result<Arc<dyn MapsNamespace>, MapsError> {
        match self.service.get() {
            Some(namespace) => Ok(namespace.clone()),
            None => {
                log::warn!("Map service lookup attempted before initialization");
                Err(MapsError::NotReady)
            }
        }
    }
}

/// Issue one autocomplete request and wait for its callback
async fn request_predictions(
    service: &dyn AutocompleteService,
    request: AutocompletionRequest,
) -> Result<Vec<Prediction>, MapsError> {
    let (tx, rx) = oneshot::channel();
    service.get_place_predictions(
        request,
        Box::new(move |predictions: Vec<Prediction>, status: PlacesServiceStatus| {
            let _ = tx.send((predictions, status));
        }),
    );

    let (predictions, status) = rx
        .await
        .map_err(|_| MapsError::ExternalApi("autocomplete callback dropped".to_string()))?;

    if status.is_ok() {
        Ok(predictions)
    } else {
        Err(MapsError::ProviderStatus(status))
    }
}

/// Issue one detail request and wait for its callback
async fn request_details(
    service: &dyn PlacesService,
    request: PlaceDetailsRequest,
) -> Result<PlaceDetail, MapsError> {
    let (tx, rx) = oneshot::channel();
    service.get_details(
        request,
        Box::new(move |detail: Option<PlaceDetail>, status: PlacesServiceStatus| {
            let _ = tx.send((detail, status));
        }),
    );

    let (detail, status) = rx
        .await
        .map_err(|_| MapsError::ExternalApi("details callback dropped".to_string()))?;

    if !status.is_ok() {
        return Err(MapsError::ProviderStatus(status));
    }

    detail.ok_or_else(|| MapsError::ExternalApi("OK status without a result".to_string()))
}
