// src/handlers/maps.rs
// DOCUMENTATION: HTTP handlers for map lookups
// PURPOSE: Expose the map facade to the front-end

use crate::errors::MapsError;
use crate::models::{PlaceDetailResponse, PlacesServiceStatus, PredictionQuery, PredictionsResponse};
use crate::services::{MapServiceFacade, MapSession, SessionStore};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Header carrying the client session id, in requests and responses
pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 64;

/// Read the client session id, if the client sent one
fn session_id(req: &HttpRequest) -> Result<Option<String>, MapsError> {
    let value = match req.headers().get(SESSION_HEADER) {
        Some(value) => value,
        None => return Ok(None),
    };

    let id = value
        .to_str()
        .map_err(|_| MapsError::InvalidInput("session id must be visible ASCII".to_string()))?
        .trim();

    if id.is_empty() || id.len() > MAX_SESSION_ID_LEN {
        return Err(MapsError::InvalidInput(format!(
            "session id must be 1-{} characters",
            MAX_SESSION_ID_LEN
        )));
    }

    Ok(Some(id.to_string()))
}

/// Session for this client; clients without an id get a fresh one
async fn resolve_session(
    req: &HttpRequest,
    sessions: &SessionStore,
) -> Result<(String, Arc<MapSession>), MapsError> {
    let id = session_id(req)?.unwrap_or_else(|| Uuid::new_v4().to_string());
    let session = sessions.get_or_create(&id).await;
    Ok((id, session))
}

/// POST /maps/init
/// Load the maps SDK if it is not loaded yet
pub async fn initialize(facade: web::Data<MapServiceFacade>) -> impl Responder {
    facade.initialize().await;

    HttpResponse::Ok().json(json!({
        "ready": facade.is_ready(),
        "state": facade.state()
    }))
}

/// GET /maps/predictions?q=...
/// Autocomplete predictions for the query, in the caller's session.
/// ZERO_RESULTS is a normal "no match" answer here: empty list, 200.
pub async fn get_predictions(
    req: HttpRequest,
    facade: web::Data<MapServiceFacade>,
    sessions: web::Data<SessionStore>,
    query: web::Query<PredictionQuery>,
) -> Result<impl Responder, MapsError> {
    if let Err(e) = query.validate() {
        return Err(MapsError::InvalidInput(e.to_string()));
    }

    let (id, session) = resolve_session(&req, &sessions).await?;

    let (predictions, provider_status) =
        match facade.try_fetch_predictions_in(&session, &query.q).await {
            Ok(predictions) => (predictions, None),
            Err(MapsError::ProviderStatus(PlacesServiceStatus::ZeroResults)) => {
                (Vec::new(), Some(PlacesServiceStatus::ZeroResults))
            }
            Err(e) => return Err(e),
        };

    Ok(HttpResponse::Ok()
        .insert_header((SESSION_HEADER, id))
        .json(PredictionsResponse {
            query: query.q.trim().to_string(),
            predictions,
            provider_status,
        }))
}

/// GET /maps/predictions/last
/// Predictions from the caller's most recent lookup
pub async fn last_predictions(
    req: HttpRequest,
    sessions: web::Data<SessionStore>,
) -> Result<impl Responder, MapsError> {
    let id = session_id(&req)?.ok_or_else(|| {
        MapsError::InvalidInput(format!("{} header is required", SESSION_HEADER))
    })?;

    let predictions = match sessions.get(&id).await {
        Some(session) => session.predictions().await,
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok()
        .insert_header((SESSION_HEADER, id))
        .json(json!({ "predictions": predictions })))
}

/// GET /maps/places/{place_id}
/// Place detail by provider place id, with the attributions that must be shown alongside it.
/// Ends the caller's autocomplete session.
pub async fn get_place(
    req: HttpRequest,
    facade: web::Data<MapServiceFacade>,
    sessions: web::Data<SessionStore>,
    path: web::Path<String>,
) -> Result<impl Responder, MapsError> {
    let (id, session) = resolve_session(&req, &sessions).await?;
    let place_id = path.into_inner();
    let result = facade.try_fetch_place_detail_in(&session, &place_id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((SESSION_HEADER, id))
        .json(PlaceDetailResponse {
            result,
            html_attributions: facade.attributions(),
        }))
}

/// Configuration for map routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/maps")
            .route("/init", web::post().to(initialize))
            .route("/predictions", web::get().to(get_predictions))
            .route("/predictions/last", web::get().to(last_predictions))
            .route("/places/{place_id}", web::get().to(get_place)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::health_config;
    use crate::models::{PlaceDetail, Prediction};
    use crate::services::map_facade::tests::{options, ready_facade, StubProvider, StubState};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::sync::atomic::Ordering;

    fn sessions() -> web::Data<SessionStore> {
        web::Data::new(SessionStore::new(180, 100))
    }

    fn place(place_id: &str) -> PlaceDetail {
        PlaceDetail {
            place_id: place_id.to_string(),
            address_components: Vec::new(),
            formatted_address: Some("1 Main St".to_string()),
            geometry: None,
            name: Some("Main St Cafe".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_predictions_endpoint() {
        let state = Arc::new(StubState::default());
        state.reply_predictions(
            vec![Prediction::new("A", "Main St, Springfield")],
            PlacesServiceStatus::Ok,
        );
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=%20main%20st%20")
            .insert_header((SESSION_HEADER, "client-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(SESSION_HEADER).unwrap(), "client-1");
        let body: Value = test::read_body_json(resp).await;

        assert_eq!(body["query"], "main st");
        assert_eq!(body["predictions"][0]["place_id"], "A");
        assert!(body.get("provider_status").is_none());

        let req = test::TestRequest::get()
            .uri("/maps/predictions/last")
            .insert_header((SESSION_HEADER, "client-1"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["predictions"].as_array().map(|p| p.len()), Some(1));
    }

    #[actix_web::test]
    async fn test_interleaved_clients_do_not_share_state() {
        let state = Arc::new(StubState::default());
        state.reply_detail(Some(place("bob-place")), PlacesServiceStatus::Ok);
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        state.reply_predictions(
            vec![Prediction::new("alice-place", "Alice's home address")],
            PlacesServiceStatus::Ok,
        );
        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=alice")
            .insert_header((SESSION_HEADER, "alice"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        state.reply_predictions(
            vec![Prediction::new("bob-place", "Bob's office")],
            PlacesServiceStatus::Ok,
        );
        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=bob")
            .insert_header((SESSION_HEADER, "bob"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get()
            .uri("/maps/predictions/last")
            .insert_header((SESSION_HEADER, "bob"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["predictions"].as_array().map(|p| p.len()), Some(1));
        assert_eq!(body["predictions"][0]["description"], "Bob's office");

        let req = test::TestRequest::get()
            .uri("/maps/places/bob-place")
            .insert_header((SESSION_HEADER, "bob"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=alice%20st")
            .insert_header((SESSION_HEADER, "alice"))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let predictions = state.prediction_requests.lock().unwrap().clone();
        let details = state.detail_requests.lock().unwrap().clone();
        let alice_token = predictions[0].session_token;
        let bob_token = predictions[1].session_token;

        assert_ne!(alice_token, bob_token);
        assert_eq!(details[0].session_token, bob_token);
        assert_eq!(predictions[2].session_token, alice_token);

        let req = test::TestRequest::get()
            .uri("/maps/predictions/last")
            .insert_header((SESSION_HEADER, "alice"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["predictions"][0]["place_id"], "bob-place");
        assert_eq!(state.prediction_calls.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn test_missing_session_id_gets_a_fresh_one() {
        let state = Arc::new(StubState::default());
        state.reply_predictions(vec![Prediction::new("A", "A st")], PlacesServiceStatus::Ok);
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=a")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let id = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/maps/predictions/last")
            .insert_header((SESSION_HEADER, id.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["predictions"][0]["place_id"], "A");

        let req = test::TestRequest::get()
            .uri("/maps/predictions/last")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_oversized_session_id_is_rejected() {
        let state = Arc::new(StubState::default());
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let long_id = "x".repeat(65);
        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=a")
            .insert_header((SESSION_HEADER, long_id.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.prediction_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_zero_results_is_an_empty_answer() {
        let state = Arc::new(StubState::default());
        state.reply_predictions(Vec::new(), PlacesServiceStatus::ZeroResults);
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=zzzz")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["predictions"].as_array().map(|p| p.len()), Some(0));
        assert_eq!(body["provider_status"], "ZERO_RESULTS");
    }

    #[actix_web::test]
    async fn test_predictions_before_init_is_unavailable() {
        let state = Arc::new(StubState::default());
        let facade = web::Data::new(MapServiceFacade::new(
            options(),
            Arc::new(StubProvider(state.clone())),
        ));
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/predictions?q=main")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_query_too_long_is_rejected() {
        let state = Arc::new(StubState::default());
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let uri = format!("/maps/predictions?q={}", "a".repeat(300));
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.prediction_calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_place_endpoint() {
        let state = Arc::new(StubState::default());
        state.reply_detail(Some(place("place123")), PlacesServiceStatus::Ok);
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/places/place123")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["result"]["place_id"], "place123");
        assert_eq!(body["result"]["name"], "Main St Cafe");
        assert_eq!(body["html_attributions"][0], "stub attribution");
    }

    #[actix_web::test]
    async fn test_place_not_found() {
        let state = Arc::new(StubState::default());
        state.reply_detail(None, PlacesServiceStatus::NotFound);
        let facade = web::Data::new(ready_facade(&state).await);
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/maps/places/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["provider_status"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_init_then_health() {
        let state = Arc::new(StubState::default());
        let facade = web::Data::new(MapServiceFacade::new(
            options(),
            Arc::new(StubProvider(state.clone())),
        ));
        let app = test::init_service(
            App::new()
                .app_data(facade)
                .app_data(sessions())
                .configure(health_config)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ready"], false);
        assert_eq!(body["state"], "uninitialized");
        assert_eq!(body["sessions"], 0);

        let req = test::TestRequest::post().uri("/maps/init").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ready"], true);
        assert_eq!(body["state"], "service_ready");
    }
}
