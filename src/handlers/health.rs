// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Report service status and map facade readiness

use crate::services::{MapServiceFacade, SessionStore};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check(
    facade: web::Data<MapServiceFacade>,
    sessions: web::Data<SessionStore>,
) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "auphere-maps",
        "version": env!("CARGO_PKG_VERSION"),
        "ready": facade.is_ready(),
        "state": facade.state(),
        "sessions": sessions.len().await
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
