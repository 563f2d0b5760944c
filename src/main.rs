// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, load the maps SDK, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use dotenv::dotenv;
use services::{start_cleanup_task, GoogleLoaderFactory, MapServiceFacade, SessionStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        anyhow::bail!(e);
    }

    log::info!("Starting auphere-maps service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Build the map facade and load the SDK; failures leave it not-ready
    let factory = Arc::new(GoogleLoaderFactory::new(config.google_maps_base_url.clone()));
    let facade = web::Data::new(MapServiceFacade::new(config.loader_options(), factory));
    facade.initialize().await;
    if !facade.is_ready() {
        log::warn!("Map service not ready; lookups return 503 until POST /maps/init succeeds");
    }

    // 5. Per-client sessions (cleanup runs every minute)
    let sessions = Arc::new(SessionStore::new(
        config.session_ttl_seconds,
        config.max_sessions,
    ));
    start_cleanup_task(sessions.clone(), 60);
    log::info!(
        "Initialized session store (TTL: {}s, max: {})",
        config.session_ttl_seconds,
        config.max_sessions
    );
    let sessions = web::Data::from(sessions);

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            .app_data(facade.clone())
            .app_data(sessions.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::maps_config)
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {}", server_addr))?
    .run()
    .await
    .context("HTTP server error")
}
