// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::services::LoaderOptions;
use dotenv::dotenv;
use std::env;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps API key
    pub google_maps_api_key: String,

    /// Pinned SDK release channel (weekly, quarterly, or a fixed version)
    pub google_maps_version: String,

    /// Feature libraries requested from the loader (e.g., ["places"])
    pub google_maps_libraries: Vec<String>,

    /// Base URL of the Places web service
    pub google_maps_base_url: String,

    /// Preferred response language (e.g., "es")
    pub google_maps_language: Option<String>,

    /// Idle lifetime of a client session in seconds
    pub session_ttl_seconds: u64,

    /// Maximum number of live client sessions
    pub max_sessions: usize,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8003".to_string())
                .parse()
                .unwrap_or(8003),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),

            google_maps_version: env::var("GOOGLE_MAPS_VERSION")
                .unwrap_or_else(|_| "weekly".to_string()),

            google_maps_libraries: parse_libraries(
                &env::var("GOOGLE_MAPS_LIBRARIES").unwrap_or_else(|_| "places".to_string()),
            ),

            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            google_maps_language: env::var("GOOGLE_MAPS_LANGUAGE")
                .ok()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),

            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .unwrap_or(180),

            max_sessions: env::var("MAX_SESSIONS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    /// A missing API key is only a warning: the facade stays not-ready
    pub fn validate(&self) -> Result<(), String> {
        if reqwest::Url::parse(&self.google_maps_base_url).is_err() {
            return Err(format!(
                "GOOGLE_MAPS_BASE_URL is not a valid URL: {}",
                self.google_maps_base_url
            ));
        }

        if self.google_maps_libraries.is_empty() {
            return Err("GOOGLE_MAPS_LIBRARIES must name at least one library".to_string());
        }

        if self.session_ttl_seconds == 0 || self.max_sessions == 0 {
            return Err("SESSION_TTL_SECONDS and MAX_SESSIONS must be positive".to_string());
        }

        if self.google_maps_api_key.is_empty() {
            log::warn!("GOOGLE_MAPS_API_KEY not configured - lookups will not work");
        }

        Ok(())
    }

    /// Options handed to the SDK loader
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            api_key: self.google_maps_api_key.clone(),
            version: self.google_maps_version.clone(),
            libraries: self.google_maps_libraries.clone(),
            language: self.google_maps_language.clone(),
        }
    }
}

fn parse_libraries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
