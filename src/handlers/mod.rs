// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod maps;

pub use health::config as health_config;
pub use maps::config as maps_config;
