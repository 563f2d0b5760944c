// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod google_maps_client;
pub mod map_facade;
pub mod sdk;
pub mod session_store;

pub use google_maps_client::*;
pub use map_facade::*;
pub use sdk::*;
pub use session_store::*;
