// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod place_detail;
pub mod prediction;
pub mod request;
pub mod status;

pub use place_detail::*;
pub use prediction::*;
pub use request::*;
pub use status::*;
