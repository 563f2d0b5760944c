// src/models/prediction.rs
// DOCUMENTATION: Autocomplete prediction records
// PURPOSE: Structures returned by the provider's autocomplete service

use serde::{Deserialize, Serialize};

/// Single autocomplete prediction
/// DOCUMENTATION: Passed through to the front-end as the provider returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Provider-assigned place identifier
    pub place_id: String,
    /// Human-readable description (e.g., "Calle Mayor, Madrid, Spain")
    pub description: String,
    /// Ranges of `description` that matched the query
    #[serde(default)]
    pub matched_substrings: Vec<MatchedSubstring>,
    /// Main/secondary split of the description
    pub structured_formatting: Option<StructuredFormatting>,
    /// Place types (e.g., ["route", "geocode"])
    #[serde(default)]
    pub types: Vec<String>,
}

/// Matched range inside a prediction description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSubstring {
    pub offset: u32,
    pub length: u32,
}

/// Description split used for two-line rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

#[cfg(test)]
impl Prediction {
    /// Build a bare prediction with no match metadata
    pub fn new(place_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            description: description.into(),
            matched_substrings: Vec::new(),
            structured_formatting: None,
            types: Vec::new(),
        }
    }
}
