// src/models/place_detail.rs
// DOCUMENTATION: Place detail record
// PURPOSE: Structure returned by the provider's places-detail service

use serde::{Deserialize, Serialize};

/// Place detail for the fixed field set the facade requests
/// DOCUMENTATION: Not cached; each lookup returns a fresh record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    /// Provider-assigned place identifier
    pub place_id: String,
    /// Address components (street number, route, locality, postal code...)
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    /// Full formatted address
    pub formatted_address: Option<String>,
    /// Location and viewport
    pub geometry: Option<Geometry>,
    /// Display name
    pub name: Option<String>,
}

/// Address component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Long name (e.g., "Zaragoza", "50001")
    pub long_name: String,
    /// Short name (e.g., "Z", "50001")
    pub short_name: String,
    /// Types of this component (e.g., ["locality", "political"])
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail_result() {
        let json = serde_json::json!({
            "place_id": "ChIJ123",
            "name": "Plaza Mayor",
            "formatted_address": "Plaza Mayor, 28012 Madrid, Spain",
            "address_components": [
                { "long_name": "28012", "short_name": "28012", "types": ["postal_code"] },
                { "long_name": "Madrid", "short_name": "Madrid", "types": ["locality", "political"] }
            ],
            "geometry": { "location": { "lat": 40.4155, "lng": -3.7074 } }
        });

        let detail: PlaceDetail = serde_json::from_value(json).unwrap();

        assert_eq!(detail.name.as_deref(), Some("Plaza Mayor"));
        assert_eq!(detail.address_components.len(), 2);
        assert_eq!(detail.address_components[0].types, vec!["postal_code".to_string()]);
        assert_eq!(detail.address_components[1].short_name, "Madrid");

        let geometry = detail.geometry.unwrap();
        assert_eq!(geometry.location.lat, 40.4155);
        assert!(geometry.viewport.is_none());
    }
}
