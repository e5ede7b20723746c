use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Source of the travel times between stops. Distances always come from the
/// haversine formula.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelTimeProvider {
    /// Distance over a constant speed.
    #[default]
    Haversine,
    /// https://developers.google.com/maps/documentation/routes/compute_route_matrix
    GoogleRoutesApi,
}

impl Display for TravelTimeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelTimeProvider::Haversine => "haversine",
                TravelTimeProvider::GoogleRoutesApi => "google_routes_api",
            }
        )
    }
}
