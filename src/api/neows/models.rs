use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response body of the NeoWs `feed` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub element_count: Option<u32>,
    /// Objects keyed by close-approach date (`YYYY-MM-DD`)
    #[serde(default)]
    pub near_earth_objects: Option<BTreeMap<String, Vec<NeoObject>>>,
}

/// A single near-Earth object as reported by the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoObject {
    pub name: String,
    pub nasa_jpl_url: String,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

/// Diameter estimates in the units the feed publishes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub miles: DiameterRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_max: f64,
}

/// One close-approach event; the feed sends distances as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Dynamical-time timestamp such as `2023-Oct-05 12:00`
    pub close_approach_date_full: Option<String>,
    pub miss_distance: MissDistance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub miles: String,
}

/// Comprehensive error type for feed requests
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 401/403, usually a bad or missing api_key
    Unauthorized(String),
    /// 429 Too Many Requests
    RateLimited {
        remaining: Option<i64>,
    },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other non-success HTTP status
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// The configured timeout elapsed
    Timeout(String),
    /// Body was not the expected JSON shape
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::RateLimited { remaining } => match remaining {
                Some(n) => write!(f, "Rate Limited ({} requests remaining)", n),
                None => write!(f, "Rate Limited"),
            },
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}
