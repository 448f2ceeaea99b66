//! Normalized close-approach records

use chrono::NaiveDateTime;

use crate::utils::NeoError;

/// One near-Earth object's close approach, validated at construction
#[derive(Debug, Clone, PartialEq)]
pub struct NeoRecord {
    name: String,
    close_approach_time: NaiveDateTime,
    miss_distance_miles: f64,
    diameter_miles: f64,
    reference_url: String,
}

impl NeoRecord {
    pub fn new(
        name: impl Into<String>,
        close_approach_time: NaiveDateTime,
        miss_distance_miles: f64,
        diameter_miles: f64,
        reference_url: impl Into<String>,
    ) -> Result<Self, NeoError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NeoError::ParseError("NEO name is empty".to_string()));
        }
        if !miss_distance_miles.is_finite() || miss_distance_miles < 0.0 {
            return Err(NeoError::ParseError(format!(
                "Invalid miss distance for {}: {}",
                name, miss_distance_miles
            )));
        }
        if !diameter_miles.is_finite() || diameter_miles < 0.0 {
            return Err(NeoError::ParseError(format!(
                "Invalid diameter for {}: {}",
                name, diameter_miles
            )));
        }

        Ok(Self {
            name,
            close_approach_time,
            miss_distance_miles,
            diameter_miles,
            reference_url: reference_url.into(),
        })
    }

    /// Designation as the feed reports it, e.g. `(2023 AB)`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Moment of closest approach in the configured time scale
    pub fn close_approach_time(&self) -> NaiveDateTime {
        self.close_approach_time
    }

    /// Distance from Earth at closest approach
    pub fn miss_distance_miles(&self) -> f64 {
        self.miss_distance_miles
    }

    /// Estimated maximum diameter
    pub fn diameter_miles(&self) -> f64 {
        self.diameter_miles
    }

    /// JPL small-body database page
    pub fn reference_url(&self) -> &str {
        &self.reference_url
    }
}
