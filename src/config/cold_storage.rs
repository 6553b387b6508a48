//! Cold storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Cold storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColdStorageConfig {
    /// Optional upper bound for `numberOfDaysOfAvailability`.
    ///
    /// Unset means any positive window is accepted.
    #[serde(default)]
    pub max_days_of_availability: Option<u32>,
}

impl ColdStorageConfig {
    /// Validate cold storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_days_of_availability == Some(0) {
            return Err(ValidationError::InvalidAvailabilityWindow);
        }
        Ok(())
    }
}
