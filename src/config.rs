//! Planner configuration file.
//!
//! A JSON document with two optional sections:
//!
//! ```json
//! {
//!   "settings": { "credit_caps": [16, 16, 18, 20, 20, 20, 9, 9], "track": "Chemistry" },
//!   "quotas": { "ge_credit_target": 20 }
//! }
//! ```
//!
//! Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerError;
use crate::models::Settings;
use crate::scheduler::Quotas;

/// Settings and quotas loaded together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub settings: Settings,
    pub quotas: Quotas,
}

impl PlannerConfig {
    /// Parses a configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, PlannerError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}
