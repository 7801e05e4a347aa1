//! Crate error type.
//!
//! Errors only arise at the load and configuration boundary. The planner
//! itself never fails.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Load and configuration failures.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{table} table is missing column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("invalid settings: {}", join_messages(.0))]
    InvalidSettings(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl PlannerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
