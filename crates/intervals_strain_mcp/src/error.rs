//! Error types for the strain core and the MCP server.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domains::strain::RejectedActivity;

/// Failures of the pure strain/PMC core.
#[derive(Debug, Error, PartialEq)]
pub enum StrainError {
    #[error("{name} must be a positive number of days, got {value}")]
    InvalidTimeConstant { name: &'static str, value: u32 },

    #[error("reference date {as_of} is before the series start {start}")]
    AsOfBeforeSeriesStart { as_of: NaiveDate, start: NaiveDate },

    #[error("reference date {as_of} is before the earliest activity on {earliest}")]
    AsOfBeforeFirstActivity { as_of: NaiveDate, earliest: NaiveDate },

    #[error("{} activities have a missing or malformed date", .0.len())]
    RejectedActivities(Vec<RejectedActivity>),
}

/// MCP server errors.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("API error: {0}")]
    Api(#[from] intervals_strain_client::IntervalsError),

    #[error("Strain error: {0}")]
    Strain(#[from] StrainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<McpError> for String {
    fn from(err: McpError) -> Self {
        err.to_string()
    }
}

/// Result type alias for MCP operations.
pub type McpResult<T> = Result<T, McpError>;
