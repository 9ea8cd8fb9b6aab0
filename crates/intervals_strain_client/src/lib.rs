//! `IntervalsClient` trait, the narrow activity record it returns, and the
//! reqwest-based implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod range;
pub mod retry;
pub mod utils;

/// Maximum number of activities requested per window.
pub const ACTIVITY_PAGE_LIMIT: u32 = 500;

#[derive(Debug, Error)]
pub enum IntervalsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl IntervalsError {
    pub fn from_status(status: u16, body: String) -> Self {
        IntervalsError::Status { status, body }
    }

    /// Transport failures, rate limiting and server-side errors are worth
    /// another attempt; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            IntervalsError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            IntervalsError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// One activity as far as strain analytics are concerned.
///
/// Everything is optional: upstream omits strain scores for activities without
/// power data, and the date may arrive under several keys.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct StrainActivity {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, rename = "startTime")]
    pub start_time: Option<String>,
    /// Aerobic strain (strain score above critical power).
    #[serde(default)]
    pub ss_cp: Option<f64>,
    /// Glycolytic strain (W' expenditure, kJ).
    #[serde(default)]
    pub ss_w_prime: Option<f64>,
    /// Neuromuscular strain (Pmax component).
    #[serde(default)]
    pub ss_p_max: Option<f64>,
}

impl StrainActivity {
    /// The raw date string: `start_date`, falling back to `startTime`.
    pub fn date_str(&self) -> Option<&str> {
        self.start_date.as_deref().or(self.start_time.as_deref())
    }
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[async_trait]
pub trait IntervalsClient: Send + Sync + 'static {
    /// Activities with a start date in `[oldest, newest]`, a single request.
    async fn get_activities(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
        limit: u32,
    ) -> Result<Vec<StrainActivity>, IntervalsError>;

    /// Athlete-level record (weight, name, preferences).
    async fn get_athlete(&self) -> Result<serde_json::Value, IntervalsError>;

    async fn get_sport_settings(&self) -> Result<serde_json::Value, IntervalsError>;

    /// Power curve for `sport` over `curves` ("42d", "90d", "season", "all").
    async fn get_power_curves(
        &self,
        sport: &str,
        curves: &str,
    ) -> Result<serde_json::Value, IntervalsError>;

    /// All activities in `[start, end]`, fetched window by window.
    ///
    /// Stops at the first failing window; nothing fetched so far is returned.
    async fn get_activities_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StrainActivity>, IntervalsError> {
        let mut all = Vec::new();
        for window in range::fetch_windows(start, end, range::FETCH_WINDOW_DAYS) {
            tracing::debug!(oldest = %window.oldest, newest = %window.newest, "fetching activity window");
            metrics::counter!("strain_fetch_windows_total").increment(1);
            let batch = self
                .get_activities(window.oldest, window.newest, ACTIVITY_PAGE_LIMIT)
                .await?;
            all.extend(batch);
        }
        metrics::counter!("strain_activities_fetched_total").increment(all.len() as u64);
        Ok(all)
    }
}
