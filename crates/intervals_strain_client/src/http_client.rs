//! HTTP client implementation for the Intervals.icu API.
//!
//! This module provides a reqwest-based implementation of the [`IntervalsClient`](crate::IntervalsClient) trait.

use crate::retry::RetryPolicy;
use crate::utils::parse_activity_list;
use crate::{IntervalsClient, IntervalsError, StrainActivity};
use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

/// Client for the Intervals.icu API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestIntervalsClient {
    base_url: String,
    athlete_id: String,
    api_key: SecretString,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ReqwestIntervalsClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Intervals.icu API (e.g., "https://intervals.icu")
    /// * `athlete_id` - The athlete ID for authentication
    /// * `api_key` - The API key for authentication
    pub fn new(base_url: &str, athlete_id: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            athlete_id: athlete_id.into(),
            api_key,
            client: reqwest::Client::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            &config.base_url,
            config.athlete_id.clone(),
            config.api_key.clone(),
        )
    }

    /// Replace the retry policy used for GET requests.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn athlete_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/athlete/{}{}",
            self.base_url, self.athlete_id, suffix
        )
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth("API_KEY", Some(self.api_key.expose_secret()))
    }

    /// GET `url` with `query`, retrying transient failures.
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, IntervalsError> {
        let this = self;
        self.retry
            .retry_request(move || async move {
                let resp = this.get_request(url).query(query).send().await?;
                this.handle_response(resp).await
            })
            .await
    }

    /// Handle a response, converting status codes to appropriate errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, IntervalsError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> IntervalsError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            404 => IntervalsError::NotFound(body_snippet),
            401 | 403 => IntervalsError::Auth(body_snippet),
            422 => IntervalsError::InvalidInput(body_snippet),
            _ => IntervalsError::from_status(status, body_snippet),
        }
    }

    /// Map case-insensitive sport names to their canonical API form.
    pub fn normalize_sport(s: &str) -> String {
        const SPORTS: &[&str] = &[
            "Ride",
            "Run",
            "Swim",
            "VirtualRide",
            "VirtualRun",
            "GravelRide",
            "MountainBikeRide",
            "TrackRide",
            "EBikeRide",
            "TrailRun",
            "OpenWaterSwim",
            "Rowing",
            "VirtualRow",
            "NordicSki",
            "RollerSki",
            "WeightTraining",
            "Workout",
            "Other",
        ];
        if let Some(c) = SPORTS.iter().find(|c| c.eq_ignore_ascii_case(s)) {
            return (*c).to_string();
        }
        let mut chrs = s.chars();
        match chrs.next() {
            Some(first) => format!("{}{}", first.to_uppercase(), chrs.as_str()),
            None => String::new(),
        }
    }
}

#[async_trait]
impl IntervalsClient for ReqwestIntervalsClient {
    async fn get_activities(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
        limit: u32,
    ) -> Result<Vec<StrainActivity>, IntervalsError> {
        let url = self.athlete_url("/activities");
        let query = [
            ("oldest", oldest.to_string()),
            ("newest", newest.to_string()),
            ("limit", limit.to_string()),
        ];
        let value = self.get_json(&url, &query).await?;
        Ok(parse_activity_list(value))
    }

    async fn get_athlete(&self) -> Result<serde_json::Value, IntervalsError> {
        self.get_json(&self.athlete_url(""), &[]).await
    }

    async fn get_sport_settings(&self) -> Result<serde_json::Value, IntervalsError> {
        self.get_json(&self.athlete_url("/sport-settings"), &[])
            .await
    }

    async fn get_power_curves(
        &self,
        sport: &str,
        curves: &str,
    ) -> Result<serde_json::Value, IntervalsError> {
        let query = [
            ("type", Self::normalize_sport(sport)),
            ("curves", curves.to_string()),
        ];
        self.get_json(&self.athlete_url("/power-curves"), &query)
            .await
    }
}
