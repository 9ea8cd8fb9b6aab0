use std::sync::Arc;

use chrono::{Days, NaiveDate};
use intervals_strain_client::IntervalsClient;

use crate::domains::aggregate::aggregate;
use crate::domains::assessment::{self, STRAIN_TARGETS};
use crate::domains::balance::balance_of_activities;
use crate::domains::pmc::{
    DEFAULT_FATIGUE_DAYS, DEFAULT_FITNESS_DAYS, TimeConstants, compute_pmc, pmc_trajectory,
};
use crate::domains::power_curve::power_curve_points;
use crate::domains::sport_settings::merge_athlete_settings;
use crate::domains::strain::partition_activities;
use crate::error::{McpError, McpResult};
use crate::types::{
    BalanceParams, DateWindow, EnergyBalanceReport, ObjectResult, PowerCurveParams,
    PowerCurveReport, SportTypeParam, StrainPmcParams, StrainPmcReport,
};

pub const DEFAULT_HISTORY_DAYS: u32 = 90;
pub const DEFAULT_BALANCE_DAYS: u32 = 14;
pub const DEFAULT_SPORT: &str = "Ride";
pub const DEFAULT_CURVES: &str = "42d";

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an optional `YYYY-MM-DD` parameter.
pub fn parse_date_param(value: Option<&str>, name: &str) -> McpResult<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| McpError::Validation(format!("{name} must be YYYY-MM-DD, got '{raw}'")))
}

fn days_before(date: NaiveDate, days: u32) -> McpResult<NaiveDate> {
    date.checked_sub_days(Days::new(days.into()))
        .ok_or_else(|| McpError::Validation(format!("{days} days before {date} is out of range")))
}

/// Inclusive balance window.
///
/// With either bound given, the missing end is `today` and the missing start
/// is `end - days`. With neither, the window is the last `days` days ending
/// today.
pub fn resolve_balance_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    days: u32,
    today: NaiveDate,
) -> McpResult<(NaiveDate, NaiveDate)> {
    if days == 0 {
        return Err(McpError::Validation("days must be at least 1".into()));
    }
    let (start, end) = if start.is_some() || end.is_some() {
        let end = end.unwrap_or(today);
        let start = match start {
            Some(s) => s,
            None => days_before(end, days)?,
        };
        (start, end)
    } else {
        (days_before(today, days - 1)?, today)
    };
    if start > end {
        return Err(McpError::Validation(format!(
            "start_date {start} is after end_date {end}"
        )));
    }
    Ok((start, end))
}

/// Orchestrates fetches and the strain core for the MCP tools.
#[derive(Clone)]
pub struct StrainService {
    client: Arc<dyn IntervalsClient>,
}

impl StrainService {
    pub fn new(client: Arc<dyn IntervalsClient>) -> Self {
        Self { client }
    }

    pub async fn strain_pmc(
        &self,
        params: StrainPmcParams,
        today: NaiveDate,
    ) -> McpResult<StrainPmcReport> {
        let as_of = parse_date_param(params.as_of_date.as_deref(), "as_of_date")?.unwrap_or(today);
        let history_days = params.history_days.unwrap_or(DEFAULT_HISTORY_DAYS);
        let constants = TimeConstants::new(
            params.ctl_days.unwrap_or(DEFAULT_FITNESS_DAYS),
            params.atl_days.unwrap_or(DEFAULT_FATIGUE_DAYS),
        )?;
        let fetch_start = days_before(as_of, history_days)?;

        let activities = self
            .client
            .get_activities_in_range(fetch_start, as_of)
            .await?;
        let activities_fetched = activities.len();

        let partition = partition_activities(&activities);
        let rejected = partition.rejected.clone();
        if !rejected.is_empty() {
            metrics::counter!("strain_activities_rejected_total").increment(rejected.len() as u64);
            tracing::warn!(count = rejected.len(), "activities with missing or malformed dates");
        }
        let mut records = if params.strict.unwrap_or(false) {
            partition.strict()?
        } else {
            partition.lenient()
        };
        records.retain(|r| r.date <= as_of);

        let series = aggregate(&records, as_of)?;
        let systems = compute_pmc(&series, as_of, constants)?;
        let history = if params.include_history.unwrap_or(false) {
            Some(pmc_trajectory(&series, as_of, constants)?)
        } else {
            None
        };
        tracing::debug!(
            %as_of,
            series_start = %series.start(),
            activities = records.len(),
            "computed strain PMC"
        );

        Ok(StrainPmcReport {
            as_of_date: fmt_date(as_of),
            fetch_window: DateWindow {
                start: fmt_date(fetch_start),
                end: fmt_date(as_of),
            },
            series_start: fmt_date(series.start()),
            ctl_days: constants.fitness_days(),
            atl_days: constants.fatigue_days(),
            activities_fetched,
            activities_used: records.len(),
            rejected,
            systems,
            history,
        })
    }

    pub async fn energy_balance(
        &self,
        params: BalanceParams,
        today: NaiveDate,
    ) -> McpResult<EnergyBalanceReport> {
        let start = parse_date_param(params.start_date.as_deref(), "start_date")?;
        let end = parse_date_param(params.end_date.as_deref(), "end_date")?;
        let days = params.days.unwrap_or(DEFAULT_BALANCE_DAYS);
        let (start, end) = resolve_balance_window(start, end, days, today)?;

        let activities = self.client.get_activities_in_range(start, end).await?;
        let balance = balance_of_activities(&activities);

        Ok(EnergyBalanceReport {
            window: DateWindow {
                start: fmt_date(start),
                end: fmt_date(end),
            },
            activity_count: activities.len(),
            balance,
            targets: STRAIN_TARGETS,
            status: assessment::assess(&balance),
            deficient_systems: assessment::deficient_systems(&balance),
            recommendations: assessment::recommendations(&balance)
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }

    pub async fn power_curve(&self, params: PowerCurveParams) -> McpResult<PowerCurveReport> {
        let activity_type = params
            .activity_type
            .unwrap_or_else(|| DEFAULT_SPORT.to_string());
        let curves = params.curves.unwrap_or_else(|| DEFAULT_CURVES.to_string());
        let value = self
            .client
            .get_power_curves(&activity_type, &curves)
            .await?;
        Ok(PowerCurveReport {
            points: power_curve_points(&value),
            activity_type,
            curves,
        })
    }

    /// Sport settings are required; the athlete record only adds context, so
    /// failing to load it is logged and skipped.
    pub async fn athlete_settings(&self, params: SportTypeParam) -> McpResult<ObjectResult> {
        let sport_type = params
            .sport_type
            .unwrap_or_else(|| DEFAULT_SPORT.to_string());
        let sport_settings = self.client.get_sport_settings().await?;
        let athlete = match self.client.get_athlete().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "athlete record unavailable");
                serde_json::Value::Null
            }
        };
        let merged = merge_athlete_settings(&athlete, &sport_settings, &sport_type)
            .ok_or_else(|| {
                McpError::NotFound(format!("no athlete settings for sport type '{sport_type}'"))
            })?;
        Ok(ObjectResult {
            value: serde_json::Value::Object(merged),
        })
    }
}
