use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::assessment::{Recommendation, SystemStatus, TargetRange};
use crate::domains::balance::StrainBalance;
use crate::domains::pmc::{PmcPoint, PmcState};
use crate::domains::power_curve::PowerCurvePoint;
use crate::domains::strain::{EnergySystem, PerSystem, RejectedActivity};

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct StrainPmcParams {
    /// Reference date (YYYY-MM-DD, default: today)
    pub as_of_date: Option<String>,
    /// Days of activity history to load before the reference date (default: 90)
    pub history_days: Option<u32>,
    /// Fitness (CTL) time constant in days (default: 42)
    pub ctl_days: Option<u32>,
    /// Fatigue (ATL) time constant in days (default: 7)
    pub atl_days: Option<u32>,
    /// Fail when any activity has a missing or malformed date (default: false)
    pub strict: Option<bool>,
    /// Include the day-by-day trajectory (default: false)
    pub include_history: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct BalanceParams {
    /// Window length in days when start_date is not given (default: 14)
    pub days: Option<u32>,
    /// Start date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD, default: today)
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct PowerCurveParams {
    /// Activity type, e.g. "Ride", "Run" (default: "Ride")
    pub activity_type: Option<String>,
    /// Period: "42d", "90d", "season" or "all" (default: "42d")
    pub curves: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct SportTypeParam {
    /// Sport type (default: "Ride")
    pub sport_type: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ObjectResult {
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DateWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StrainPmcReport {
    pub as_of_date: String,
    /// Range requested from Intervals.icu.
    pub fetch_window: DateWindow,
    /// First day of the decay walk.
    pub series_start: String,
    pub ctl_days: u32,
    pub atl_days: u32,
    pub activities_fetched: usize,
    pub activities_used: usize,
    pub rejected: Vec<RejectedActivity>,
    pub systems: PerSystem<PmcState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<PmcPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RecommendationItem {
    pub code: Recommendation,
    pub advice: String,
}

impl From<Recommendation> for RecommendationItem {
    fn from(code: Recommendation) -> Self {
        Self {
            code,
            advice: code.advice().to_string(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EnergyBalanceReport {
    pub window: DateWindow,
    pub activity_count: usize,
    pub balance: StrainBalance,
    pub targets: PerSystem<TargetRange>,
    pub status: PerSystem<SystemStatus>,
    pub deficient_systems: Vec<EnergySystem>,
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PowerCurveReport {
    pub activity_type: String,
    pub curves: String,
    pub points: Vec<PowerCurvePoint>,
}
