//! Energy systems, the per-system container, and validation of raw activity
//! records into dated strain records.

use std::ops::AddAssign;

use chrono::NaiveDate;
use intervals_strain_client::StrainActivity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StrainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnergySystem {
    Aerobic,
    Glycolytic,
    Neuromuscular,
}

impl EnergySystem {
    pub const ALL: [EnergySystem; 3] = [
        EnergySystem::Aerobic,
        EnergySystem::Glycolytic,
        EnergySystem::Neuromuscular,
    ];
}

/// One value per energy system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PerSystem<T> {
    pub aerobic: T,
    pub glycolytic: T,
    pub neuromuscular: T,
}

impl<T> PerSystem<T> {
    pub fn new(aerobic: T, glycolytic: T, neuromuscular: T) -> Self {
        Self {
            aerobic,
            glycolytic,
            neuromuscular,
        }
    }

    pub fn from_fn(mut f: impl FnMut(EnergySystem) -> T) -> Self {
        Self::new(
            f(EnergySystem::Aerobic),
            f(EnergySystem::Glycolytic),
            f(EnergySystem::Neuromuscular),
        )
    }

    pub fn get(&self, system: EnergySystem) -> &T {
        match system {
            EnergySystem::Aerobic => &self.aerobic,
            EnergySystem::Glycolytic => &self.glycolytic,
            EnergySystem::Neuromuscular => &self.neuromuscular,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerSystem<U> {
        PerSystem::new(f(self.aerobic), f(self.glycolytic), f(self.neuromuscular))
    }

    pub fn zip_with<U, V>(self, other: PerSystem<U>, mut f: impl FnMut(T, U) -> V) -> PerSystem<V> {
        PerSystem::new(
            f(self.aerobic, other.aerobic),
            f(self.glycolytic, other.glycolytic),
            f(self.neuromuscular, other.neuromuscular),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnergySystem, &T)> {
        EnergySystem::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Strain contribution of each system for one activity or one day.
pub type StrainLoad = PerSystem<f64>;

impl PerSystem<f64> {
    pub fn total(&self) -> f64 {
        self.aerobic + self.glycolytic + self.neuromuscular
    }

    /// Missing or null upstream fields count as zero.
    pub fn from_activity(activity: &StrainActivity) -> Self {
        Self::new(
            activity.ss_cp.unwrap_or(0.0),
            activity.ss_w_prime.unwrap_or(0.0),
            activity.ss_p_max.unwrap_or(0.0),
        )
    }
}

impl AddAssign for PerSystem<f64> {
    fn add_assign(&mut self, rhs: Self) {
        self.aerobic += rhs.aerobic;
        self.glycolytic += rhs.glycolytic;
        self.neuromuscular += rhs.neuromuscular;
    }
}

/// An activity whose calendar date has been established.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrainRecord {
    pub date: NaiveDate,
    pub load: StrainLoad,
}

impl StrainRecord {
    pub fn new(date: NaiveDate, load: StrainLoad) -> Self {
        Self { date, load }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RejectReason {
    MissingDate,
    MalformedDate(String),
}

/// An input activity that could not be placed on the calendar.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct RejectedActivity {
    /// Position in the input slice.
    pub index: usize,
    pub id: Option<String>,
    pub reason: RejectReason,
}

#[derive(Clone, Debug, Default)]
pub struct RecordPartition {
    pub valid: Vec<StrainRecord>,
    pub rejected: Vec<RejectedActivity>,
}

impl RecordPartition {
    /// Valid records; rejections are dropped.
    pub fn lenient(self) -> Vec<StrainRecord> {
        self.valid
    }

    /// Valid records, or an error if anything was rejected.
    pub fn strict(self) -> Result<Vec<StrainRecord>, StrainError> {
        if self.rejected.is_empty() {
            Ok(self.valid)
        } else {
            Err(StrainError::RejectedActivities(self.rejected))
        }
    }
}

/// Calendar date from the first ten characters of an ISO-8601-like string.
pub fn calendar_date(raw: &str) -> Result<NaiveDate, RejectReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RejectReason::MissingDate);
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| RejectReason::MalformedDate(raw.to_string()))
}

/// Split activities into dated records and rejects, preserving input order.
pub fn partition_activities(activities: &[StrainActivity]) -> RecordPartition {
    let mut partition = RecordPartition::default();
    for (index, activity) in activities.iter().enumerate() {
        let date = activity
            .date_str()
            .ok_or(RejectReason::MissingDate)
            .and_then(calendar_date);
        match date {
            Ok(date) => partition
                .valid
                .push(StrainRecord::new(date, StrainLoad::from_activity(activity))),
            Err(reason) => partition.rejected.push(RejectedActivity {
                index,
                id: activity.id.clone(),
                reason,
            }),
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(date: Option<&str>, cp: f64) -> StrainActivity {
        StrainActivity {
            start_date: date.map(str::to_string),
            ss_cp: Some(cp),
            ..Default::default()
        }
    }

    #[test]
    fn calendar_date_takes_first_ten_chars() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(calendar_date("2024-01-02T23:59:59-08:00"), Ok(expected));
        assert_eq!(calendar_date("2024-01-02"), Ok(expected));
    }

    #[test]
    fn calendar_date_rejects_garbage() {
        assert_eq!(calendar_date(""), Err(RejectReason::MissingDate));
        assert!(matches!(
            calendar_date("2024-1-2"),
            Err(RejectReason::MalformedDate(_))
        ));
        assert!(matches!(
            calendar_date("yesterday-ish"),
            Err(RejectReason::MalformedDate(_))
        ));
        assert!(matches!(
            calendar_date("2024-02-30T00:00"),
            Err(RejectReason::MalformedDate(_))
        ));
    }

    #[test]
    fn partition_splits_and_keeps_indices() {
        let acts = vec![
            activity(Some("2024-01-01T07:00:00Z"), 10.0),
            activity(None, 5.0),
            activity(Some("not a date"), 3.0),
            activity(Some("2024-01-03"), 7.0),
        ];
        let p = partition_activities(&acts);
        assert_eq!(p.valid.len(), 2);
        assert_eq!(p.rejected.len(), 2);
        assert_eq!(p.rejected[0].index, 1);
        assert_eq!(p.rejected[0].reason, RejectReason::MissingDate);
        assert_eq!(p.rejected[1].index, 2);
        assert_eq!(p.valid[1].load.aerobic, 7.0);
    }

    #[test]
    fn late_evening_local_session_buckets_on_utc_date() {
        let late: StrainActivity = serde_json::from_value(serde_json::json!({
            "id": "late",
            "start_date_local": "2024-01-01T23:30:00",
            "start_date": "2024-01-02T07:30:00Z",
            "ss_cp": 12.0
        }))
        .unwrap();
        let p = partition_activities(&[late]);
        assert!(p.rejected.is_empty());
        assert_eq!(p.valid[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn strict_mode_refuses_rejects() {
        let acts = vec![activity(Some("2024-01-01"), 1.0), activity(Some("??"), 1.0)];
        let err = partition_activities(&acts).strict().unwrap_err();
        assert!(matches!(err, StrainError::RejectedActivities(ref r) if r.len() == 1));

        let clean = vec![activity(Some("2024-01-01"), 1.0)];
        assert_eq!(partition_activities(&clean).strict().unwrap().len(), 1);
    }

    #[test]
    fn missing_strain_fields_are_zero() {
        let load = StrainLoad::from_activity(&StrainActivity::default());
        assert_eq!(load, StrainLoad::default());
        assert_eq!(load.total(), 0.0);
    }

    #[test]
    fn per_system_helpers() {
        let a = PerSystem::new(1.0, 2.0, 3.0);
        let b = PerSystem::from_fn(|s| if s == EnergySystem::Glycolytic { 10.0 } else { 0.0 });
        let sum = a.zip_with(b, |x, y| x + y);
        assert_eq!(sum, PerSystem::new(1.0, 12.0, 3.0));
        assert_eq!(*sum.get(EnergySystem::Neuromuscular), 3.0);
        let systems: Vec<_> = sum.iter().map(|(s, _)| s).collect();
        assert_eq!(systems, EnergySystem::ALL.to_vec());
    }
}
