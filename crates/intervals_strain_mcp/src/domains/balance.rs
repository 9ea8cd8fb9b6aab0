//! Distribution of accumulated strain across the three energy systems.

use intervals_strain_client::StrainActivity;
use schemars::JsonSchema;
use serde::Serialize;

use super::strain::{PerSystem, StrainLoad};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, JsonSchema)]
pub struct StrainBalance {
    pub totals: PerSystem<f64>,
    /// Share of `total` per system, in percent.
    pub percent: PerSystem<f64>,
    pub total: f64,
}

impl StrainBalance {
    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }
}

/// Flat sum of loads, regardless of date. A zero grand total yields the
/// all-zero balance, totals included.
pub fn compute_balance(loads: impl IntoIterator<Item = StrainLoad>) -> StrainBalance {
    let mut totals = StrainLoad::default();
    for load in loads {
        totals += load;
    }
    let total = totals.total();
    if total == 0.0 {
        return StrainBalance::default();
    }
    StrainBalance {
        totals,
        percent: totals.map(|v| 100.0 * v / total),
        total,
    }
}

pub fn balance_of_activities(activities: &[StrainActivity]) -> StrainBalance {
    compute_balance(activities.iter().map(StrainLoad::from_activity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(cp: Option<f64>, w: Option<f64>, p: Option<f64>) -> StrainActivity {
        StrainActivity {
            ss_cp: cp,
            ss_w_prime: w,
            ss_p_max: p,
            ..Default::default()
        }
    }

    fn scenario() -> Vec<StrainActivity> {
        vec![
            act(Some(45.0), Some(2.5), Some(0.8)),
            act(Some(30.0), Some(5.0), Some(1.2)),
            act(Some(50.0), Some(1.5), Some(0.5)),
        ]
    }

    #[test]
    fn three_day_scenario() {
        let b = balance_of_activities(&scenario());
        assert!((b.totals.aerobic - 125.0).abs() < 1e-9);
        assert!((b.totals.glycolytic - 9.0).abs() < 1e-9);
        assert!((b.totals.neuromuscular - 2.5).abs() < 1e-9);
        assert!((b.total - 136.5).abs() < 1e-9);
        assert!((b.percent.aerobic - 91.575).abs() < 0.01);
        let sum: f64 = b.percent.iter().map(|(_, v)| *v).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn order_does_not_matter() {
        let mut reversed = scenario();
        reversed.reverse();
        let a = balance_of_activities(&scenario());
        let b = balance_of_activities(&reversed);
        assert!((a.total - b.total).abs() < 1e-9);
        assert!((a.percent.glycolytic - b.percent.glycolytic).abs() < 1e-9);
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let empty = balance_of_activities(&[]);
        assert_eq!(empty, StrainBalance::default());
        assert!(empty.is_empty());

        let nulls = balance_of_activities(&[act(None, None, None), act(Some(0.0), None, None)]);
        assert_eq!(nulls.percent, PerSystem::default());
        assert!(nulls.percent.aerobic.is_finite());
    }

    #[test]
    fn offsetting_components_report_all_zero() {
        let b = balance_of_activities(&[act(Some(5.0), Some(-5.0), Some(0.0))]);
        assert_eq!(b, StrainBalance::default());
        assert_eq!(b.totals, PerSystem::default());
        assert!(b.is_empty());
    }

    #[test]
    fn negative_total_still_splits_by_share() {
        let b = balance_of_activities(&[act(Some(-3.0), Some(-1.0), Some(0.0))]);
        assert_eq!(b.total, -4.0);
        assert_eq!(b.totals, PerSystem::new(-3.0, -1.0, 0.0));
        assert!((b.percent.aerobic - 75.0).abs() < 1e-9);
        assert!((b.percent.glycolytic - 25.0).abs() < 1e-9);
        assert_eq!(b.percent.neuromuscular, 0.0);
    }

    #[test]
    fn missing_fields_count_as_zero() {
        let b = balance_of_activities(&[act(Some(10.0), None, None), act(None, Some(10.0), None)]);
        assert_eq!(b.totals, PerSystem::new(10.0, 10.0, 0.0));
        assert_eq!(b.percent.aerobic, 50.0);
    }
}
