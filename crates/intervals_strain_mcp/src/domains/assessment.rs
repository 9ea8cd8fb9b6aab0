//! Assessment of a strain distribution against target ranges, and training
//! recommendations derived from it.

use schemars::JsonSchema;
use serde::Serialize;

use super::balance::StrainBalance;
use super::strain::{EnergySystem, PerSystem};

/// Target share of total strain, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, JsonSchema)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

impl TargetRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

pub const STRAIN_TARGETS: PerSystem<TargetRange> = PerSystem {
    aerobic: TargetRange::new(70.0, 80.0),
    glycolytic: TargetRange::new(15.0, 25.0),
    neuromuscular: TargetRange::new(5.0, 10.0),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    NoData,
    /// Below 60% of the target minimum.
    SeverelyDeficient,
    Deficient,
    /// Above 130% of the target maximum.
    ExcessivelyElevated,
    Elevated,
    Adequate,
}

pub fn assess_system(percent: f64, target: TargetRange) -> SystemStatus {
    if percent == 0.0 {
        SystemStatus::NoData
    } else if percent < target.min * 0.6 {
        SystemStatus::SeverelyDeficient
    } else if percent < target.min {
        SystemStatus::Deficient
    } else if percent > target.max * 1.3 {
        SystemStatus::ExcessivelyElevated
    } else if percent > target.max {
        SystemStatus::Elevated
    } else {
        SystemStatus::Adequate
    }
}

pub fn assess(balance: &StrainBalance) -> PerSystem<SystemStatus> {
    balance.percent.zip_with(STRAIN_TARGETS, assess_system)
}

/// Systems below their target minimum; empty when there is no strain.
pub fn deficient_systems(balance: &StrainBalance) -> Vec<EnergySystem> {
    if balance.is_empty() {
        return Vec::new();
    }
    EnergySystem::ALL
        .into_iter()
        .filter(|s| *balance.percent.get(*s) < STRAIN_TARGETS.get(*s).min)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    AddEndurance,
    ReduceEndurance,
    AddGlycolytic,
    ReduceHighIntensity,
    AddNeuromuscular,
    ReduceSprints,
    Balanced,
}

impl Recommendation {
    pub fn advice(self) -> &'static str {
        match self {
            Recommendation::AddEndurance => {
                "Add endurance rides (90+ min) or sustained sweet spot sessions to build the aerobic foundation."
            }
            Recommendation::ReduceEndurance => {
                "Reduce endurance volume slightly; the aerobic system is well developed. Focus on the other systems."
            }
            Recommendation::AddGlycolytic => {
                "Increase glycolytic stimulus: VO2max intervals (3-5 x 3-5 min at 112-118% FTP) or threshold work."
            }
            Recommendation::ReduceHighIntensity => {
                "Reduce high-intensity frequency; glycolytic stress is elevated. Prioritise recovery."
            }
            Recommendation::AddNeuromuscular => {
                "Add neuromuscular work: sprint primers (3-5 x 10-12 s) before endurance rides, or dedicated power sessions."
            }
            Recommendation::ReduceSprints => {
                "Reduce sprint and power emphasis; neuromuscular stress is elevated."
            }
            Recommendation::Balanced => {
                "Strain distribution is well balanced. Continue the current training approach."
            }
        }
    }
}

/// Advice for the block. The bands used here are wider than
/// [`STRAIN_TARGETS`]; no advice at all when there is no strain.
pub fn recommendations(balance: &StrainBalance) -> Vec<Recommendation> {
    if balance.is_empty() {
        return Vec::new();
    }
    let p = &balance.percent;
    let mut out = Vec::new();

    if p.aerobic < 60.0 {
        out.push(Recommendation::AddEndurance);
    } else if p.aerobic > 85.0 {
        out.push(Recommendation::ReduceEndurance);
    }

    if p.glycolytic < 10.0 {
        out.push(Recommendation::AddGlycolytic);
    } else if p.glycolytic > 28.0 {
        out.push(Recommendation::ReduceHighIntensity);
    }

    if p.neuromuscular < 2.0 {
        out.push(Recommendation::AddNeuromuscular);
    } else if p.neuromuscular > 12.0 {
        out.push(Recommendation::ReduceSprints);
    }

    if out.is_empty() {
        out.push(Recommendation::Balanced);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::balance::compute_balance;

    fn balance(a: f64, g: f64, n: f64) -> StrainBalance {
        compute_balance([PerSystem::new(a, g, n)])
    }

    #[test]
    fn status_thresholds() {
        let t = TargetRange::new(15.0, 25.0);
        assert_eq!(assess_system(0.0, t), SystemStatus::NoData);
        assert_eq!(assess_system(8.9, t), SystemStatus::SeverelyDeficient);
        assert_eq!(assess_system(9.5, t), SystemStatus::Deficient);
        assert_eq!(assess_system(14.9, t), SystemStatus::Deficient);
        assert_eq!(assess_system(15.0, t), SystemStatus::Adequate);
        assert_eq!(assess_system(25.0, t), SystemStatus::Adequate);
        assert_eq!(assess_system(25.1, t), SystemStatus::Elevated);
        assert_eq!(assess_system(32.6, t), SystemStatus::ExcessivelyElevated);
    }

    #[test]
    fn aerobic_heavy_block() {
        let b = balance(125.0, 9.0, 2.5);
        let status = assess(&b);
        assert_eq!(status.aerobic, SystemStatus::Elevated);
        assert_eq!(status.glycolytic, SystemStatus::SeverelyDeficient);
        assert_eq!(status.neuromuscular, SystemStatus::SeverelyDeficient);
        assert_eq!(
            deficient_systems(&b),
            vec![EnergySystem::Glycolytic, EnergySystem::Neuromuscular]
        );
        assert_eq!(
            recommendations(&b),
            vec![
                Recommendation::ReduceEndurance,
                Recommendation::AddGlycolytic,
                Recommendation::AddNeuromuscular
            ]
        );
    }

    #[test]
    fn balanced_block() {
        let b = balance(75.0, 18.0, 7.0);
        assert!(assess(&b).iter().all(|(_, s)| *s == SystemStatus::Adequate));
        assert!(deficient_systems(&b).is_empty());
        assert_eq!(recommendations(&b), vec![Recommendation::Balanced]);
    }

    #[test]
    fn empty_block_has_no_advice() {
        let b = balance(0.0, 0.0, 0.0);
        assert_eq!(assess(&b).aerobic, SystemStatus::NoData);
        assert!(deficient_systems(&b).is_empty());
        assert!(recommendations(&b).is_empty());
    }

    #[test]
    fn wider_bands_than_targets() {
        // 65% aerobic is deficient but still inside the recommendation band.
        let b = balance(65.0, 25.0, 10.0);
        assert_eq!(assess(&b).aerobic, SystemStatus::Deficient);
        assert_eq!(recommendations(&b), vec![Recommendation::Balanced]);
    }
}
