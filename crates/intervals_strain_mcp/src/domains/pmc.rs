//! Strain-based Performance Management Chart.
//!
//! Each energy system carries its own fitness (CTL) and fatigue (ATL)
//! exponentially weighted averages of daily strain:
//!
//! ```text
//! fitness_t = fitness_{t-1} * a_fit + load_t * (1 - a_fit),   a_fit = e^(-1/T_fit)
//! fatigue_t = fatigue_{t-1} * a_fat + load_t * (1 - a_fat),   a_fat = e^(-1/T_fat)
//! form      = fitness - fatigue
//! ```
//!
//! The recurrence runs once per calendar day from the first day of the series
//! through the reference date, rest days included.

use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::aggregate::DailyStrainSeries;
use super::strain::{PerSystem, StrainLoad};
use crate::error::StrainError;

pub const DEFAULT_FITNESS_DAYS: u32 = 42;
pub const DEFAULT_FATIGUE_DAYS: u32 = 7;

/// Fitness and fatigue time constants in days, both non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeConstants {
    fitness_days: u32,
    fatigue_days: u32,
}

impl TimeConstants {
    pub fn new(fitness_days: u32, fatigue_days: u32) -> Result<Self, StrainError> {
        if fitness_days == 0 {
            return Err(StrainError::InvalidTimeConstant {
                name: "ctl_days",
                value: fitness_days,
            });
        }
        if fatigue_days == 0 {
            return Err(StrainError::InvalidTimeConstant {
                name: "atl_days",
                value: fatigue_days,
            });
        }
        Ok(Self {
            fitness_days,
            fatigue_days,
        })
    }

    pub fn fitness_days(&self) -> u32 {
        self.fitness_days
    }

    pub fn fatigue_days(&self) -> u32 {
        self.fatigue_days
    }

    pub fn decay(&self) -> DecayFactors {
        DecayFactors::new(self.fitness_days, self.fatigue_days)
    }
}

impl Default for TimeConstants {
    fn default() -> Self {
        Self {
            fitness_days: DEFAULT_FITNESS_DAYS,
            fatigue_days: DEFAULT_FATIGUE_DAYS,
        }
    }
}

/// Per-day retention (`alpha`) and intake (`1 - alpha`) weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayFactors {
    pub fitness: f64,
    pub fitness_gain: f64,
    pub fatigue: f64,
    pub fatigue_gain: f64,
}

impl DecayFactors {
    fn new(fitness_days: u32, fatigue_days: u32) -> Self {
        let fitness = (-1.0 / f64::from(fitness_days)).exp();
        let fatigue = (-1.0 / f64::from(fatigue_days)).exp();
        Self {
            fitness,
            fitness_gain: 1.0 - fitness,
            fatigue,
            fatigue_gain: 1.0 - fatigue,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PmcState {
    /// CTL.
    pub fitness: f64,
    /// ATL.
    pub fatigue: f64,
    /// TSB, `fitness - fatigue`.
    pub form: f64,
}

/// Running fitness/fatigue of one system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Accumulator {
    fitness: f64,
    fatigue: f64,
}

impl Accumulator {
    fn step(&mut self, load: f64, decay: &DecayFactors) {
        self.fitness = self.fitness * decay.fitness + load * decay.fitness_gain;
        self.fatigue = self.fatigue * decay.fatigue + load * decay.fatigue_gain;
    }

    fn state(&self) -> PmcState {
        PmcState {
            fitness: self.fitness,
            fatigue: self.fatigue,
            form: self.fitness - self.fatigue,
        }
    }
}

/// State of every system after the load of `date` was applied.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct PmcPoint {
    pub date: String,
    pub load: StrainLoad,
    pub systems: PerSystem<PmcState>,
}

fn walk(
    series: &DailyStrainSeries,
    as_of: NaiveDate,
    constants: TimeConstants,
    mut visit: impl FnMut(NaiveDate, &StrainLoad, &PerSystem<Accumulator>),
) -> Result<PerSystem<Accumulator>, StrainError> {
    if as_of < series.start() {
        return Err(StrainError::AsOfBeforeSeriesStart {
            as_of,
            start: series.start(),
        });
    }
    let decay = constants.decay();
    let rest_day = StrainLoad::default();
    let mut acc = PerSystem::<Accumulator>::default();

    let mut date = series.start();
    while date <= as_of {
        let load = series.get(date).unwrap_or(&rest_day);
        acc.aerobic.step(load.aerobic, &decay);
        acc.glycolytic.step(load.glycolytic, &decay);
        acc.neuromuscular.step(load.neuromuscular, &decay);
        visit(date, load, &acc);
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(acc)
}

/// Fitness, fatigue and form of every system as of `as_of`.
///
/// Days between the end of the series and `as_of` are treated as rest days.
pub fn compute_pmc(
    series: &DailyStrainSeries,
    as_of: NaiveDate,
    constants: TimeConstants,
) -> Result<PerSystem<PmcState>, StrainError> {
    let acc = walk(series, as_of, constants, |_, _, _| {})?;
    Ok(acc.map(|a| a.state()))
}

/// Every intermediate state, one point per day through `as_of`.
pub fn pmc_trajectory(
    series: &DailyStrainSeries,
    as_of: NaiveDate,
    constants: TimeConstants,
) -> Result<Vec<PmcPoint>, StrainError> {
    let mut points = Vec::with_capacity(series.len());
    walk(series, as_of, constants, |date, load, acc| {
        points.push(PmcPoint {
            date: date.format("%Y-%m-%d").to_string(),
            load: *load,
            systems: acc.map(|a| a.state()),
        });
    })?;
    Ok(points)
}
