//! Domain logic, free of I/O.
//!
//! # Modules
//!
//! - [`strain`]: energy systems, per-system values, activity date validation
//! - [`aggregate`]: daily strain series with rest days zero-filled
//! - [`pmc`]: fitness/fatigue/form decay model per energy system
//! - [`balance`]: strain distribution across systems
//! - [`assessment`]: distribution targets, status and recommendations
//! - [`power_curve`]: power curve reshaping
//! - [`sport_settings`]: athlete and sport settings merge

pub mod aggregate;
pub mod assessment;
pub mod balance;
pub mod pmc;
pub mod power_curve;
pub mod sport_settings;
pub mod strain;

pub use aggregate::{DailyStrainSeries, aggregate};
pub use pmc::{PmcState, TimeConstants, compute_pmc};
pub use strain::{EnergySystem, PerSystem, StrainLoad};
