//! FAIR quantitative risk register: loss-event frequency and loss
//! magnitude estimates rolled up to an annual loss expectancy.

pub mod filter;
pub mod types;

pub use types::{FairRisk, FairStats, NewFairRisk, TreatmentStats};
