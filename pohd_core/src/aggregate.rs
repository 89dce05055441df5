//! Population-wide aggregates and the GDP index model.
//!
//! # Formula
//! ```text
//! Y_t = A0 * e^(0.03 t) * PHD^0.4 * HCS_avg^0.3 * (1 + Burn_t)^0.3
//! ```
//!
//! Where:
//! - `t` = elapsed years since 2026-01-01 at the simulated day
//! - `PHD` = normalized daily VDF throughput: the hours the population
//!   accrues per day divided by what it would accrue if everyone were
//!   eligible, i.e. `r + (1 - r) * VDF_HOURS_INELIGIBLE / VDF_HOURS_ELIGIBLE`
//!   for eligible ratio `r`. It lies in [0.25, 1].
//! - `HCS_avg` = mean Human Capital Score
//! - `Burn_t` = burn uplift, 0 before the 2035 event

use crate::calendar::elapsed_years;
use crate::population::{Population, VDF_HOURS_ELIGIBLE, VDF_HOURS_INELIGIBLE};
use serde::{Deserialize, Serialize};

/// GDP index at t = 0 with full participation and perfect HCS (2026 = 100 basis).
pub const GDP_BASE: f64 = 100.0;

/// Continuous productivity growth per year.
///
/// The exponent is `rate * years` with `years` counted in 365-day years, so
/// day 365 grows the index by `e^0.03` and not `e^(0.03 * 365)`.
pub const GDP_GROWTH_RATE: f64 = 0.03;

pub const PHD_EXPONENT: f64 = 0.4;
pub const HCS_EXPONENT: f64 = 0.3;
pub const BURN_EXPONENT: f64 = 0.3;

/// Aggregated metrics for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Arithmetic mean of all users' HCS
    pub average_hcs: f64,

    /// Sum of VDF hours
    pub total_vdf: f64,

    /// Sum of Community Wealth
    pub total_cw: f64,

    /// Fraction of users that are eligible
    pub eligible_ratio: f64,

    /// Participation proxy fed into the GDP index
    pub phd: f64,

    /// Composite GDP index
    pub gdp_index: f64,
}

impl Aggregates {
    /// Computes every aggregate of `population` for the given day.
    ///
    /// An empty population yields all zeros.
    pub fn compute(population: &Population, day: u64, burn: f64) -> Self {
        let users = population.users();
        if users.is_empty() {
            return Self::default();
        }

        let n = users.len() as f64;
        let mut hcs_sum = 0.0;
        let mut total_vdf = 0.0;
        let mut total_cw = 0.0;
        let mut eligible = 0usize;

        for user in users {
            hcs_sum += user.hcs;
            total_vdf += user.vdf;
            total_cw += user.cw;
            if user.eligible {
                eligible += 1;
            }
        }

        let average_hcs = hcs_sum / n;
        let eligible_ratio = eligible as f64 / n;
        let phd = participation(eligible_ratio);

        Self {
            average_hcs,
            total_vdf,
            total_cw,
            eligible_ratio,
            phd,
            gdp_index: gdp_index(elapsed_years(day), phd, average_hcs, burn),
        }
    }
}

/// Normalized daily VDF throughput for a given eligible ratio.
pub fn participation(eligible_ratio: f64) -> f64 {
    let floor = VDF_HOURS_INELIGIBLE / VDF_HOURS_ELIGIBLE;
    eligible_ratio + (1.0 - eligible_ratio) * floor
}

/// Evaluates the GDP index model.
///
/// `years` is the elapsed time in years since January 1st 2026, as returned
/// by [`elapsed_years`].
pub fn gdp_index(years: f64, phd: f64, average_hcs: f64, burn: f64) -> f64 {
    GDP_BASE
        * (GDP_GROWTH_RATE * years).exp()
        * phd.powf(PHD_EXPONENT)
        * average_hcs.powf(HCS_EXPONENT)
        * (1.0 + burn).powf(BURN_EXPONENT)
}

/// Compound annual growth rate between two positive values `years` apart.
pub fn cagr(start: f64, end: f64, years: f64) -> f64 {
    (end / start).powf(1.0 / years) - 1.0
}
