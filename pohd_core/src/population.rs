//! Population model: per-user Human Capital Score and its daily update rule.
//!
//! Each day every user's HCS moves by three terms:
//!
//! ```text
//! growth = (1 - h) * (1 + ELIGIBLE_GROWTH_BONUS * e) / 365
//! stress = h * (1 + STRESS_TIME_FACTOR * y / 15) / 365
//! noise  = z / sqrt(365),  z ~ N(0, 1)
//!
//! h' = clamp(h + alpha * growth - beta * stress + gamma * noise, 0, 1)
//! ```
//!
//! where `e` is 1 for eligible users and `y` is the elapsed years of the day.
//! Noise is scaled so that `gamma` is an annual standard deviation.

use crate::calendar::DAYS_PER_YEAR;
use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HCS at or above this value makes a user eligible.
pub const ELIGIBILITY_THRESHOLD: f64 = 0.6;

/// Extra growth share for eligible users.
pub const ELIGIBLE_GROWTH_BONUS: f64 = 0.5;

/// Stress increase reached after 15 years.
pub const STRESS_TIME_FACTOR: f64 = 0.5;

/// Mean of the initial HCS distribution.
pub const INITIAL_HCS_MEAN: f64 = 0.5;

/// Standard deviation of the initial HCS distribution.
pub const INITIAL_HCS_STD: f64 = 0.12;

/// VDF hours accrued per day by an eligible user.
pub const VDF_HOURS_ELIGIBLE: f64 = 1.0;

/// VDF hours accrued per day by an ineligible user.
pub const VDF_HOURS_INELIGIBLE: f64 = 0.25;

/// Community Wealth accrued per day by an eligible user with HCS 1.0.
pub const CW_DAILY_BASE: f64 = 100.0;

/// Horizon length in years, used to scale stress over time.
const STRESS_HORIZON_YEARS: f64 = 15.0;

/// Sensitivity coefficients of the daily update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Growth coefficient
    pub alpha: f64,

    /// Stress coefficient
    pub beta: f64,

    /// Noise coefficient
    pub gamma: f64,

    /// Uplift applied by the 2035 burn event
    pub burn_uplift: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            beta: 0.10,
            gamma: 0.05,
            burn_uplift: 0.111,
        }
    }
}

impl ModelParams {
    /// Checks that every coefficient is usable by the update rule.
    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.burn_uplift.is_finite() || self.burn_uplift <= -1.0 {
            return Err(SimError::invalid(format!(
                "burn uplift must be finite and greater than -1, got {}",
                self.burn_uplift
            )));
        }
        Ok(())
    }
}

/// Identifier of a simulated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a deterministic UserId from a population seed and index.
    pub fn from_seed(seed: u64, index: u64) -> Self {
        let mixed = seed ^ index.wrapping_mul(0x9e3779b97f4a7c15);
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&mixed.to_le_bytes());
        bytes[8..16].copy_from_slice(&index.to_le_bytes());
        Self(Uuid::from_bytes(bytes))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A single simulated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Human Capital Score in [0, 1]
    pub hcs: f64,

    /// HCS meets the eligibility threshold
    pub eligible: bool,

    /// Accumulated VDF hours
    pub vdf: f64,

    /// Accumulated Community Wealth
    pub cw: f64,
}

impl User {
    /// Creates a user with the given starting score and no accruals.
    pub fn new(id: UserId, hcs: f64) -> Self {
        let hcs = hcs.clamp(0.0, 1.0);
        Self {
            id,
            hcs,
            eligible: hcs >= ELIGIBILITY_THRESHOLD,
            vdf: 0.0,
            cw: 0.0,
        }
    }

    /// Applies one day of the update rule given a standard normal draw `z`.
    pub fn advance(&mut self, params: &ModelParams, years: f64, z: f64) {
        let delta = params.alpha * growth_term(self.hcs, self.eligible)
            - params.beta * stress_term(self.hcs, years)
            + params.gamma * noise_term(z);

        self.hcs = (self.hcs + delta).clamp(0.0, 1.0);
        self.eligible = self.hcs >= ELIGIBILITY_THRESHOLD;

        if self.eligible {
            self.vdf += VDF_HOURS_ELIGIBLE;
            self.cw += CW_DAILY_BASE * self.hcs;
        } else {
            self.vdf += VDF_HOURS_INELIGIBLE;
        }
    }
}

/// Daily pull toward 1.0, boosted for eligible users.
pub fn growth_term(hcs: f64, eligible: bool) -> f64 {
    let bonus = if eligible { ELIGIBLE_GROWTH_BONUS } else { 0.0 };
    (1.0 - hcs) * (1.0 + bonus) / DAYS_PER_YEAR as f64
}

/// Daily pull toward 0.0, growing linearly with elapsed years.
pub fn stress_term(hcs: f64, years: f64) -> f64 {
    hcs * (1.0 + STRESS_TIME_FACTOR * years / STRESS_HORIZON_YEARS) / DAYS_PER_YEAR as f64
}

/// Daily share of a standard normal shock.
pub fn noise_term(z: f64) -> f64 {
    z / (DAYS_PER_YEAR as f64).sqrt()
}

/// The full user cohort of one simulation session.
#[derive(Debug, Clone, Default)]
pub struct Population {
    users: Vec<User>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates `count` users with HCS drawn from N(0.5, 0.12) clamped to [0, 1].
    pub fn seeded<R: Rng>(count: usize, id_seed: u64, rng: &mut R) -> SimResult<Self> {
        if count == 0 {
            return Err(SimError::EmptyPopulation);
        }

        let initial = Normal::new(INITIAL_HCS_MEAN, INITIAL_HCS_STD)
            .map_err(|e| SimError::invalid(format!("initial HCS distribution: {e}")))?;

        let users = (0..count as u64)
            .map(|i| User::new(UserId::from_seed(id_seed, i), initial.sample(rng)))
            .collect();

        Ok(Self { users })
    }

    /// Advances every user by one day, drawing noise in user order.
    pub fn step<R: Rng>(&mut self, params: &ModelParams, years: f64, rng: &mut R) {
        for user in &mut self.users {
            let z: f64 = StandardNormal.sample(rng);
            user.advance(params, years, z);
        }
    }

    /// Scales every user's accumulated Community Wealth by `1 + uplift`.
    pub fn apply_burn(&mut self, uplift: f64) {
        for user in &mut self.users {
            user.cw *= 1.0 + uplift;
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of users currently eligible.
    pub fn eligible_count(&self) -> usize {
        self.users.iter().filter(|u| u.eligible).count()
    }

    /// Removes every user.
    pub fn clear(&mut self) {
        self.users.clear();
    }
}
