//! Simulation - one stateful, single-writer simulation session.

use crate::history::History;
use crate::seeds::SeedPolicy;

use pohd_core::calendar::{elapsed_years, within_horizon, year_of_day, BURN_YEAR};
use pohd_core::{Aggregates, ModelParams, Population, SimError, SimResult};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Population size used when none is given.
pub const DEFAULT_USER_COUNT: usize = 1000;

/// Configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Number of users created by `initialize`
    pub user_count: usize,

    /// Model coefficients
    pub params: ModelParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            user_count: DEFAULT_USER_COUNT,
            params: ModelParams::default(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_user_count(mut self, user_count: usize) -> Self {
        self.user_count = user_count;
        self
    }

    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No population
    Uninitialized,

    /// Population created, no day executed yet
    Initialized,

    /// At least one day executed, horizon not reached
    Running,

    /// Horizon reached; further steps are no-ops
    Completed,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub current_day: u64,
    pub current_year: u32,
    pub user_count: usize,
    pub total_vdf: f64,
    pub total_cw: f64,
    pub gdp_index: f64,
    pub average_hcs: f64,
    pub eligible_ratio: f64,
    pub burn_applied: bool,
    pub phase: SessionPhase,
}

/// A simulation session: population, stepping state and history.
///
/// All mutation goes through `&mut self`; wrap the session in
/// [`crate::SharedSimulation`] to drive it from several threads.
pub struct Simulation {
    config: SimConfig,
    seeds: SeedPolicy,
    phase: SessionPhase,
    population: Population,
    noise_rng: ChaCha8Rng,
    current_day: u64,
    aggregates: Aggregates,

    /// Burn_t term of the GDP model
    burn: f64,

    /// Day index whose step applied the burn
    burn_day: Option<u64>,

    history: History,
}

impl Simulation {
    /// Creates an uninitialized session with the given configuration.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.params.validate()?;

        let seeds = SeedPolicy::new(config.seed);
        let noise_rng = seeds.noise_rng();

        Ok(Self {
            config,
            seeds,
            phase: SessionPhase::Uninitialized,
            population: Population::new(),
            noise_rng,
            current_day: 0,
            aggregates: Aggregates::default(),
            burn: 0.0,
            burn_day: None,
            history: History::new(),
        })
    }

    /// Populates the configured number of users.
    pub fn initialize(&mut self) -> SimResult<()> {
        self.initialize_users(self.config.user_count)
    }

    /// Populates `count` users from the session's seed policy.
    pub fn initialize_users(&mut self, count: usize) -> SimResult<()> {
        if !self.population.is_empty() {
            return Err(SimError::AlreadyInitialized(self.population.len()));
        }

        let mut rng = self.seeds.population_rng();
        self.population = Population::seeded(count, self.seeds.population_seed(), &mut rng)?;
        self.noise_rng = self.seeds.noise_rng();
        self.current_day = 0;
        self.burn = 0.0;
        self.burn_day = None;
        self.history.clear();
        self.aggregates = Aggregates::compute(&self.population, 0, 0.0);
        self.phase = SessionPhase::Initialized;

        info!(
            "Initialized {} users (seed={}, eligible={:.1}%)",
            count,
            self.seeds.master_seed(),
            self.aggregates.eligible_ratio * 100.0
        );
        Ok(())
    }

    /// Advances the simulation by one day.
    ///
    /// A no-op once the horizon is reached.
    pub fn run_daily_step(&mut self) -> SimResult<()> {
        match self.phase {
            SessionPhase::Uninitialized => return Err(SimError::Uninitialized),
            SessionPhase::Completed => {
                debug!("Step ignored: horizon reached at day {}", self.current_day);
                return Ok(());
            }
            SessionPhase::Initialized | SessionPhase::Running => {}
        }

        let day = self.current_day;
        let next_day = day + 1;
        let params = self.config.params;

        self.population.step(&params, elapsed_years(day), &mut self.noise_rng);

        // History entry `day` carries the burn from the first day of 2035 on
        if self.burn_day.is_none() && year_of_day(day) >= BURN_YEAR {
            self.burn = params.burn_uplift;
            self.population.apply_burn(params.burn_uplift);
            self.burn_day = Some(day);
            info!(
                "🔥 Burn event at day {} ({}): uplift {:+.1}%",
                day,
                year_of_day(day),
                params.burn_uplift * 100.0
            );
        }

        self.aggregates = Aggregates::compute(&self.population, day, self.burn);
        self.history.record(&self.aggregates);
        self.current_day = next_day;

        if within_horizon(self.current_day) {
            self.phase = SessionPhase::Running;
        } else {
            self.phase = SessionPhase::Completed;
            info!(
                "Simulation complete: {} days | HCS={:.4} | GDP={:.2}",
                self.current_day, self.aggregates.average_hcs, self.aggregates.gdp_index
            );
        }

        if next_day % 365 == 0 {
            debug!(
                "  year {} | HCS={:.4} | CW={:.0} | GDP={:.2}",
                year_of_day(day),
                self.aggregates.average_hcs,
                self.aggregates.total_cw,
                self.aggregates.gdp_index
            );
        }

        Ok(())
    }

    /// Runs up to `days` steps, stopping early at the horizon.
    ///
    /// Returns the number of days actually executed.
    pub fn run_days(&mut self, days: u64) -> SimResult<u64> {
        let start = self.current_day;
        for _ in 0..days {
            if self.phase == SessionPhase::Completed {
                break;
            }
            self.run_daily_step()?;
        }
        Ok(self.current_day - start)
    }

    /// Runs until the horizon is reached.
    pub fn run_to_completion(&mut self) -> SimResult<()> {
        while self.phase != SessionPhase::Completed {
            self.run_daily_step()?;
        }
        Ok(())
    }

    /// Clears population, state and history.
    pub fn reset_simulation(&mut self) {
        self.population.clear();
        self.history.clear();
        self.noise_rng = self.seeds.noise_rng();
        self.current_day = 0;
        self.aggregates = Aggregates::default();
        self.burn = 0.0;
        self.burn_day = None;
        self.phase = SessionPhase::Uninitialized;
        debug!("Simulation reset");
    }

    /// Returns a consistent snapshot of the current state.
    pub fn snapshot(&self) -> SimulationState {
        SimulationState {
            current_day: self.current_day,
            current_year: self.current_year(),
            user_count: self.user_count(),
            total_vdf: self.aggregates.total_vdf,
            total_cw: self.aggregates.total_cw,
            gdp_index: self.aggregates.gdp_index,
            average_hcs: self.aggregates.average_hcs,
            eligible_ratio: self.aggregates.eligible_ratio,
            burn_applied: self.burn_applied(),
            phase: self.phase,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_day(&self) -> u64 {
        self.current_day
    }

    pub fn current_year(&self) -> u32 {
        year_of_day(self.current_day)
    }

    pub fn user_count(&self) -> usize {
        self.population.len()
    }

    pub fn average_hcs(&self) -> f64 {
        self.aggregates.average_hcs
    }

    pub fn total_vdf(&self) -> f64 {
        self.aggregates.total_vdf
    }

    pub fn total_cw(&self) -> f64 {
        self.aggregates.total_cw
    }

    pub fn gdp_index(&self) -> f64 {
        self.aggregates.gdp_index
    }

    pub fn eligible_ratio(&self) -> f64 {
        self.aggregates.eligible_ratio
    }

    pub fn burn_applied(&self) -> bool {
        self.burn_day.is_some()
    }

    /// Day index whose step applied the burn event, if any.
    pub fn burn_day(&self) -> Option<u64> {
        self.burn_day
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn historical_hcs(&self) -> &[f64] {
        self.history.hcs()
    }

    pub fn historical_cw(&self) -> &[f64] {
        self.history.cw()
    }

    pub fn historical_gdp(&self) -> &[f64] {
        self.history.gdp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pohd_core::calendar::{first_day_of_year, HORIZON_DAYS};

    fn small_sim() -> Simulation {
        let config = SimConfig::default().with_user_count(50);
        let mut sim = Simulation::new(config).unwrap();
        sim.initialize().unwrap();
        sim
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(SimConfig::default()).unwrap();

        assert_eq!(sim.phase(), SessionPhase::Uninitialized);
        assert_eq!(sim.current_day(), 0);
        assert_eq!(sim.current_year(), 2026);
        assert_eq!(sim.user_count(), 0);
        assert!(sim.historical_gdp().is_empty());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = ModelParams {
            alpha: f64::INFINITY,
            ..ModelParams::default()
        };
        let result = Simulation::new(SimConfig::default().with_params(params));

        assert!(matches!(result, Err(SimError::InvalidParameter(_))));
    }

    #[test]
    fn test_step_before_initialize_fails() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();

        assert!(matches!(sim.run_daily_step(), Err(SimError::Uninitialized)));
        assert_eq!(sim.current_day(), 0);
    }

    #[test]
    fn test_double_initialize_fails() {
        let mut sim = small_sim();

        let err = sim.initialize_users(10).unwrap_err();
        assert!(matches!(err, SimError::AlreadyInitialized(50)));
        assert_eq!(sim.user_count(), 50);
    }

    #[test]
    fn test_initialize_sets_state() {
        let sim = small_sim();

        assert_eq!(sim.phase(), SessionPhase::Initialized);
        assert_eq!(sim.user_count(), 50);
        assert!(sim.average_hcs() > 0.0 && sim.average_hcs() < 1.0);
        assert_eq!(sim.total_cw(), 0.0);
        assert_eq!(sim.total_vdf(), 0.0);
    }

    #[test]
    fn test_simulation_step() {
        let mut sim = small_sim();

        sim.run_daily_step().unwrap();

        assert_eq!(sim.phase(), SessionPhase::Running);
        assert_eq!(sim.current_day(), 1);
        assert_eq!(sim.historical_hcs().len(), 1);
        assert_eq!(sim.historical_cw().len(), 1);
        assert_eq!(sim.historical_gdp().len(), 1);
        assert_eq!(sim.historical_gdp()[0], sim.gdp_index());
        assert!(sim.total_vdf() > 0.0);
    }

    #[test]
    fn test_vdf_is_monotonic() {
        let mut sim = small_sim();
        let mut last = sim.total_vdf();

        for _ in 0..100 {
            sim.run_daily_step().unwrap();
            assert!(sim.total_vdf() > last);
            last = sim.total_vdf();
        }
    }

    #[test]
    fn test_burn_applied_once_entering_2035() {
        let mut sim = small_sim();
        let burn_start = first_day_of_year(BURN_YEAR);

        sim.run_days(burn_start).unwrap();
        assert_eq!(year_of_day(burn_start - 1), 2034);
        assert!(!sim.burn_applied());

        let cw_before = sim.total_cw();
        sim.run_daily_step().unwrap();
        assert!(sim.burn_applied());
        assert_eq!(sim.burn_day(), Some(burn_start));
        assert_eq!(year_of_day(burn_start), 2035);
        assert!(sim.total_cw() > cw_before * 1.1);

        sim.run_days(400).unwrap();
        assert_eq!(sim.burn_day(), Some(burn_start));
    }

    #[test]
    fn test_burn_lands_on_first_day_of_2035() {
        // Frozen scores leave only the growth and burn factors in the GDP series
        let params = ModelParams {
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            burn_uplift: 0.111,
        };
        let config = SimConfig::default().with_user_count(50).with_params(params);
        let mut sim = Simulation::new(config).unwrap();
        sim.initialize().unwrap();
        sim.run_days(3300).unwrap();

        let gdp = sim.historical_gdp();
        let daily_growth = (0.03_f64 / 365.0).exp();

        assert_relative_eq!(gdp[3284] / gdp[3283], daily_growth, max_relative = 1e-9);
        assert_relative_eq!(
            gdp[3285] / gdp[3284],
            daily_growth * 1.111_f64.powf(0.3),
            max_relative = 1e-9
        );
        assert_relative_eq!(gdp[3286] / gdp[3285], daily_growth, max_relative = 1e-9);
    }

    #[test]
    fn test_horizon_completion() {
        let mut sim = small_sim();

        let executed = sim.run_days(HORIZON_DAYS + 10).unwrap();

        assert_eq!(executed, HORIZON_DAYS);
        assert_eq!(sim.phase(), SessionPhase::Completed);
        assert_eq!(sim.current_year(), 2040);
        assert_eq!(sim.historical_gdp().len(), HORIZON_DAYS as usize);

        let before = sim.snapshot();
        sim.run_daily_step().unwrap();
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sim = small_sim();
        sim.run_days(20).unwrap();

        sim.reset_simulation();

        assert_eq!(sim.phase(), SessionPhase::Uninitialized);
        assert_eq!(sim.user_count(), 0);
        assert_eq!(sim.current_day(), 0);
        assert!(sim.history().is_empty());
        assert!(matches!(sim.run_daily_step(), Err(SimError::Uninitialized)));

        sim.initialize_users(1000).unwrap();
        assert_eq!(sim.user_count(), 1000);
        assert_eq!(sim.current_day(), 0);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut sim = small_sim();
        sim.run_days(30).unwrap();
        let first = sim.history().clone();

        sim.reset_simulation();
        sim.initialize().unwrap();
        sim.run_days(30).unwrap();

        assert_eq!(sim.history(), &first);
    }

    #[test]
    fn test_single_step_matches_batch() {
        let mut stepped = small_sim();
        let mut batched = small_sim();

        for _ in 0..120 {
            stepped.run_daily_step().unwrap();
        }
        batched.run_days(120).unwrap();

        assert_eq!(stepped.history(), batched.history());
        assert_eq!(stepped.snapshot(), batched.snapshot());
    }
}
