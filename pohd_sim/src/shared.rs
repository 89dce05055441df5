//! Thread-safe handle to a single simulation session.

use crate::session::{SimConfig, Simulation, SimulationState};
use pohd_core::SimResult;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared, lock-guarded simulation session.
///
/// Mutating calls take the write lock, so initialization, stepping and reset
/// never interleave. Reads take the read lock and always observe a whole day.
#[derive(Clone)]
pub struct SharedSimulation {
    inner: Arc<RwLock<Simulation>>,
}

impl SharedSimulation {
    /// Creates a shared session with the given configuration.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Ok(Self::from_simulation(Simulation::new(config)?))
    }

    /// Wraps an existing session.
    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(RwLock::new(simulation)),
        }
    }

    // Lock poisoning is not surfaced to callers.
    fn read(&self) -> RwLockReadGuard<'_, Simulation> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Simulation> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Populates the configured number of users.
    pub fn initialize(&self) -> SimResult<()> {
        self.write().initialize()
    }

    pub fn initialize_users(&self, count: usize) -> SimResult<()> {
        self.write().initialize_users(count)
    }

    pub fn run_daily_step(&self) -> SimResult<()> {
        self.write().run_daily_step()
    }

    pub fn run_days(&self, days: u64) -> SimResult<u64> {
        self.write().run_days(days)
    }

    pub fn reset_simulation(&self) {
        self.write().reset_simulation();
    }

    /// Runs `f` against the session under a single read lock.
    pub fn with<T>(&self, f: impl FnOnce(&Simulation) -> T) -> T {
        let guard = self.read();
        f(&*guard)
    }

    pub fn snapshot(&self) -> SimulationState {
        self.read().snapshot()
    }

    pub fn current_day(&self) -> u64 {
        self.read().current_day()
    }

    pub fn current_year(&self) -> u32 {
        self.read().current_year()
    }

    pub fn user_count(&self) -> usize {
        self.read().user_count()
    }

    pub fn average_hcs(&self) -> f64 {
        self.read().average_hcs()
    }

    pub fn total_vdf(&self) -> f64 {
        self.read().total_vdf()
    }

    pub fn total_cw(&self) -> f64 {
        self.read().total_cw()
    }

    pub fn gdp_index(&self) -> f64 {
        self.read().gdp_index()
    }

    pub fn historical_hcs(&self) -> Vec<f64> {
        self.read().historical_hcs().to_vec()
    }

    pub fn historical_cw(&self) -> Vec<f64> {
        self.read().historical_cw().to_vec()
    }

    pub fn historical_gdp(&self) -> Vec<f64> {
        self.read().historical_gdp().to_vec()
    }
}
