//! Scenario runner - drives independent sessions through the full horizon.

use crate::history::History;
use crate::scenarios::{builtin_configs, ScenarioConfig, ScenarioId};
use crate::session::{SimConfig, Simulation, DEFAULT_USER_COUNT};

use pohd_core::calendar::{first_day_of_year, BURN_YEAR, END_YEAR};
use pohd_core::{cagr, SimError, SimResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Summary of one completed scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub burn_multiplier: f64,

    /// Average HCS at horizon end
    pub final_hcs: f64,

    /// Total Community Wealth at horizon end
    pub final_cw: f64,

    /// GDP index of the final day
    pub final_gdp_index: f64,

    /// GDP growth per year from January 1st 2035 to the final day
    pub cagr_2035_2040: f64,

    /// Fraction of users eligible at horizon end
    pub eligible_ratio: f64,
}

/// CAGR of the GDP index between the first day of 2035 and the final day.
pub fn cagr_2035_2040(history: &History) -> SimResult<f64> {
    let start = history.gdp_at_year_start(BURN_YEAR)?;
    if !(start.is_finite() && start > 0.0) {
        return Err(SimError::DegenerateGdp {
            day: first_day_of_year(BURN_YEAR) as usize,
            value: start,
        });
    }
    let end = history.last_gdp()?;
    Ok(cagr(start, end, (END_YEAR - BURN_YEAR) as f64))
}

/// Runs scenario batches.
pub struct ScenarioRunner {
    /// Master seed shared by every scenario
    seed: u64,

    /// Users per scenario
    user_count: usize,

    /// Worker threads (None = rayon default)
    threads: Option<usize>,

    /// Run scenarios on worker threads
    parallel: bool,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(42, DEFAULT_USER_COUNT)
    }
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64, user_count: usize) -> Self {
        Self {
            seed,
            user_count,
            threads: None,
            parallel: true,
        }
    }

    /// Sets the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Runs scenarios one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Runs a built-in scenario.
    pub fn run(&self, scenario: ScenarioId) -> SimResult<ScenarioResult> {
        self.run_config(&scenario.config())
    }

    /// Runs one configuration through the full horizon.
    ///
    /// Any failure is wrapped in [`SimError::ScenarioRun`].
    pub fn run_config(&self, config: &ScenarioConfig) -> SimResult<ScenarioResult> {
        info!("Starting scenario: {} (seed={})", config.scenario_name, self.seed);

        let result = self
            .simulate(config)
            .map_err(|e| SimError::scenario(config.scenario_name.as_str(), e))?;

        info!(
            "✓ {} complete: HCS={:.4} | CW={:.2}M | GDP={:.2} | CAGR={:+.2}% | eligible={:.1}%",
            result.scenario_name,
            result.final_hcs,
            result.final_cw / 1_000_000.0,
            result.final_gdp_index,
            result.cagr_2035_2040 * 100.0,
            result.eligible_ratio * 100.0
        );
        Ok(result)
    }

    fn simulate(&self, config: &ScenarioConfig) -> SimResult<ScenarioResult> {
        let sim_config = SimConfig::default()
            .with_seed(self.seed)
            .with_user_count(self.user_count)
            .with_params(config.params());

        let mut sim = Simulation::new(sim_config)?;
        sim.initialize()?;
        sim.run_to_completion()?;

        debug!(
            "  {} finished at day {} ({})",
            config.scenario_name,
            sim.current_day(),
            sim.current_year()
        );

        Ok(ScenarioResult {
            scenario_name: config.scenario_name.clone(),
            alpha: config.alpha,
            beta: config.beta,
            gamma: config.gamma,
            burn_multiplier: config.burn_multiplier,
            final_hcs: sim.average_hcs(),
            final_cw: sim.total_cw(),
            final_gdp_index: sim.gdp_index(),
            cagr_2035_2040: cagr_2035_2040(sim.history())?,
            eligible_ratio: sim.eligible_ratio(),
        })
    }

    /// Runs every configuration and returns results in input order.
    ///
    /// Fails as a whole if any scenario fails; no partial results.
    pub fn run_scenarios(&self, configs: &[ScenarioConfig]) -> SimResult<Vec<ScenarioResult>> {
        info!(
            "Running {} scenarios ({} users each, {})",
            configs.len(),
            self.user_count,
            if self.parallel { "parallel" } else { "sequential" }
        );

        if !self.parallel {
            return configs.iter().map(|c| self.run_config(c)).collect();
        }

        let batch = || {
            configs
                .par_iter()
                .map(|c| self.run_config(c))
                .collect::<SimResult<Vec<_>>>()
        };

        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SimError::invalid(format!("worker pool: {e}")))?;
                pool.install(batch)
            }
            None => batch(),
        }
    }

    /// Runs the ten built-in scenarios.
    pub fn run_sensitivity_analysis(&self) -> SimResult<Vec<ScenarioResult>> {
        self.run_scenarios(&builtin_configs())
    }
}
