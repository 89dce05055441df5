//! JSON exporter for simulation runs.
//!
//! Writes a session's daily series or a sensitivity batch as pretty JSON
//! for charting outside the simulator.

use crate::runner::ScenarioResult;
use crate::session::{Simulation, SimulationState};

use pohd_core::calendar::year_of_day;
use pohd_core::ModelParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// One recorded day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day index (0 = January 1st 2026)
    pub day: u64,
    pub year: u32,
    pub average_hcs: f64,
    pub total_cw: f64,
    pub gdp_index: f64,
}

/// Complete export of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Seed used
    pub seed: u64,

    pub user_count: usize,

    pub params: ModelParams,

    /// One record per executed day
    pub days: Vec<DayRecord>,

    /// State after the last executed day
    pub final_state: SimulationState,

    /// Day whose step applied the burn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burn_day: Option<u64>,
}

impl SimExport {
    /// Captures the history and state of a session.
    pub fn from_simulation(sim: &Simulation) -> Self {
        let history = sim.history();
        let days = history
            .hcs()
            .iter()
            .zip(history.cw())
            .zip(history.gdp())
            .enumerate()
            .map(|(i, ((&average_hcs, &total_cw), &gdp_index))| DayRecord {
                day: i as u64,
                year: year_of_day(i as u64),
                average_hcs,
                total_cw,
                gdp_index,
            })
            .collect();

        Self {
            seed: sim.config().seed,
            user_count: sim.user_count(),
            params: sim.config().params,
            days,
            final_state: sim.snapshot(),
            burn_day: sim.burn_day(),
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        write_json(self, path)
    }
}

/// Export of a sensitivity batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityExport {
    pub seed: u64,
    pub user_count: usize,
    pub results: Vec<ScenarioResult>,
}

impl SensitivityExport {
    pub fn new(seed: u64, user_count: usize, results: Vec<ScenarioResult>) -> Self {
        Self {
            seed,
            user_count,
            results,
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        write_json(self, path)
    }
}

fn write_json<T: Serialize>(value: &T, path: &str) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
