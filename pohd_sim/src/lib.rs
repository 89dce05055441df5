//! PoHD Simulation Sessions and Scenario Runner
//!
//! This crate drives the daily model from `pohd_core` through the
//! 2026-2040 horizon.
//!
//! # Core Principle: One Seed, One Trajectory
//!
//! Every source of randomness is derived from a single 64-bit master seed:
//! - **Population**: initial HCS draws and user identifiers
//! - **Noise**: the per-user daily noise stream, drawn in user order
//!
//! Replaying a seed with the same parameters reproduces every recorded
//! value bit for bit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ScenarioRunner                         │
//! │   (rayon: one independent session per scenario)             │
//! │       │                        │                            │
//! │  ┌────▼───────┐           ┌────▼───────┐                    │
//! │  │ Simulation │    ...    │ Simulation │                    │
//! │  │ Population │           │ Population │                    │
//! │  │  History   │           │  History   │                    │
//! │  └────────────┘           └────────────┘                    │
//! │                                                             │
//! │  SharedSimulation: Arc<RwLock<Simulation>> for one session  │
//! │  driven from several threads                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pohd_sim::{Simulation, SimConfig};
//!
//! let mut sim = Simulation::new(SimConfig::default().with_seed(42))?;
//! sim.initialize()?;
//! sim.run_to_completion()?;
//! println!("GDP 2040: {:.2}", sim.gdp_index());
//! ```

pub mod exporter;
mod history;
pub mod runner;
pub mod scenarios;
mod seeds;
mod session;
mod shared;

pub use exporter::{DayRecord, SensitivityExport, SimExport};
pub use history::History;
pub use runner::{cagr_2035_2040, ScenarioResult, ScenarioRunner};
pub use scenarios::{builtin_configs, ScenarioConfig, ScenarioId};
pub use seeds::SeedPolicy;
pub use session::{SessionPhase, SimConfig, Simulation, SimulationState, DEFAULT_USER_COUNT};
pub use shared::SharedSimulation;
