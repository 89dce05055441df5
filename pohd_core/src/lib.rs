//! PoHD Core - Human Capital Score population model
//!
//! This library holds the pure, state-free parts of the PoHD economic
//! simulation:
//! 1. **Calendar**: day/year arithmetic for the 2026-2040 horizon
//! 2. **Population**: per-user HCS, eligibility and the daily update rule
//! 3. **Aggregate**: population-wide metrics and the GDP index model
//!
//! Session lifecycle, history and scenario orchestration live in `pohd_sim`.

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod population;

// Re-export key types for convenience
pub use aggregate::{cagr, gdp_index, participation, Aggregates};
pub use error::{SimError, SimResult};
pub use population::{ModelParams, Population, User, UserId};
