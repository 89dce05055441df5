//! Error types for the PoHD simulation engine.

use thiserror::Error;

/// Errors that can occur while driving a simulation or a scenario batch.
#[derive(Debug, Error)]
pub enum SimError {
    /// Stepping was requested before `initialize_users`
    #[error("Simulation is not initialized")]
    Uninitialized,

    /// Population is non-empty and no reset happened since
    #[error("Population already initialized with {0} users (reset first)")]
    AlreadyInitialized(usize),

    /// Population size of zero was requested
    #[error("User count must be greater than zero")]
    EmptyPopulation,

    /// A model coefficient or distribution parameter is unusable
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// History has no entry for the requested day
    #[error("No history entry for day {0}")]
    MissingHistory(usize),

    /// No day has been recorded yet
    #[error("History is empty")]
    EmptyHistory,

    /// GDP index cannot serve as a growth base
    #[error("GDP index {value} at day {day} is not positive")]
    DegenerateGdp { day: usize, value: f64 },

    /// A single scenario of a batch failed
    #[error("Scenario '{scenario}' failed: {source}")]
    ScenarioRun {
        scenario: String,
        #[source]
        source: Box<SimError>,
    },
}

impl SimError {
    /// Creates an invalid parameter error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Wraps an error raised while running the named scenario.
    pub fn scenario(name: impl Into<String>, source: SimError) -> Self {
        Self::ScenarioRun {
            scenario: name.into(),
            source: Box::new(source),
        }
    }
}

/// Result alias used throughout the engine.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_scenario_error_keeps_source() {
        let err = SimError::scenario("Baseline", SimError::MissingHistory(3285));

        assert_eq!(
            err.to_string(),
            "Scenario 'Baseline' failed: No history entry for day 3285"
        );
        let source = err.source().expect("wrapped source");
        assert_eq!(source.to_string(), "No history entry for day 3285");
    }
}
