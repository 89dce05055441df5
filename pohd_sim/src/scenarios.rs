//! Built-in parameter scenarios for sensitivity analysis.

use pohd_core::ModelParams;
use serde::{Deserialize, Serialize};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    /// Reference coefficients shown on the dashboard
    Baseline,

    /// α = 0.20
    HighGrowth,

    /// α = 0.10
    LowGrowth,

    /// β = 0.15
    HighStress,

    /// β = 0.05
    LowStress,

    /// γ = 0.10
    HighVolatility,

    /// Burn uplift 20%
    StrongBurn,

    /// Burn uplift 5%
    WeakBurn,

    /// Everything favorable at once
    Optimistic,

    /// Everything adverse at once
    Pessimistic,
}

impl ScenarioId {
    /// Returns all scenarios in batch order.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Baseline,
            ScenarioId::HighGrowth,
            ScenarioId::LowGrowth,
            ScenarioId::HighStress,
            ScenarioId::LowStress,
            ScenarioId::HighVolatility,
            ScenarioId::StrongBurn,
            ScenarioId::WeakBurn,
            ScenarioId::Optimistic,
            ScenarioId::Pessimistic,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "baseline",
            ScenarioId::HighGrowth => "high_growth",
            ScenarioId::LowGrowth => "low_growth",
            ScenarioId::HighStress => "high_stress",
            ScenarioId::LowStress => "low_stress",
            ScenarioId::HighVolatility => "high_volatility",
            ScenarioId::StrongBurn => "strong_burn",
            ScenarioId::WeakBurn => "weak_burn",
            ScenarioId::Optimistic => "optimistic",
            ScenarioId::Pessimistic => "pessimistic",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "Reference case: α=0.15, β=0.10, γ=0.05, burn +11.1%",
            ScenarioId::HighGrowth => "Faster HCS growth (α=0.20)",
            ScenarioId::LowGrowth => "Slower HCS growth (α=0.10)",
            ScenarioId::HighStress => "Stronger stress decay (β=0.15)",
            ScenarioId::LowStress => "Weaker stress decay (β=0.05)",
            ScenarioId::HighVolatility => "Doubled daily noise (γ=0.10)",
            ScenarioId::StrongBurn => "2035 burn uplift of 20%",
            ScenarioId::WeakBurn => "2035 burn uplift of 5%",
            ScenarioId::Optimistic => "High growth, low stress, low noise, burn +15%",
            ScenarioId::Pessimistic => "Low growth, high stress, high noise, burn +5%",
        }
    }

    /// Returns the fixed configuration of this scenario.
    pub fn config(&self) -> ScenarioConfig {
        let (alpha, beta, gamma, burn_multiplier) = match self {
            ScenarioId::Baseline => (0.15, 0.10, 0.05, 0.111),
            ScenarioId::HighGrowth => (0.20, 0.10, 0.05, 0.111),
            ScenarioId::LowGrowth => (0.10, 0.10, 0.05, 0.111),
            ScenarioId::HighStress => (0.15, 0.15, 0.05, 0.111),
            ScenarioId::LowStress => (0.15, 0.05, 0.05, 0.111),
            ScenarioId::HighVolatility => (0.15, 0.10, 0.10, 0.111),
            ScenarioId::StrongBurn => (0.15, 0.10, 0.05, 0.200),
            ScenarioId::WeakBurn => (0.15, 0.10, 0.05, 0.050),
            ScenarioId::Optimistic => (0.20, 0.05, 0.02, 0.150),
            ScenarioId::Pessimistic => (0.10, 0.15, 0.10, 0.050),
        };
        ScenarioConfig::new(self.name(), alpha, beta, gamma, burn_multiplier)
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(ScenarioId::Baseline),
            "high_growth" | "highgrowth" => Ok(ScenarioId::HighGrowth),
            "low_growth" | "lowgrowth" => Ok(ScenarioId::LowGrowth),
            "high_stress" | "highstress" => Ok(ScenarioId::HighStress),
            "low_stress" | "lowstress" => Ok(ScenarioId::LowStress),
            "high_volatility" | "highvolatility" => Ok(ScenarioId::HighVolatility),
            "strong_burn" | "strongburn" => Ok(ScenarioId::StrongBurn),
            "weak_burn" | "weakburn" => Ok(ScenarioId::WeakBurn),
            "optimistic" => Ok(ScenarioId::Optimistic),
            "pessimistic" => Ok(ScenarioId::Pessimistic),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

/// One named parameter set run through the full horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario_name: String,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,

    /// Burn uplift used in place of the default +11.1%
    pub burn_multiplier: f64,
}

impl ScenarioConfig {
    pub fn new(
        scenario_name: impl Into<String>,
        alpha: f64,
        beta: f64,
        gamma: f64,
        burn_multiplier: f64,
    ) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            alpha,
            beta,
            gamma,
            burn_multiplier,
        }
    }

    /// Model coefficients for this scenario.
    pub fn params(&self) -> ModelParams {
        ModelParams {
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            burn_uplift: self.burn_multiplier,
        }
    }
}

/// Configurations of every built-in scenario in batch order.
pub fn builtin_configs() -> Vec<ScenarioConfig> {
    ScenarioId::all().iter().map(ScenarioId::config).collect()
}
