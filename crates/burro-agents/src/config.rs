//! Tunable constants for the donkey's resource rules.
//!
//! The [`DonkeyConfig`] struct bundles every rate and budget used by
//! [`Donkey::travel`](crate::Donkey::travel) and
//! [`Donkey::process_star`](crate::Donkey::process_star) so that callers
//! (planners, replay, tests) can override the defaults. It is read from the
//! `mechanics` section of the simulation YAML file.

use serde::Deserialize;

/// Configuration for travel, eating, research, and the initial life budget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DonkeyConfig {
    /// Energy percentage lost per unit of distance travelled (default: 0.1).
    pub travel_energy_rate: f64,

    /// Time units available for eating at each star (default: 10).
    pub eat_time_budget: f64,

    /// Time units available for research at each star (default: 10).
    pub research_time_budget: f64,

    /// Time units one research unit takes (default: 1).
    pub research_time_per_unit: f64,

    /// Eating only happens while energy is below this value (default: 50).
    pub eat_energy_threshold: f64,

    /// Upper bound of the energy percentage (default: 100).
    pub max_energy: f64,

    /// Age at which the life budget reaches zero (default: 100).
    ///
    /// The document's `deathAge` hint takes precedence when present.
    pub lifespan: u32,

    /// Life budget granted per remaining year of life (default: 10).
    pub distance_per_year: f64,

    /// Multiplicative life budget bonus per health tier level (default: 0.05).
    pub health_bonus_per_tier: f64,

    /// Amounts at or below this are not written to the logs (default: 0.01).
    pub log_epsilon: f64,
}

impl Default for DonkeyConfig {
    fn default() -> Self {
        Self {
            travel_energy_rate: 0.1,
            eat_time_budget: 10.0,
            research_time_budget: 10.0,
            research_time_per_unit: 1.0,
            eat_energy_threshold: 50.0,
            max_energy: 100.0,
            lifespan: 100,
            distance_per_year: 10.0,
            health_bonus_per_tier: 0.05,
            log_epsilon: 0.01,
        }
    }
}

impl DonkeyConfig {
    /// Research units that fit in the research time budget.
    pub fn planned_research_units(&self) -> f64 {
        if self.research_time_per_unit > 0.0 {
            (self.research_time_budget / self.research_time_per_unit).max(0.0)
        } else {
            0.0
        }
    }
}
