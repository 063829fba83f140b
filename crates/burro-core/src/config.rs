//! Configuration loading and typed config structures for the Burro
//! simulation.
//!
//! The configuration lives in a YAML file (`burro-config.yaml` by default).
//! Every section and every field is optional:
//!
//! ```yaml
//! donkey:
//!   health: excelente
//!   age: 12
//! route:
//!   start: Rigel
//!   algorithm: both
//!   endurance_reachability: direct_neighbors
//!   blocked:
//!     - [Rigel, Betelgeuse]
//! mechanics:
//!   travel_energy_rate: 0.1
//! replay:
//!   enabled: true
//!   speed_px_per_tick: 2.0
//! logging:
//!   level: info
//!   json: false
//! ```

use std::path::Path;

use burro_agents::DonkeyConfig;
use burro_types::DonkeyHints;
use serde::Deserialize;

use crate::endurance::EnduranceReachability;
use crate::plan::Algorithm;
use crate::replay::DEFAULT_SPEED_PX;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Starting attribute overrides for the donkey.
    #[serde(default)]
    pub donkey: DonkeyOverrides,

    /// Start star, algorithm selection, and blocked pairs.
    #[serde(default)]
    pub route: RouteConfig,

    /// Rates and budgets of the donkey's transitions.
    #[serde(default)]
    pub mechanics: DonkeyConfig,

    /// Step-wise replay settings.
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Donkey attributes that take precedence over the document's hints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DonkeyOverrides {
    /// Health tier name (English or Spanish).
    pub health: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Starting energy percentage.
    pub energy: Option<f64>,
    /// Starting food stock in kilograms.
    pub food: Option<f64>,
}

impl DonkeyOverrides {
    /// Merge these overrides on top of `hints`.
    pub fn apply_to(&self, hints: &DonkeyHints) -> DonkeyHints {
        DonkeyHints {
            energy: self.energy.or(hints.energy),
            health: self.health.clone().or_else(|| hints.health.clone()),
            food: self.food.or(hints.food),
            age: self.age.or(hints.age),
            death_age: hints.death_age,
        }
    }
}

/// Which planners to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmChoice {
    /// Only the endurance route.
    Endurance,
    /// Only the economical route.
    Economical,
    /// Endurance first, then economical.
    #[default]
    Both,
}

impl AlgorithmChoice {
    /// Algorithms to run, in order.
    pub const fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Endurance => &[Algorithm::Endurance],
            Self::Economical => &[Algorithm::Economical],
            Self::Both => &[Algorithm::Endurance, Algorithm::Economical],
        }
    }
}

/// Route planning settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Start star label. Defaults to the first star of the first
    /// constellation.
    pub start: Option<String>,

    /// Planners to run.
    pub algorithm: AlgorithmChoice,

    /// Reachability policy of the endurance planner.
    pub endurance_reachability: EnduranceReachability,

    /// Star pairs to block before planning.
    pub blocked: Vec<[String; 2]>,
}

/// Replay configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Whether to replay each plan after computing it.
    pub enabled: bool,

    /// Board pixels the sprite moves per tick.
    pub speed_px_per_tick: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed_px_per_tick: DEFAULT_SPEED_PX,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            json: false,
        }
    }
}
