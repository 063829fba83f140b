//! Enumeration types for the Burro simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Health tiers
// ---------------------------------------------------------------------------

/// Ordered health tier of the donkey.
///
/// Each tier maps to an integer level from 0 ([`HealthTier::Dying`]) to 4
/// ([`HealthTier::Excellent`]). Tier arithmetic always clamps to that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    /// Level 0.
    #[serde(alias = "moribundo")]
    Dying,
    /// Level 1.
    #[serde(alias = "mala")]
    Poor,
    /// Level 2.
    Regular,
    /// Level 3.
    #[serde(alias = "buena")]
    Good,
    /// Level 4.
    #[serde(alias = "excelente")]
    Excellent,
}

impl HealthTier {
    /// Lowest valid level.
    pub const MIN_LEVEL: i32 = 0;

    /// Highest valid level.
    pub const MAX_LEVEL: i32 = 4;

    /// All tiers, best first.
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Regular,
        Self::Poor,
        Self::Dying,
    ];

    /// Integer level of this tier (4 for excellent down to 0 for dying).
    pub const fn level(self) -> i32 {
        match self {
            Self::Dying => 0,
            Self::Poor => 1,
            Self::Regular => 2,
            Self::Good => 3,
            Self::Excellent => 4,
        }
    }

    /// Tier for an integer level, clamped to `[MIN_LEVEL, MAX_LEVEL]`.
    pub const fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Self::Dying,
            1 => Self::Poor,
            2 => Self::Regular,
            3 => Self::Good,
            _ => Self::Excellent,
        }
    }

    /// Shift the tier by `delta` levels, clamping at both ends.
    pub const fn shifted(self, delta: i32) -> Self {
        Self::from_level(self.level().saturating_add(delta))
    }

    /// Parse a tier name, case-insensitively.
    ///
    /// Accepts English names and the Spanish names used by the mission
    /// data files (`excelente`, `buena`, `regular`, `mala`, `moribundo`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "excellent" | "excelente" => Some(Self::Excellent),
            "good" | "buena" => Some(Self::Good),
            "regular" => Some(Self::Regular),
            "poor" | "mala" => Some(Self::Poor),
            "dying" | "moribundo" => Some(Self::Dying),
            _ => None,
        }
    }

    /// Canonical lowercase English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Regular => "regular",
            Self::Poor => "poor",
            Self::Dying => "dying",
        }
    }
}

impl core::fmt::Display for HealthTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
