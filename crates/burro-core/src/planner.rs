//! Entry point for route planning.

use burro_agents::{Donkey, DonkeyConfig};
use burro_world::StarMap;

use crate::endurance::{self, EnduranceReachability};
use crate::economical;
use crate::error::PlanError;
use crate::plan::{Algorithm, RoutePlan, Walk};

/// Plans routes over a read-only view of a star map.
///
/// The caller's donkey is never mutated: every run works on its own copy.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    map: &'a StarMap,
    config: &'a DonkeyConfig,
    reachability: EnduranceReachability,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner with the default endurance reachability policy.
    pub const fn new(map: &'a StarMap, config: &'a DonkeyConfig) -> Self {
        Self {
            map,
            config,
            reachability: EnduranceReachability::DirectNeighbors,
        }
    }

    /// Select the endurance reachability policy.
    #[must_use]
    pub const fn with_reachability(mut self, reachability: EnduranceReachability) -> Self {
        self.reachability = reachability;
        self
    }

    /// Run `algorithm` from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Graph`] if `start` is not a star of the map.
    pub fn plan(
        &self,
        algorithm: Algorithm,
        start: &str,
        donkey: &Donkey,
    ) -> Result<RoutePlan, PlanError> {
        match algorithm {
            Algorithm::Endurance => self.endurance(start, donkey),
            Algorithm::Economical => self.economical(start, donkey),
        }
    }

    /// Route that visits as many distinct stars as possible.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Graph`] if `start` is not a star of the map.
    pub fn endurance(&self, start: &str, donkey: &Donkey) -> Result<RoutePlan, PlanError> {
        let walk = Walk::start(self.map, self.config, start, donkey)?;
        endurance::plan(walk, self.reachability)
    }

    /// Score-driven route with full star processing.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Graph`] if `start` is not a star of the map.
    pub fn economical(&self, start: &str, donkey: &Donkey) -> Result<RoutePlan, PlanError> {
        let walk = Walk::start(self.map, self.config, start, donkey)?;
        economical::plan(walk)
    }
}
