//! Route plan records shared by both planners.
//!
//! A planning run is a small state machine:
//! `READY -> evaluate -> COMMITTED MOVE -> ... -> TERMINAL`. Every committed
//! move is recorded as a [`Transition`] and applied to the working donkey
//! through [`Transition::apply`], the same function the replay uses. That
//! is what keeps a replayed plan in lockstep with the planner.

use std::collections::BTreeSet;

use burro_agents::{DeathCause, Donkey, DonkeyConfig, check_death};
use burro_types::{FoodLogEntry, ResearchLogEntry, StarLabel};
use burro_world::StarMap;
use serde::Deserialize;

use crate::error::PlanError;

/// Which planner produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Greedy walk that maximises the number of stars visited.
    Endurance,
    /// Score-driven walk over shortest paths with full star processing.
    Economical,
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Endurance => write!(f, "endurance"),
            Self::Economical => write!(f, "economical"),
        }
    }
}

/// How a planning run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No further move was possible (nothing reachable or nothing
    /// survivable).
    Exhausted,
    /// The donkey died after a committed transition.
    Died(DeathCause),
    /// Every star in the map has been visited.
    FullyVisited,
}

impl core::fmt::Display for Termination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Died(cause) => write!(f, "died ({cause})"),
            Self::FullyVisited => write!(f, "fully_visited"),
        }
    }
}

/// One committed change to the donkey.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Travel along one edge.
    Travel {
        /// Star the edge starts from.
        from: StarLabel,
        /// Star the edge arrives at.
        to: StarLabel,
        /// Distance charged for the edge.
        distance: f64,
    },
    /// Eat and research at a star.
    ProcessStar {
        /// Star being processed.
        star: StarLabel,
    },
}

impl Transition {
    /// Apply this transition to `donkey`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Graph`] if a processed star is not in `map`.
    pub fn apply(
        &self,
        donkey: &mut Donkey,
        map: &StarMap,
        config: &DonkeyConfig,
    ) -> Result<(), PlanError> {
        match self {
            Self::Travel { distance, .. } => donkey.travel(*distance, config),
            Self::ProcessStar { star } => donkey.process_star(map.require(star.as_str())?, config),
        }
        Ok(())
    }

    /// Star the donkey is at once this transition completes.
    pub const fn destination(&self) -> &StarLabel {
        match self {
            Self::Travel { to, .. } => to,
            Self::ProcessStar { star } => star,
        }
    }
}

/// Result of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// Planner that produced this plan.
    pub algorithm: Algorithm,
    /// Stars in first-visit order, starting with the start star.
    pub route: Vec<StarLabel>,
    /// Number of distinct stars visited (equals `route.len()`).
    pub visited_count: usize,
    /// Why planning stopped.
    pub termination: Termination,
    /// Every committed transition, in order.
    pub transitions: Vec<Transition>,
    /// The working donkey after the last transition.
    pub donkey: Donkey,
}

impl RoutePlan {
    /// Meals taken along the route.
    pub fn food_log(&self) -> &[FoodLogEntry] {
        self.donkey.food_log()
    }

    /// Research sessions along the route.
    pub fn research_log(&self) -> &[ResearchLogEntry] {
        self.donkey.research_log()
    }

    /// Total distance charged by the committed travel transitions.
    pub fn total_distance(&self) -> f64 {
        self.transitions
            .iter()
            .map(|t| match t {
                Transition::Travel { distance, .. } => *distance,
                Transition::ProcessStar { .. } => 0.0,
            })
            .sum()
    }
}

/// Working state of one planning run.
#[derive(Debug)]
pub(crate) struct Walk<'a> {
    map: &'a StarMap,
    config: &'a DonkeyConfig,
    donkey: Donkey,
    current: StarLabel,
    route: Vec<StarLabel>,
    visited: BTreeSet<StarLabel>,
    transitions: Vec<Transition>,
}

impl<'a> Walk<'a> {
    /// Start a walk at `start` with a private copy of `donkey`.
    pub(crate) fn start(
        map: &'a StarMap,
        config: &'a DonkeyConfig,
        start: &str,
        donkey: &Donkey,
    ) -> Result<Self, PlanError> {
        let start = map.require(start)?.label.clone();
        let mut visited = BTreeSet::new();
        visited.insert(start.clone());
        Ok(Self {
            map,
            config,
            donkey: donkey.clone(),
            current: start.clone(),
            route: vec![start],
            visited,
            transitions: Vec::new(),
        })
    }

    pub(crate) const fn map(&self) -> &'a StarMap {
        self.map
    }

    pub(crate) const fn config(&self) -> &'a DonkeyConfig {
        self.config
    }

    pub(crate) const fn donkey(&self) -> &Donkey {
        &self.donkey
    }

    pub(crate) const fn current(&self) -> &StarLabel {
        &self.current
    }

    pub(crate) fn is_visited(&self, label: &str) -> bool {
        self.visited.contains(label)
    }

    pub(crate) fn all_visited(&self) -> bool {
        self.visited.len() >= self.map.star_count()
    }

    /// Commit one edge and mark its far end visited. Returns the cause if
    /// the donkey died on the way.
    pub(crate) fn travel(
        &mut self,
        to: &StarLabel,
        distance: f64,
    ) -> Result<Option<DeathCause>, PlanError> {
        let transition = Transition::Travel {
            from: self.current.clone(),
            to: to.clone(),
            distance,
        };
        self.commit(transition)?;
        self.current = to.clone();
        if self.visited.insert(to.clone()) {
            self.route.push(to.clone());
        }
        Ok(check_death(&self.donkey))
    }

    /// Process the current star. Returns the cause if the donkey died.
    pub(crate) fn process_current(&mut self) -> Result<Option<DeathCause>, PlanError> {
        let transition = Transition::ProcessStar {
            star: self.current.clone(),
        };
        self.commit(transition)?;
        Ok(check_death(&self.donkey))
    }

    fn commit(&mut self, transition: Transition) -> Result<(), PlanError> {
        transition.apply(&mut self.donkey, self.map, self.config)?;
        self.transitions.push(transition);
        Ok(())
    }

    pub(crate) fn finish(self, algorithm: Algorithm, termination: Termination) -> RoutePlan {
        RoutePlan {
            algorithm,
            visited_count: self.route.len(),
            route: self.route,
            termination,
            transitions: self.transitions,
            donkey: self.donkey,
        }
    }
}
