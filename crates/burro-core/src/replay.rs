//! Step-wise replay of a planned route.
//!
//! [`RouteReplay`] drives a live donkey along a [`RoutePlan`] one tick at a
//! time. The sprite position moves a fixed number of board pixels per tick
//! toward the next star; on arrival the transitions committed for that leg
//! are re-applied to the live donkey, with a death check after each one.
//! Replaying a whole plan reproduces the planner's final donkey.

use std::collections::VecDeque;

use burro_agents::{DeathCause, Donkey, DonkeyConfig, check_death};
use burro_types::{Position, StarLabel};
use burro_world::StarMap;
use tracing::{debug, info};

use crate::error::PlanError;
use crate::plan::{RoutePlan, Transition};

/// Board pixels moved per tick when no valid speed is given.
pub const DEFAULT_SPEED_PX: f64 = 2.0;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// The sprite moved toward the next star.
    Moving {
        /// Sprite position after this tick.
        position: Position,
    },
    /// The sprite reached a star and its transitions were applied.
    Arrived {
        /// Star reached.
        star: StarLabel,
    },
    /// A transition at this star killed the donkey. The replay is over.
    Died {
        /// Star where the donkey died.
        star: StarLabel,
        /// Cause of death.
        cause: DeathCause,
    },
    /// Nothing left to replay.
    Finished,
}

/// Transitions to apply once the sprite reaches `target`.
#[derive(Debug, Clone)]
struct Leg {
    target: StarLabel,
    transitions: Vec<Transition>,
}

/// Tick-driven re-simulation of a plan on a live donkey.
#[derive(Debug)]
pub struct RouteReplay<'a> {
    map: &'a StarMap,
    config: &'a DonkeyConfig,
    donkey: Donkey,
    legs: VecDeque<Leg>,
    position: Position,
    speed: f64,
    finished: bool,
}

impl<'a> RouteReplay<'a> {
    /// Prepare a replay of `plan` for `donkey`, which should be the donkey
    /// the plan was computed from.
    ///
    /// A non-positive or non-finite `speed` falls back to
    /// [`DEFAULT_SPEED_PX`].
    pub fn new(
        map: &'a StarMap,
        config: &'a DonkeyConfig,
        donkey: Donkey,
        plan: &RoutePlan,
        speed: f64,
    ) -> Self {
        let start = plan.route.first();
        let position = start.map_or(Position::ORIGIN, |label| map.position(label.as_str()));
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_SPEED_PX
        };

        Self {
            map,
            config,
            donkey,
            legs: split_legs(start, &plan.transitions),
            position,
            speed,
            finished: false,
        }
    }

    /// The live donkey.
    pub const fn donkey(&self) -> &Donkey {
        &self.donkey
    }

    /// Current sprite position on the board.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// `true` once [`ReplayEvent::Finished`] or [`ReplayEvent::Died`] has
    /// been produced.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the replay by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Graph`] if a star of the plan is no longer in
    /// the map.
    pub fn tick(&mut self) -> Result<ReplayEvent, PlanError> {
        if self.finished {
            return Ok(ReplayEvent::Finished);
        }
        let Some(leg) = self.legs.front() else {
            self.finished = true;
            info!(
                life_budget = self.donkey.life_budget(),
                energy = self.donkey.energy(),
                "replay finished"
            );
            return Ok(ReplayEvent::Finished);
        };

        let target = self.map.position(leg.target.as_str());
        let remaining = self.position.distance_to(target);
        if remaining > self.speed {
            let step = self.speed / remaining;
            self.position = Position::new(
                (target.x - self.position.x).mul_add(step, self.position.x),
                (target.y - self.position.y).mul_add(step, self.position.y),
            );
            return Ok(ReplayEvent::Moving {
                position: self.position,
            });
        }

        self.position = target;
        let Some(leg) = self.legs.pop_front() else {
            return Ok(ReplayEvent::Finished);
        };
        for transition in &leg.transitions {
            transition.apply(&mut self.donkey, self.map, self.config)?;
            if let Some(cause) = check_death(&self.donkey) {
                self.finished = true;
                info!(star = %leg.target, %cause, "donkey died during replay");
                return Ok(ReplayEvent::Died {
                    star: leg.target,
                    cause,
                });
            }
        }
        debug!(star = %leg.target, energy = self.donkey.energy(), "replay arrived");
        Ok(ReplayEvent::Arrived { star: leg.target })
    }

    /// Tick until the replay ends, returning every non-movement event.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RouteReplay::tick`].
    pub fn run_to_end(&mut self) -> Result<Vec<ReplayEvent>, PlanError> {
        let mut events = Vec::new();
        loop {
            match self.tick()? {
                ReplayEvent::Moving { .. } => {}
                ReplayEvent::Finished => return Ok(events),
                event @ ReplayEvent::Died { .. } => {
                    events.push(event);
                    return Ok(events);
                }
                event @ ReplayEvent::Arrived { .. } => events.push(event),
            }
        }
    }
}

/// Group transitions by the star the sprite must reach before applying
/// them. Transitions before the first travel belong to the start star.
fn split_legs(start: Option<&StarLabel>, transitions: &[Transition]) -> VecDeque<Leg> {
    let mut legs: VecDeque<Leg> = VecDeque::new();
    if let Some(start) = start {
        legs.push_back(Leg {
            target: start.clone(),
            transitions: Vec::new(),
        });
    }
    for transition in transitions {
        let opens_leg = matches!(transition, Transition::Travel { .. }) || legs.is_empty();
        if opens_leg {
            legs.push_back(Leg {
                target: transition.destination().clone(),
                transitions: Vec::new(),
            });
        }
        if let Some(leg) = legs.back_mut() {
            leg.transitions.push(transition.clone());
        }
    }
    legs
}
