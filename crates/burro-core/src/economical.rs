//! Economical route: score-driven walk over shortest paths.
//!
//! The start star is processed once. Then, at every step, each unvisited
//! star reachable from the current one is evaluated on a clone of the
//! working donkey: travel every edge of its shortest path, then process the
//! destination. A candidate is dropped as soon as the clone dies. The
//! survivors are scored with
//!
//! ```text
//! score = 0.6 * life_budget + 0.4 * energy - 0.2 * path_distance
//! ```
//!
//! and the best one (first in label order on ties) is committed onto the
//! working donkey. Transit stars on the committed path join the route but
//! are not processed.

use burro_agents::{Donkey, DonkeyConfig, check_death};
use burro_types::StarLabel;
use burro_world::{PathLeg, StarMap};
use tracing::{debug, info};

use crate::error::PlanError;
use crate::plan::{Algorithm, RoutePlan, Termination, Walk};

/// Weight of the remaining life budget in a candidate's score.
pub const LIFE_WEIGHT: f64 = 0.6;

/// Weight of the remaining energy in a candidate's score.
pub const ENERGY_WEIGHT: f64 = 0.4;

/// Penalty per unit of path distance in a candidate's score.
pub const DISTANCE_WEIGHT: f64 = 0.2;

/// A surviving candidate destination.
#[derive(Debug)]
struct Candidate {
    target: StarLabel,
    legs: Vec<PathLeg>,
    score: f64,
}

/// Run the economical walk from the walk's start star.
pub(crate) fn plan(mut walk: Walk<'_>) -> Result<RoutePlan, PlanError> {
    let termination = 'run: {
        if let Some(cause) = check_death(walk.donkey()) {
            break 'run Termination::Died(cause);
        }
        if let Some(cause) = walk.process_current()? {
            break 'run Termination::Died(cause);
        }

        loop {
            if walk.all_visited() {
                break 'run Termination::FullyVisited;
            }

            let Some(best) = best_candidate(&walk)? else {
                break 'run Termination::Exhausted;
            };
            debug!(
                from = %walk.current(),
                to = %best.target,
                score = best.score,
                hops = best.legs.len(),
                "economical choice"
            );

            for leg in &best.legs {
                if let Some(cause) = walk.travel(&leg.to, leg.distance)? {
                    break 'run Termination::Died(cause);
                }
            }
            if let Some(cause) = walk.process_current()? {
                break 'run Termination::Died(cause);
            }
        }
    };

    let plan = walk.finish(Algorithm::Economical, termination);
    info!(
        visited = plan.visited_count,
        termination = %plan.termination,
        life_budget = plan.donkey.life_budget(),
        energy = plan.donkey.energy(),
        "economical route planned"
    );
    Ok(plan)
}

/// Highest scoring surviving candidate, or `None` when nothing unvisited is
/// reachable or nothing reachable is survivable.
fn best_candidate(walk: &Walk<'_>) -> Result<Option<Candidate>, PlanError> {
    let paths = walk.map().shortest_paths_from(walk.current().as_str())?;
    let mut best: Option<Candidate> = None;

    for (target, cost) in paths.reachable() {
        if walk.is_visited(target.as_str()) {
            continue;
        }
        let Some(legs) = paths.legs_to(target.as_str()) else {
            continue;
        };
        let Some(score) = simulate(walk.map(), walk.config(), walk.donkey(), target, &legs, cost)?
        else {
            debug!(to = %target, "economical candidate does not survive");
            continue;
        };
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(Candidate {
                target: target.clone(),
                legs,
                score,
            });
        }
    }
    Ok(best)
}

/// Score of arriving at `target` along `legs`, or `None` if the donkey
/// would die on the way or while processing the destination.
fn simulate(
    map: &StarMap,
    config: &DonkeyConfig,
    donkey: &Donkey,
    target: &StarLabel,
    legs: &[PathLeg],
    path_distance: f64,
) -> Result<Option<f64>, PlanError> {
    let mut trial = donkey.clone();
    for leg in legs {
        trial.travel(leg.distance, config);
        if !trial.is_alive() {
            return Ok(None);
        }
    }
    trial.process_star(map.require(target.as_str())?, config);
    if !trial.is_alive() {
        return Ok(None);
    }
    Ok(Some(score(&trial, path_distance)))
}

/// Score of a simulated arrival.
pub fn score(donkey: &Donkey, path_distance: f64) -> f64 {
    LIFE_WEIGHT.mul_add(
        donkey.life_budget(),
        ENERGY_WEIGHT.mul_add(donkey.energy(), -DISTANCE_WEIGHT * path_distance),
    )
}
