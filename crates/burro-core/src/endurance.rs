//! Endurance route: visit as many distinct stars as the life budget allows.
//!
//! The default policy ([`EnduranceReachability::DirectNeighbors`]) is a
//! greedy nearest-neighbour walk:
//!
//! 1. Collect the unblocked, unvisited neighbours of the current star.
//! 2. Stable-sort them by distance (ties keep document order).
//! 3. Take the first one whose distance is strictly below the remaining
//!    life budget. A tie would kill the donkey and is skipped.
//! 4. Travel there and repeat.
//!
//! Stars are never processed on this route. Only travel is committed.
//!
//! The opt-in [`EnduranceReachability::ShortestPath`] policy picks the
//! globally closest unvisited star instead, walking the shortest path to
//! it. Every edge of that path must still be strictly cheaper than the life
//! budget left at that point, and the transit stars count as visited.

use burro_agents::{DeathCause, Donkey, check_death};
use burro_types::StarLabel;
use burro_world::PathLeg;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PlanError;
use crate::plan::{Algorithm, RoutePlan, Termination, Walk};

/// Which stars count as reachable from the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnduranceReachability {
    /// Only stars joined to the current one by an unblocked edge.
    #[default]
    DirectNeighbors,
    /// Any star reachable through unblocked edges, via its shortest path.
    ShortestPath,
}

/// Run the endurance walk from the walk's start star.
pub(crate) fn plan(
    mut walk: Walk<'_>,
    reachability: EnduranceReachability,
) -> Result<RoutePlan, PlanError> {
    if let Some(cause) = check_death(walk.donkey()) {
        return Ok(walk.finish(Algorithm::Endurance, Termination::Died(cause)));
    }

    let termination = loop {
        if walk.all_visited() {
            break Termination::FullyVisited;
        }

        let step = match reachability {
            EnduranceReachability::DirectNeighbors => nearest_neighbor(&walk)?
                .map(|(to, distance)| {
                    vec![PathLeg {
                        from: walk.current().clone(),
                        to,
                        distance,
                    }]
                }),
            EnduranceReachability::ShortestPath => nearest_reachable(&walk)?,
        };

        let Some(legs) = step else {
            break Termination::Exhausted;
        };

        if let Some(cause) = commit(&mut walk, &legs)? {
            break Termination::Died(cause);
        }
    };

    let plan = walk.finish(Algorithm::Endurance, termination);
    info!(
        visited = plan.visited_count,
        termination = %plan.termination,
        life_budget = plan.donkey.life_budget(),
        "endurance route planned"
    );
    Ok(plan)
}

/// First unvisited neighbour, by ascending distance, that the donkey
/// survives reaching.
fn nearest_neighbor(walk: &Walk<'_>) -> Result<Option<(StarLabel, f64)>, PlanError> {
    let mut candidates: Vec<(StarLabel, f64)> = walk
        .map()
        .neighbors(walk.current().as_str())?
        .into_iter()
        .filter(|(label, _)| !walk.is_visited(label.as_str()))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    let life = walk.donkey().life_budget();
    let choice = candidates.into_iter().find(|(_, distance)| *distance < life);
    debug!(
        from = %walk.current(),
        to = choice.as_ref().map(|(label, _)| label.as_str()),
        life_budget = life,
        "endurance neighbor choice"
    );
    Ok(choice)
}

/// Shortest path to the closest unvisited star the donkey survives
/// reaching. Ties between equal costs go to the lower label.
fn nearest_reachable(walk: &Walk<'_>) -> Result<Option<Vec<PathLeg>>, PlanError> {
    let paths = walk.map().shortest_paths_from(walk.current().as_str())?;

    let mut candidates: Vec<(&StarLabel, f64)> = paths
        .reachable()
        .filter(|(label, _)| !walk.is_visited(label.as_str()))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (target, cost) in candidates {
        let Some(legs) = paths.legs_to(target.as_str()) else {
            continue;
        };
        if survives_every_leg(walk.donkey(), &legs) {
            debug!(from = %walk.current(), to = %target, cost, "endurance path choice");
            return Ok(Some(legs));
        }
    }
    Ok(None)
}

/// Strict per-edge survival check on the cumulative cost.
fn survives_every_leg(donkey: &Donkey, legs: &[PathLeg]) -> bool {
    let mut remaining = donkey.life_budget();
    for leg in legs {
        if leg.distance >= remaining {
            return false;
        }
        remaining -= leg.distance;
    }
    true
}

fn commit(walk: &mut Walk<'_>, legs: &[PathLeg]) -> Result<Option<DeathCause>, PlanError> {
    for leg in legs {
        if let Some(cause) = walk.travel(&leg.to, leg.distance)? {
            return Ok(Some(cause));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use burro_agents::DonkeyConfig;
    use burro_types::HealthTier;
    use burro_world::StarMap;
    use serde_json::json;

    use super::*;

    fn chain() -> StarMap {
        StarMap::from_json(
            &json!({"constellations": [{"name": "C", "stars": [
                {"id": 1, "label": "A", "linkedTo": [{"starId": 2, "distance": 10}]},
                {"id": 2, "label": "B", "linkedTo": [{"starId": 3, "distance": 10}]},
                {"id": 3, "label": "C"}
            ]}]})
            .to_string(),
        )
        .unwrap()
    }

    fn donkey(life: f64) -> Donkey {
        Donkey::new(HealthTier::Good, 10, 100.0, 0.0, &DonkeyConfig::default())
            .unwrap()
            .with_life_budget(life)
    }

    fn run(map: &StarMap, start: &str, life: f64, reach: EnduranceReachability) -> Option<RoutePlan> {
        let config = DonkeyConfig::default();
        Walk::start(map, &config, start, &donkey(life))
            .and_then(|walk| plan(walk, reach))
            .ok()
    }

    fn labels(plan: Option<&RoutePlan>) -> Vec<&str> {
        plan.map(|p| p.route.iter().map(StarLabel::as_str).collect())
            .unwrap()
    }

    #[test]
    fn picks_closest_neighbor_first() {
        let map = StarMap::from_json(
            &json!({"constellations": [{"name": "S", "stars": [
                {"id": 1, "label": "Hub", "linkedTo": [
                    {"starId": 2, "distance": 30},
                    {"starId": 3, "distance": 5},
                    {"starId": 4, "distance": 30}
                ]},
                {"id": 2, "label": "Far1"},
                {"id": 3, "label": "Near"},
                {"id": 4, "label": "Far2"}
            ]}]})
            .to_string(),
        )
        .unwrap();
        let plan = run(&map, "Hub", 1000.0, EnduranceReachability::DirectNeighbors);
        // Near is a dead end, so the walk stops there.
        assert_eq!(labels(plan.as_ref()), vec!["Hub", "Near"]);
        assert_eq!(plan.map(|p| p.termination), Some(Termination::Exhausted));
    }

    #[test]
    fn distance_equal_to_life_budget_is_not_taken() {
        let plan = run(&chain(), "A", 10.0, EnduranceReachability::DirectNeighbors);
        assert_eq!(labels(plan.as_ref()), vec!["A"]);
    }

    #[test]
    fn never_processes_stars() {
        let plan = run(&chain(), "A", 100.0, EnduranceReachability::DirectNeighbors);
        assert!(plan.is_some_and(|p| p
            .transitions
            .iter()
            .all(|t| matches!(t, crate::plan::Transition::Travel { .. }))));
    }

    #[test]
    fn full_visit_is_reported() {
        let plan = run(&chain(), "B", 100.0, EnduranceReachability::DirectNeighbors);
        // From B both neighbours are at 10; document order puts A first,
        // and A is a dead end.
        assert_eq!(labels(plan.as_ref()), vec!["B", "A"]);

        let plan = run(&chain(), "A", 100.0, EnduranceReachability::DirectNeighbors);
        assert_eq!(plan.map(|p| p.termination), Some(Termination::FullyVisited));
    }

    #[test]
    fn shortest_path_policy_reaches_past_visited_stars() {
        // Direct policy gets stuck at A after B -> A; shortest path policy
        // walks back through B to C.
        let plan = run(&chain(), "B", 100.0, EnduranceReachability::ShortestPath);
        assert_eq!(labels(plan.as_ref()), vec!["B", "A", "C"]);
        assert!(plan.is_some_and(|p| (p.total_distance() - 30.0).abs() < 1e-9));
    }

    #[test]
    fn shortest_path_policy_checks_every_edge() {
        // From A, C costs 20 in total; a life budget of 15 only reaches B.
        let plan = run(&chain(), "A", 15.0, EnduranceReachability::ShortestPath);
        assert_eq!(labels(plan.as_ref()), vec!["A", "B"]);
    }

    #[test]
    fn exhausted_donkey_never_leaves_the_start() {
        let map = chain();
        let config = DonkeyConfig::default();
        let tired = Donkey::new(HealthTier::Good, 10, 0.0, 0.0, &config).unwrap();
        let plan = Walk::start(&map, &config, "A", &tired)
            .and_then(|walk| plan(walk, EnduranceReachability::DirectNeighbors))
            .unwrap();
        assert_eq!(labels(Some(&plan)), vec!["A"]);
        assert!(plan.transitions.is_empty());
        assert_eq!(plan.termination, Termination::Died(DeathCause::EnergyDepleted));
    }

    #[test]
    fn energy_depletion_ends_the_walk() {
        let map = chain();
        let config = DonkeyConfig {
            travel_energy_rate: 10.0,
            ..DonkeyConfig::default()
        };
        let plan = Walk::start(&map, &config, "A", &donkey(1000.0))
            .and_then(|walk| plan(walk, EnduranceReachability::DirectNeighbors))
            .ok();
        assert_eq!(labels(plan.as_ref()), vec!["A", "B"]);
        assert_eq!(
            plan.map(|p| p.termination),
            Some(Termination::Died(DeathCause::EnergyDepleted))
        );
    }
}
