//! Single-source shortest paths over the unblocked star graph.
//!
//! Dijkstra's algorithm with a `BTreeSet<(Cost, StarLabel)>` as the priority
//! queue, so ties between equally distant stars settle in label order and
//! results are reproducible. Weights come from
//! [`StarMap::traversal_cost`]: the stored distance, or the board-pixel
//! fallback for invalid weights, which keeps the graph connected for
//! simulation purposes. Blocked pairs are never relaxed.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use burro_types::StarLabel;

use crate::error::GraphError;
use crate::star_map::StarMap;

/// One edge of a reconstructed path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLeg {
    /// Star the leg starts from.
    pub from: StarLabel,
    /// Star the leg arrives at.
    pub to: StarLabel,
    /// Weight of the edge as used by the search.
    pub distance: f64,
}

/// Totally ordered non-negative path cost.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Shortest-path tree rooted at one star.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: StarLabel,
    /// Best known distance per reached star (source included, at 0).
    dist: BTreeMap<StarLabel, f64>,
    /// Predecessor and edge weight per reached star (source excluded).
    prev: BTreeMap<StarLabel, (StarLabel, f64)>,
}

impl ShortestPaths {
    /// Total cost to reach `target`, or `None` if it is unreachable.
    pub fn cost_to(&self, target: &str) -> Option<f64> {
        self.dist.get(target).copied()
    }

    /// Every reachable star other than the source with its cost, in label
    /// order.
    pub fn reachable(&self) -> impl Iterator<Item = (&StarLabel, f64)> {
        self.dist
            .iter()
            .filter(|(label, _)| **label != self.source)
            .map(|(label, cost)| (label, *cost))
    }

    /// Edges from the source to `target`, in travel order.
    ///
    /// Empty for the source itself, `None` if `target` is unreachable.
    pub fn legs_to(&self, target: &str) -> Option<Vec<PathLeg>> {
        if !self.dist.contains_key(target) {
            return None;
        }
        let mut legs = VecDeque::new();
        let mut current = StarLabel::from(target);
        // Each star has at most one predecessor, so a path has fewer legs
        // than there are reached stars.
        for _ in 0..self.dist.len() {
            let Some((predecessor, distance)) = self.prev.get(&current) else {
                break;
            };
            legs.push_front(PathLeg {
                from: predecessor.clone(),
                to: current.clone(),
                distance: *distance,
            });
            current = predecessor.clone();
            if current == self.source {
                break;
            }
        }
        Some(legs.into_iter().collect())
    }
}

impl StarMap {
    /// Compute shortest paths from `source` to every reachable star.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if `source` is absent.
    pub fn shortest_paths_from(&self, source: &str) -> Result<ShortestPaths, GraphError> {
        let source = self.require(source)?.label.clone();

        let mut dist: BTreeMap<StarLabel, f64> = BTreeMap::new();
        let mut prev: BTreeMap<StarLabel, (StarLabel, f64)> = BTreeMap::new();
        let mut settled: BTreeSet<StarLabel> = BTreeSet::new();
        let mut queue: BTreeSet<(Cost, StarLabel)> = BTreeSet::new();

        dist.insert(source.clone(), 0.0);
        queue.insert((Cost(0.0), source.clone()));

        while let Some((Cost(current_dist), current)) = queue.pop_first() {
            if !settled.insert(current.clone()) {
                continue;
            }

            for (neighbor, connection) in self.open_connections(current.as_str()) {
                if settled.contains(neighbor) {
                    continue;
                }
                let weight = self.traversal_cost(connection);
                let candidate = current_dist + weight;

                let is_shorter = dist
                    .get(neighbor)
                    .is_none_or(|&existing| candidate < existing);

                if is_shorter {
                    // Remove old entry from queue if present.
                    if let Some(&old) = dist.get(neighbor) {
                        queue.remove(&(Cost(old), neighbor.clone()));
                    }
                    dist.insert(neighbor.clone(), candidate);
                    prev.insert(neighbor.clone(), (current.clone(), weight));
                    queue.insert((Cost(candidate), neighbor.clone()));
                }
            }
        }

        Ok(ShortestPaths { source, dist, prev })
    }
}
