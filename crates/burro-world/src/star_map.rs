//! Star graph: stars as nodes, undirected weighted connections as edges.
//!
//! The [`StarMap`] is the spatial backbone of the simulation. It stores all
//! [`Star`] nodes, canonicalised [`Connection`] edges, constellation
//! groupings, and the set of currently blocked pairs.
//!
//! Internally, an adjacency map indexes the incident edges of each star in
//! document order: `BTreeMap<StarLabel, Vec<StarPair>>`. Every traversal
//! (neighbor queries, distances, shortest paths) goes through
//! [`StarMap::open_connections`], which is the one place blocked pairs are
//! filtered out.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use burro_types::{
    Connection, Constellation, DonkeyHints, Position, Star, StarId, StarLabel, StarPair,
};
use tracing::{debug, info, warn};

use crate::document::StarDocument;
use crate::error::GraphError;
use crate::layout::BoardLayout;
use crate::palette;

/// Divisor applied to the board-pixel distance of an edge whose stored
/// distance is invalid, to get its traversal weight.
pub const FALLBACK_PIXEL_SCALE: f64 = 4.0;

/// The star graph holding all stars, connections, and blocked pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarMap {
    /// All stars indexed by label.
    stars: BTreeMap<StarLabel, Star>,
    /// Constellations in document order.
    constellations: Vec<Constellation>,
    /// All connections indexed by their canonical pair.
    connections: BTreeMap<StarPair, Connection>,
    /// Incident edges per star, in document order.
    adjacency: BTreeMap<StarLabel, Vec<StarPair>>,
    /// Pairs currently closed to travel.
    blocked: BTreeSet<StarPair>,
    /// Donkey configuration suggested by the loaded document.
    hints: DonkeyHints,
    /// Projection used for board positions.
    layout: BoardLayout,
}

impl StarMap {
    /// Create an empty star map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document into a fresh star map.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DataFormat`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let mut map = Self::new();
        map.load_json(json)?;
        Ok(map)
    }

    // -------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------

    /// Drop every star, connection, constellation, block, and hint.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read and load a JSON document from disk.
    ///
    /// Prior state is discarded first; on error the map is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be read, or
    /// [`GraphError::DataFormat`] if its content is malformed.
    pub fn load_path(&mut self, path: &Path) -> Result<(), GraphError> {
        self.reset();
        let contents = std::fs::read_to_string(path)?;
        self.load_json(&contents)
    }

    /// Parse and load a JSON document.
    ///
    /// Prior state is discarded first; on error the map is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DataFormat`] on malformed input.
    pub fn load_json(&mut self, json: &str) -> Result<(), GraphError> {
        self.reset();
        let document = StarDocument::from_json(json)?;
        self.load(&document)
    }

    /// Replace the whole graph with the content of `document`.
    ///
    /// Stars without a label are skipped. A label listed again under
    /// another constellation adds that membership to the existing star.
    /// Links to unknown identifiers and self links are ignored. When the
    /// same pair is linked twice, the first distance wins.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DataFormat`] if a star carries an invalid
    /// numeric attribute. The map is left empty in that case.
    pub fn load(&mut self, document: &StarDocument) -> Result<(), GraphError> {
        self.reset();
        if let Err(err) = self.build(document) {
            self.reset();
            return Err(err);
        }
        info!(
            stars = self.stars.len(),
            connections = self.connections.len(),
            constellations = self.constellations.len(),
            "Constellation data loaded"
        );
        Ok(())
    }

    fn build(&mut self, document: &StarDocument) -> Result<(), GraphError> {
        // Resolve identifier -> label before any edge is built.
        let mut id_to_label: BTreeMap<&StarId, &str> = BTreeMap::new();
        for record in document.constellations.iter().flat_map(|c| &c.stars) {
            if let (Some(id), Some(label)) = (&record.id, record.label.as_deref())
                && !label.is_empty()
            {
                id_to_label.insert(id, label);
            }
        }

        let raw: Vec<Position> = document
            .constellations
            .iter()
            .flat_map(|c| &c.stars)
            .map(|s| Position::new(s.coordinates.x, s.coordinates.y))
            .collect();
        self.layout = BoardLayout::fit(&raw);

        for group in &document.constellations {
            let mut members = Vec::new();
            for record in &group.stars {
                let Some(label) = record.label.as_deref().filter(|l| !l.is_empty()) else {
                    warn!(constellation = group.name, id = ?record.id, "Skipping star without a label");
                    continue;
                };
                record.validate(label)?;

                if let Some(existing) = self.stars.get_mut(label) {
                    if !existing.constellations.contains(&group.name) {
                        existing.constellations.push(group.name.clone());
                    }
                } else {
                    let mut star = record.to_star(label, &group.name);
                    star.position = self.layout.project(star.raw_position);
                    self.adjacency.entry(star.label.clone()).or_default();
                    self.stars.insert(star.label.clone(), star);
                }

                let member = StarLabel::from(label);
                if !members.contains(&member) {
                    members.push(member);
                }
            }
            self.constellations.push(Constellation {
                name: group.name.clone(),
                stars: members,
                color: palette::constellation_color(&group.name),
            });
        }

        self.mark_overlaps();

        for record in document.constellations.iter().flat_map(|c| &c.stars) {
            let Some(label) = record.label.as_deref().filter(|l| !l.is_empty()) else {
                continue;
            };
            for link in &record.linked_to {
                let target = link.star_id.as_ref().and_then(|id| id_to_label.get(id));
                let Some(&target) = target else {
                    debug!(star = label, target = ?link.star_id, "Ignoring link to unknown star id");
                    continue;
                };
                if target == label {
                    debug!(star = label, "Ignoring self link");
                    continue;
                }
                self.insert_connection(Connection::new(
                    StarLabel::from(label),
                    StarLabel::from(target),
                    link.parsed_distance(),
                ));
            }
        }

        self.hints = document.hints();
        Ok(())
    }

    fn insert_connection(&mut self, connection: Connection) {
        if let Some(existing) = self.connections.get(&connection.pair) {
            if existing.distance != connection.distance {
                debug!(
                    pair = %connection.pair,
                    kept = ?existing.distance,
                    ignored = ?connection.distance,
                    "Duplicate link with a different distance"
                );
            }
            return;
        }
        let pair = connection.pair.clone();
        self.adjacency
            .entry(pair.low().clone())
            .or_default()
            .push(pair.clone());
        self.adjacency
            .entry(pair.high().clone())
            .or_default()
            .push(pair.clone());
        self.connections.insert(pair, connection);
    }

    /// Flag stars sharing a raw coordinate or listed in several
    /// constellations.
    fn mark_overlaps(&mut self) {
        let mut by_coordinate: BTreeMap<String, Vec<StarLabel>> = BTreeMap::new();
        for star in self.stars.values() {
            let key = format!("{:.6},{:.6}", star.raw_position.x, star.raw_position.y);
            by_coordinate.entry(key).or_default().push(star.label.clone());
        }
        for labels in by_coordinate.values().filter(|l| l.len() > 1) {
            for label in labels {
                if let Some(star) = self.stars.get_mut(label) {
                    star.overlap = true;
                }
            }
        }
        for star in self.stars.values_mut() {
            if star.constellations.len() > 1 {
                star.overlap = true;
            }
        }
    }

    // -------------------------------------------------------------------
    // Star and constellation access
    // -------------------------------------------------------------------

    /// Get a star by label.
    pub fn star(&self, label: &str) -> Option<&Star> {
        self.stars.get(label)
    }

    /// Get a star by label, failing for unknown labels.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if the label is absent.
    pub fn require(&self, label: &str) -> Result<&Star, GraphError> {
        self.stars
            .get(label)
            .ok_or_else(|| GraphError::UnknownStar(StarLabel::from(label)))
    }

    /// Whether a star with this label exists.
    pub fn contains(&self, label: &str) -> bool {
        self.stars.contains_key(label)
    }

    /// Number of stars.
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Iterate over all stars in label order.
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.stars.values()
    }

    /// Constellations in document order.
    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// The first star of the first non-empty constellation.
    pub fn default_start(&self) -> Option<&StarLabel> {
        self.constellations.iter().find_map(|c| c.stars.first())
    }

    /// Donkey configuration suggested by the loaded document.
    pub const fn hints(&self) -> &DonkeyHints {
        &self.hints
    }

    /// Board position of a star, or the origin for unknown labels.
    pub fn position(&self, label: &str) -> Position {
        self.stars
            .get(label)
            .map_or(Position::ORIGIN, |s| s.position)
    }

    // -------------------------------------------------------------------
    // Connections
    // -------------------------------------------------------------------

    /// Number of connections, blocked or not.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Iterate over all connections in canonical pair order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Unblocked connections incident to `label`, in document order,
    /// paired with the opposite endpoint.
    ///
    /// This is the only traversal primitive: every query that walks the
    /// graph goes through here, so a blocked pair is invisible to all of
    /// them. Unknown labels yield nothing.
    pub fn open_connections<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = (&'a StarLabel, &'a Connection)> + 'a {
        self.adjacency
            .get(label)
            .into_iter()
            .flatten()
            .filter(move |pair| !self.blocked.contains(*pair))
            .filter_map(move |pair| {
                let neighbor = pair.other(label)?;
                let connection = self.connections.get(pair)?;
                Some((neighbor, connection))
            })
    }

    /// Unblocked neighbors of `label` with their distances, in document
    /// order. Invalid weights are reported as `+inf`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if the label is absent.
    pub fn neighbors(&self, label: &str) -> Result<Vec<(StarLabel, f64)>, GraphError> {
        self.require(label)?;
        Ok(self
            .open_connections(label)
            .map(|(neighbor, c)| (neighbor.clone(), c.distance_or_infinity()))
            .collect())
    }

    /// Direct distance between two stars.
    ///
    /// Returns 0 for a star and itself, the edge distance when an unblocked
    /// edge with a valid weight exists, and `+inf` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if either label is absent.
    pub fn distance(&self, a: &str, b: &str) -> Result<f64, GraphError> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Ok(0.0);
        }
        Ok(self
            .open_connections(a)
            .find(|(neighbor, _)| neighbor.as_str() == b)
            .map_or(f64::INFINITY, |(_, c)| c.distance_or_infinity()))
    }

    /// Weight used by shortest-path search: the stored distance, or for an
    /// invalid weight the board-pixel distance between the endpoints
    /// divided by [`FALLBACK_PIXEL_SCALE`].
    pub fn traversal_cost(&self, connection: &Connection) -> f64 {
        connection.distance.unwrap_or_else(|| {
            let a = self.position(connection.pair.low().as_str());
            let b = self.position(connection.pair.high().as_str());
            a.distance_to(b) / FALLBACK_PIXEL_SCALE
        })
    }

    // -------------------------------------------------------------------
    // Blocking
    // -------------------------------------------------------------------

    /// Close the pair `(a, b)` to travel. Idempotent.
    ///
    /// Returns `true` if the pair was not blocked before.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if either label is absent, or
    /// [`GraphError::SelfPair`] if `a == b`.
    pub fn block(&mut self, a: &str, b: &str) -> Result<bool, GraphError> {
        let pair = self.checked_pair(a, b)?;
        let inserted = self.blocked.insert(pair);
        debug!(a, b, changed = inserted, "Pair blocked");
        Ok(inserted)
    }

    /// Reopen the pair `(a, b)`. Idempotent.
    ///
    /// Returns `true` if the pair was blocked before.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownStar`] if either label is absent, or
    /// [`GraphError::SelfPair`] if `a == b`.
    pub fn unblock(&mut self, a: &str, b: &str) -> Result<bool, GraphError> {
        let pair = self.checked_pair(a, b)?;
        let removed = self.blocked.remove(&pair);
        debug!(a, b, changed = removed, "Pair unblocked");
        Ok(removed)
    }

    /// Whether the pair `(a, b)` is currently blocked.
    pub fn is_blocked(&self, a: &str, b: &str) -> bool {
        self.blocked
            .contains(&StarPair::new(StarLabel::from(a), StarLabel::from(b)))
    }

    /// Iterate over the blocked pairs.
    pub fn blocked_pairs(&self) -> impl Iterator<Item = &StarPair> {
        self.blocked.iter()
    }

    fn checked_pair(&self, a: &str, b: &str) -> Result<StarPair, GraphError> {
        let a = self.require(a)?.label.clone();
        let b = self.require(b)?.label.clone();
        if a == b {
            return Err(GraphError::SelfPair(a));
        }
        Ok(StarPair::new(a, b))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    /// A - B - C chain (10 each) plus a D hanging off A (4), all in one
    /// constellation, and E in a second constellation linked to C.
    fn sample_json() -> String {
        json!({
            "constellations": [
                {
                    "name": "Orion",
                    "starts": [
                        {"id": 1, "label": "A", "coordenates": {"x": 0, "y": 0},
                         "linkedTo": [{"starId": 2, "distance": 10}, {"starId": 4, "distance": 4}]},
                        {"id": 2, "label": "B", "coordenates": {"x": 100, "y": 0},
                         "linkedTo": [{"starId": 1, "distance": 10}, {"starId": 3, "distance": 10}]},
                        {"id": 3, "label": "C", "coordenates": {"x": 200, "y": 0}},
                        {"id": 4, "label": "D", "coordenates": {"x": 0, "y": 100}}
                    ]
                },
                {
                    "name": "Lyra",
                    "starts": [
                        {"id": 5, "label": "E", "coordenates": {"x": 300, "y": 300},
                         "linkedTo": [{"starId": 3, "distance": "7"}]}
                    ]
                }
            ],
            "estadoSalud": "buena",
            "startAge": 5
        })
        .to_string()
    }

    fn sample_map() -> StarMap {
        StarMap::from_json(&sample_json()).unwrap()
    }

    fn neighbor_labels(map: &StarMap, label: &str) -> Vec<String> {
        map.neighbors(label)
            .unwrap()
            .into_iter()
            .map(|(l, _)| l.into_inner())
            .collect()
    }

    #[test]
    fn load_builds_stars_edges_and_constellations() {
        let map = sample_map();
        assert_eq!(map.star_count(), 5);
        assert_eq!(map.connection_count(), 4); // A-B listed twice, stored once
        assert_eq!(map.constellations().len(), 2);
        assert_eq!(map.default_start().map(StarLabel::as_str), Some("A"));
        assert_eq!(map.hints().age, Some(5));
    }

    #[test]
    fn neighbors_follow_document_order() {
        let map = sample_map();
        assert_eq!(neighbor_labels(&map, "A"), vec!["B", "D"]);
        assert_eq!(neighbor_labels(&map, "C"), vec!["B", "E"]);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let map = sample_map();
        for star in map.stars() {
            let label = star.label.as_str();
            assert_eq!(map.distance(label, label).ok(), Some(0.0));
            for other in map.stars() {
                let d1 = map.distance(label, other.label.as_str()).unwrap_or(f64::NAN);
                let d2 = map.distance(other.label.as_str(), label).unwrap_or(f64::NAN);
                assert!(d1 == d2 || (d1.is_infinite() && d2.is_infinite()));
            }
        }
        assert_eq!(map.distance("C", "E").ok(), Some(7.0));
        assert!(map.distance("A", "C").is_ok_and(f64::is_infinite));
    }

    #[test]
    fn unknown_labels_are_errors() {
        let map = sample_map();
        assert!(matches!(map.neighbors("Z"), Err(GraphError::UnknownStar(_))));
        assert!(matches!(map.distance("A", "Z"), Err(GraphError::UnknownStar(_))));
        assert_eq!(map.position("Z"), Position::ORIGIN);
    }

    #[test]
    fn block_then_unblock_restores_neighbor() {
        let mut map = sample_map();
        assert!(neighbor_labels(&map, "A").contains(&String::from("B")));

        assert!(map.block("A", "B").unwrap_or(false));
        assert!(!neighbor_labels(&map, "A").contains(&String::from("B")));
        assert!(!neighbor_labels(&map, "B").contains(&String::from("A")));
        assert!(map.distance("A", "B").is_ok_and(f64::is_infinite));

        // Second block is a no-op and the pair stays blocked.
        assert!(!map.block("B", "A").unwrap_or(true));
        assert!(map.is_blocked("A", "B"));

        assert!(map.unblock("B", "A").unwrap_or(false));
        assert!(neighbor_labels(&map, "A").contains(&String::from("B")));
        assert!(!map.unblock("A", "B").unwrap_or(true));
    }

    #[test]
    fn block_rejects_unknown_and_self_pairs() {
        let mut map = sample_map();
        assert!(matches!(map.block("A", "Z"), Err(GraphError::UnknownStar(_))));
        assert!(matches!(map.unblock("Q", "A"), Err(GraphError::UnknownStar(_))));
        assert!(matches!(map.block("A", "A"), Err(GraphError::SelfPair(_))));
    }

    #[test]
    fn load_replaces_previous_state() {
        let mut map = sample_map();
        let _ = map.block("A", "B");
        let reloaded = map.load_json(
            &json!({"constellations": [{"name": "Solo", "stars": [{"id": 1, "label": "X"}]}]})
                .to_string(),
        );
        assert!(reloaded.is_ok());
        assert_eq!(map.star_count(), 1);
        assert_eq!(map.connection_count(), 0);
        assert_eq!(map.blocked_pairs().count(), 0);
        assert!(map.hints().age.is_none());
    }

    #[test]
    fn failed_load_leaves_map_empty() {
        let mut map = sample_map();
        assert!(map.load_json("not json").is_err());
        assert_eq!(map.star_count(), 0);

        let mut map = sample_map();
        let bad = json!({"constellations": [{"stars": [{"label": "X", "amountOfEnergy": -2}]}]});
        assert!(matches!(
            map.load_json(&bad.to_string()),
            Err(GraphError::DataFormat { .. })
        ));
        assert_eq!(map.star_count(), 0);
    }

    #[test]
    fn two_loads_are_identical() {
        let first = StarMap::from_json(&sample_json()).unwrap();
        let second = StarMap::from_json(&sample_json()).unwrap();
        assert_eq!(first.star_count(), 5);
        assert_eq!(first, second);
        let first_edges: Vec<&Connection> = first.connections().collect();
        let second_edges: Vec<&Connection> = second.connections().collect();
        assert_eq!(first_edges, second_edges);
        assert_eq!(first.constellations(), second.constellations());
    }

    #[test]
    fn unlabeled_stars_and_dangling_links_are_skipped() {
        let map = StarMap::from_json(
            &json!({"constellations": [{"name": "N", "stars": [
                {"id": 1, "label": "A", "linkedTo": [{"starId": 99, "distance": 3}, {"starId": 1}]},
                {"id": 2}
            ]}]})
            .to_string(),
        )
        .unwrap();
        assert_eq!(map.star_count(), 1);
        assert_eq!(map.connection_count(), 0);
    }

    #[test]
    fn links_without_a_target_id_are_skipped() {
        let map = StarMap::from_json(
            &json!({"constellations": [{"name": "N", "stars": [
                {"id": 1, "label": "A", "linkedTo": [{"distance": 3}, {"starId": 2, "distance": 4}]},
                {"id": 2, "label": "B"}
            ]}]})
            .to_string(),
        )
        .unwrap();
        assert_eq!(map.star_count(), 2);
        assert_eq!(map.connection_count(), 1);
        assert!((map.distance("A", "B").unwrap() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multi_constellation_membership_sets_overlap() {
        let map = StarMap::from_json(
            &json!({"constellations": [
                {"name": "One", "stars": [{"id": 1, "label": "Shared", "coordenates": {"x": 1, "y": 1}},
                                          {"id": 2, "label": "Lone", "coordenates": {"x": 50, "y": 9}}]},
                {"name": "Two", "stars": [{"id": 1, "label": "Shared", "coordenates": {"x": 1, "y": 1}}]}
            ]})
            .to_string(),
        )
        .unwrap();
        let shared = map.star("Shared");
        assert_eq!(shared.map(|s| s.constellations.len()), Some(2));
        assert_eq!(shared.map(|s| s.overlap), Some(true));
        assert_eq!(map.star("Lone").map(|s| s.overlap), Some(false));
    }

    #[test]
    fn shared_coordinates_set_overlap() {
        let map = StarMap::from_json(
            &json!({"constellations": [{"name": "N", "stars": [
                {"id": 1, "label": "P", "coordenates": {"x": 3, "y": 3}},
                {"id": 2, "label": "Q", "coordenates": {"x": 3, "y": 3}}
            ]}]})
            .to_string(),
        )
        .unwrap();
        assert_eq!(map.star_count(), 2);
        assert!(map.stars().all(|s| s.overlap));
    }

    #[test]
    fn invalid_distance_is_infinite_but_has_fallback_cost() {
        let map = StarMap::from_json(
            &json!({"constellations": [{"name": "N", "stars": [
                {"id": 1, "label": "P", "coordenates": {"x": 0, "y": 0},
                 "linkedTo": [{"starId": 2, "distance": "unknown"}]},
                {"id": 2, "label": "Q", "coordenates": {"x": 400, "y": 0}}
            ]}]})
            .to_string(),
        )
        .unwrap();
        assert!(map.distance("P", "Q").is_ok_and(f64::is_infinite));
        let neighbors = map.neighbors("P").unwrap();
        assert!(neighbors.first().is_some_and(|(_, d)| d.is_infinite()));

        let connection = map.connections().next();
        let expected = map.position("P").distance_to(map.position("Q")) / FALLBACK_PIXEL_SCALE;
        let cost = connection.map(|c| map.traversal_cost(c));
        assert!(cost.is_some_and(|c| (c - expected).abs() < 1e-9 && c > 0.0));
    }

    #[test]
    fn positions_are_on_the_board() {
        let map = sample_map();
        let a = map.position("A");
        assert!(a.x >= crate::layout::BOARD_PADDING);
        assert!(a.y >= crate::layout::BOARD_PADDING);
    }
}
