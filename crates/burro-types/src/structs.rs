//! Core records of the star graph and the donkey's logs.
//!
//! These are the typed replacements for the loose key-value payloads of the
//! input document: every field is fixed and every default is documented.

use serde::{Deserialize, Serialize};

use crate::ids::{StarId, StarLabel};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A 2D point. Used both for raw document coordinates (centimetres) and
/// for projected board positions (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Position {
    /// The origin, returned for stars that are not on the board.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An 8-bit RGB colour assigned to a constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

/// Modifiers applied to the donkey when it researches at a star.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StarEffects {
    /// Health tier shift (positive heals, negative harms). Default 0.
    pub health_effect: i32,
    /// Additive change to the life budget. Default 0.
    pub life_effect: f64,
}

impl StarEffects {
    /// Whether either modifier is non-zero.
    pub fn is_active(&self) -> bool {
        self.health_effect != 0 || self.life_effect.abs() > f64::EPSILON
    }
}

/// A star node of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Unique label (graph key).
    pub label: StarLabel,
    /// Document-local identifier used by links.
    pub id: Option<StarId>,
    /// Raw document coordinate in centimetres.
    pub raw_position: Position,
    /// Projected board position in pixels.
    pub position: Position,
    /// Size hint for rendering (default 0.5).
    pub radius: f64,
    /// Time units needed to eat one kilogram of food here (default 1).
    pub time_to_eat_rate: f64,
    /// Energy spent per unit of research here (default 1).
    pub energy_research_cost: f64,
    /// Hypergiant flag (rendering hint).
    pub hypergiant: bool,
    /// Names of every constellation this star belongs to, in load order.
    pub constellations: Vec<String>,
    /// Research modifiers.
    pub effects: StarEffects,
    /// Set when the star shares its raw coordinate with another star or
    /// belongs to more than one constellation.
    pub overlap: bool,
}

impl Star {
    /// Default radius for stars that omit it.
    pub const DEFAULT_RADIUS: f64 = 0.5;

    /// Default eating rate for stars that omit `timeToEat`.
    pub const DEFAULT_TIME_TO_EAT: f64 = 1.0;

    /// Default research cost for stars that omit `amountOfEnergy`.
    pub const DEFAULT_RESEARCH_COST: f64 = 1.0;

    /// A star with every optional attribute at its default.
    pub fn new(label: impl Into<StarLabel>) -> Self {
        Self {
            label: label.into(),
            id: None,
            raw_position: Position::ORIGIN,
            position: Position::ORIGIN,
            radius: Self::DEFAULT_RADIUS,
            time_to_eat_rate: Self::DEFAULT_TIME_TO_EAT,
            energy_research_cost: Self::DEFAULT_RESEARCH_COST,
            hypergiant: false,
            constellations: Vec::new(),
            effects: StarEffects::default(),
            overlap: false,
        }
    }
}

/// A named grouping of stars, used for colouring and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constellation {
    /// Constellation name.
    pub name: String,
    /// Member stars in document order.
    pub stars: Vec<StarLabel>,
    /// Display colour.
    pub color: Rgb,
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// An unordered pair of star labels, stored sorted.
///
/// `StarPair::new(a, b) == StarPair::new(b, a)` always holds, which is what
/// lets one entry stand for both directions of an undirected edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StarPair {
    low: StarLabel,
    high: StarLabel,
}

impl StarPair {
    /// Build the canonical pair for two labels in any order.
    pub fn new(a: StarLabel, b: StarLabel) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The smaller label.
    pub const fn low(&self) -> &StarLabel {
        &self.low
    }

    /// The larger label.
    pub const fn high(&self) -> &StarLabel {
        &self.high
    }

    /// Whether `label` is one of the endpoints.
    pub fn contains(&self, label: &str) -> bool {
        self.low.as_str() == label || self.high.as_str() == label
    }

    /// The endpoint opposite `label`, if `label` is an endpoint.
    pub fn other(&self, label: &str) -> Option<&StarLabel> {
        if self.low.as_str() == label {
            Some(&self.high)
        } else if self.high.as_str() == label {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl core::fmt::Display for StarPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// An undirected edge with its travel distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Canonical endpoints.
    pub pair: StarPair,
    /// Distance as written in the document. `None` marks an invalid weight
    /// (non-numeric, negative or non-finite).
    pub distance: Option<f64>,
}

impl Connection {
    /// Build a connection with canonicalised endpoints.
    pub fn new(a: StarLabel, b: StarLabel, distance: Option<f64>) -> Self {
        Self {
            pair: StarPair::new(a, b),
            distance,
        }
    }

    /// The usable distance: the weight when valid, `+inf` otherwise.
    pub fn distance_or_infinity(&self) -> f64 {
        self.distance.unwrap_or(f64::INFINITY)
    }
}

// ---------------------------------------------------------------------------
// Agent hints and logs
// ---------------------------------------------------------------------------

/// Initial donkey configuration suggested by the input document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DonkeyHints {
    /// Suggested starting energy percentage.
    pub energy: Option<f64>,
    /// Suggested health tier name.
    pub health: Option<String>,
    /// Suggested food stock in kilograms.
    pub food: Option<f64>,
    /// Suggested starting age.
    pub age: Option<u32>,
    /// Age at which the donkey dies of old age.
    pub death_age: Option<u32>,
}

/// One eating event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Star where the donkey ate.
    pub star: StarLabel,
    /// Kilograms of food eaten.
    pub kilograms: f64,
    /// Energy percentage gained (after clamping to 100).
    pub energy_gained: f64,
}

/// One research event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchLogEntry {
    /// Star where the research happened.
    pub star: StarLabel,
    /// Research time units actually spent.
    pub research_time: f64,
    /// Energy percentage spent on research.
    pub energy_spent: f64,
    /// Health tier shift applied.
    pub health_effect: i32,
    /// Life budget change applied.
    pub life_effect: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_pair_is_order_independent() {
        let ab = StarPair::new(StarLabel::from("A"), StarLabel::from("B"));
        let ba = StarPair::new(StarLabel::from("B"), StarLabel::from("A"));
        assert_eq!(ab, ba);
        assert_eq!(ab.low().as_str(), "A");
        assert_eq!(ab.other("B").map(StarLabel::as_str), Some("A"));
        assert!(ab.other("C").is_none());
    }

    #[test]
    fn invalid_connection_is_infinite() {
        let c = Connection::new(StarLabel::from("A"), StarLabel::from("B"), None);
        assert!(c.distance_or_infinity().is_infinite());
    }

    #[test]
    fn star_defaults() {
        let star = Star::new("Sol");
        assert!((star.radius - 0.5).abs() < f64::EPSILON);
        assert!((star.time_to_eat_rate - 1.0).abs() < f64::EPSILON);
        assert!(!star.effects.is_active());
        assert!(star.constellations.is_empty());
    }

    #[test]
    fn position_distance() {
        let d = Position::new(0.0, 0.0).distance_to(Position::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
