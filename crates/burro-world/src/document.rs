//! Schema of the constellation input document.
//!
//! The document is JSON. Key names follow the files produced by the
//! mission planning tools (`starts`, `coordenates`, `burroenergiaInicial`,
//! ...); English aliases are accepted as well. Every numeric field is
//! optional and falls back to a documented default.
//!
//! ```json
//! {
//!   "constellations": [
//!     { "name": "Orion", "starts": [
//!       { "id": 1, "label": "Rigel", "coordenates": { "x": 10, "y": 20 },
//!         "radius": 0.8, "timeToEat": 2, "amountOfEnergy": 3,
//!         "hypergiant": true,
//!         "linkedTo": [ { "starId": 2, "distance": 40 } ] }
//!     ] }
//!   ],
//!   "burroenergiaInicial": 90, "estadoSalud": "excelente",
//!   "pasto": 300, "startAge": 12, "deathAge": 3500
//! }
//! ```

use burro_types::{DonkeyHints, Position, Star, StarId};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::GraphError;

/// Name given to constellations that omit one.
pub const UNNAMED_CONSTELLATION: &str = "Unnamed";

/// Top-level input document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StarDocument {
    /// Constellations in document order.
    #[serde(default)]
    pub constellations: Vec<ConstellationRecord>,

    /// Suggested starting energy percentage.
    #[serde(default, rename = "burroenergiaInicial", alias = "initialEnergy")]
    pub initial_energy: Option<f64>,

    /// Suggested starting health tier name.
    #[serde(default, rename = "estadoSalud", alias = "health")]
    pub health: Option<String>,

    /// Suggested food stock in kilograms.
    #[serde(default, rename = "pasto", alias = "food")]
    pub food: Option<f64>,

    /// Suggested starting age. Fractional years are rounded.
    #[serde(default, rename = "startAge", alias = "age", deserialize_with = "whole_years")]
    pub start_age: Option<u32>,

    /// Age at which the donkey dies of old age. Fractional years are
    /// rounded.
    #[serde(default, rename = "deathAge", alias = "lifespan", deserialize_with = "whole_years")]
    pub death_age: Option<u32>,
}

impl StarDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DataFormat`] on invalid JSON or field types.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Donkey configuration suggestions carried by the document.
    pub fn hints(&self) -> DonkeyHints {
        DonkeyHints {
            energy: self.initial_energy,
            health: self.health.clone(),
            food: self.food,
            age: self.start_age,
            death_age: self.death_age,
        }
    }
}

/// One constellation entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstellationRecord {
    /// Constellation name (default [`UNNAMED_CONSTELLATION`]).
    #[serde(default = "default_constellation_name")]
    pub name: String,

    /// Member stars.
    #[serde(default, rename = "stars", alias = "starts")]
    pub stars: Vec<StarRecord>,
}

/// One star entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRecord {
    /// Document-local identifier referenced by links.
    #[serde(default)]
    pub id: Option<StarId>,

    /// Display label; stars without one are skipped.
    #[serde(default)]
    pub label: Option<String>,

    /// Raw coordinate in centimetres.
    #[serde(default, alias = "coordenates")]
    pub coordinates: CoordinatesRecord,

    /// Size hint.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Hypergiant flag.
    #[serde(default)]
    pub hypergiant: bool,

    /// Time units to eat one kilogram here.
    #[serde(default = "default_time_to_eat")]
    pub time_to_eat: f64,

    /// Energy cost per research unit here.
    #[serde(default = "default_research_cost")]
    pub amount_of_energy: f64,

    /// Health tier shift applied by research.
    #[serde(default)]
    pub health_effect: i32,

    /// Life budget change applied by research.
    #[serde(default)]
    pub life_effect: f64,

    /// Outgoing links.
    #[serde(default)]
    pub linked_to: Vec<LinkRecord>,
}

impl StarRecord {
    /// Check the numeric attributes that must not be negative.
    pub(crate) fn validate(&self, label: &str) -> Result<(), GraphError> {
        let checks = [
            ("radius", self.radius),
            ("timeToEat", self.time_to_eat),
            ("amountOfEnergy", self.amount_of_energy),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::DataFormat {
                    reason: format!("star {label}: {field} must be a non-negative number, got {value}"),
                });
            }
        }
        if !self.life_effect.is_finite() {
            return Err(GraphError::DataFormat {
                reason: format!("star {label}: lifeEffect must be finite"),
            });
        }
        Ok(())
    }

    /// Build the typed [`Star`] for this record. Board position and
    /// overlap are filled in later by the loader.
    pub(crate) fn to_star(&self, label: &str, constellation: &str) -> Star {
        let mut star = Star::new(label);
        star.id.clone_from(&self.id);
        star.raw_position = Position::new(self.coordinates.x, self.coordinates.y);
        star.radius = self.radius;
        star.time_to_eat_rate = self.time_to_eat;
        star.energy_research_cost = self.amount_of_energy;
        star.hypergiant = self.hypergiant;
        star.effects.health_effect = self.health_effect;
        star.effects.life_effect = self.life_effect;
        star.constellations.push(constellation.to_owned());
        star
    }
}

/// A raw `{x, y}` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct CoordinatesRecord {
    /// Horizontal coordinate (default 0).
    #[serde(default)]
    pub x: f64,
    /// Vertical coordinate (default 0).
    #[serde(default)]
    pub y: f64,
}

/// A link from one star to another by identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Identifier of the target star. Links without one are skipped.
    #[serde(default)]
    pub star_id: Option<StarId>,

    /// Distance as written: a number, a numeric string, or absent (0).
    #[serde(default = "default_distance")]
    pub distance: Value,
}

impl LinkRecord {
    /// Interpret the distance field.
    ///
    /// Returns `None` when the value is not a usable weight: non-numeric,
    /// negative, non-finite, or explicitly `null`.
    pub fn parsed_distance(&self) -> Option<f64> {
        let raw = match &self.distance {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        (raw.is_finite() && raw >= 0.0).then_some(raw)
    }
}

/// Read an age written as any JSON number and round it to whole years.
fn whole_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(years) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let rounded = years.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return Err(serde::de::Error::custom(format!(
            "age must be a non-negative number of years, got {years}"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let years = rounded as u32;
    Ok(Some(years))
}

fn default_constellation_name() -> String {
    String::from(UNNAMED_CONSTELLATION)
}

const fn default_radius() -> f64 {
    Star::DEFAULT_RADIUS
}

const fn default_time_to_eat() -> f64 {
    Star::DEFAULT_TIME_TO_EAT
}

const fn default_research_cost() -> f64 {
    Star::DEFAULT_RESEARCH_COST
}

fn default_distance() -> Value {
    Value::from(0)
}
