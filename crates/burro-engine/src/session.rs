//! Preparation of a planning session from configuration and document.

use burro_agents::Donkey;
use burro_core::SimulationConfig;
use burro_types::StarLabel;
use burro_world::StarMap;
use tracing::info;

use crate::error::EngineError;

/// Block every configured pair on `map`.
///
/// # Errors
///
/// Returns [`EngineError::Graph`] if a pair names an unknown star or a star
/// paired with itself.
pub fn apply_blocks(map: &mut StarMap, config: &SimulationConfig) -> Result<(), EngineError> {
    for [a, b] in &config.route.blocked {
        let newly_blocked = map.block(a, b)?;
        info!(a = %a, b = %b, newly_blocked, "Blocked star pair");
    }
    Ok(())
}

/// Build the starting donkey: configuration overrides first, then the
/// document's hints, then built-in defaults.
///
/// # Errors
///
/// Returns [`EngineError::Agent`] for an unknown tier name or invalid
/// attributes.
pub fn build_donkey(map: &StarMap, config: &SimulationConfig) -> Result<Donkey, EngineError> {
    let hints = config.donkey.apply_to(map.hints());
    Ok(Donkey::from_hints(&hints, &config.mechanics)?)
}

/// Start star: the configured one, or the first star of the first
/// constellation.
///
/// # Errors
///
/// Returns [`EngineError::NoStartStar`] if neither exists, or
/// [`EngineError::Graph`] if the configured label is unknown.
pub fn start_star(map: &StarMap, config: &SimulationConfig) -> Result<StarLabel, EngineError> {
    match config.route.start.as_deref() {
        Some(label) => Ok(map.require(label)?.label.clone()),
        None => map.default_start().cloned().ok_or(EngineError::NoStartStar),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use burro_types::HealthTier;
    use serde_json::json;

    use super::*;

    fn map() -> StarMap {
        StarMap::from_json(
            &json!({
                "constellations": [{"name": "Orion", "starts": [
                    {"id": 1, "label": "Rigel", "linkedTo": [{"starId": 2, "distance": 5}]},
                    {"id": 2, "label": "Saiph"}
                ]}],
                "estadoSalud": "mala",
                "pasto": 12,
                "startAge": 40
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn blocks_are_applied() {
        let mut map = map();
        let mut config = SimulationConfig::default();
        config.route.blocked.push([String::from("Rigel"), String::from("Saiph")]);
        assert!(apply_blocks(&mut map, &config).is_ok());
        assert!(map.is_blocked("Saiph", "Rigel"));
    }

    #[test]
    fn unknown_block_is_an_error() {
        let mut map = map();
        let mut config = SimulationConfig::default();
        config.route.blocked.push([String::from("Rigel"), String::from("Vega")]);
        assert!(matches!(
            apply_blocks(&mut map, &config),
            Err(EngineError::Graph { .. })
        ));
    }

    #[test]
    fn donkey_prefers_config_over_document() {
        let map = map();
        let mut config = SimulationConfig::default();
        config.donkey.age = Some(20);
        let donkey = build_donkey(&map, &config);
        assert!(donkey.is_ok());
        let donkey = donkey.unwrap();
        assert_eq!(donkey.age(), 20);
        assert_eq!(donkey.health(), HealthTier::Poor);
        assert!((donkey.food() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn start_defaults_to_first_star() {
        let map = map();
        let config = SimulationConfig::default();
        assert_eq!(start_star(&map, &config).ok().map(StarLabel::into_inner), Some(String::from("Rigel")));

        let mut config = SimulationConfig::default();
        config.route.start = Some(String::from("Nowhere"));
        assert!(start_star(&map, &config).is_err());
        assert!(matches!(
            start_star(&StarMap::new(), &SimulationConfig::default()),
            Err(EngineError::NoStartStar)
        ));
    }
}
