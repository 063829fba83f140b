//! The donkey: mutable resource state and its transition rules.
//!
//! A [`Donkey`] is a plain value. Planners clone it before every
//! speculative step, so a trial transition can never leak into the state
//! the next candidate starts from.
//!
//! Two transitions exist:
//!
//! - [`Donkey::travel`] spends life budget one-for-one with distance and
//!   energy at [`DonkeyConfig::travel_energy_rate`] per unit.
//! - [`Donkey::process_star`] eats (when hungry and healthy enough) and then
//!   researches, both within fixed time budgets.
//!
//! Neither transition refuses to run on a dead donkey. Negative life budget
//! and zero energy are valid transient states; the caller decides what
//! death means via [`check_death`](crate::check_death).

use burro_types::{DonkeyHints, FoodLogEntry, HealthTier, ResearchLogEntry, Star};
use tracing::debug;

use crate::config::DonkeyConfig;
use crate::death::check_death;
use crate::error::AgentError;

/// Default starting health tier.
pub const DEFAULT_HEALTH: HealthTier = HealthTier::Excellent;

/// Default starting age in years.
pub const DEFAULT_AGE: u32 = 10;

/// Default starting energy percentage.
pub const DEFAULT_ENERGY: f64 = 100.0;

/// Default starting food stock in kilograms.
pub const DEFAULT_FOOD: f64 = 100.0;

/// The simulated traveller.
#[derive(Debug, Clone, PartialEq)]
pub struct Donkey {
    health: HealthTier,
    age: u32,
    energy: f64,
    food: f64,
    life_budget: f64,
    food_log: Vec<FoodLogEntry>,
    research_log: Vec<ResearchLogEntry>,
}

impl Default for Donkey {
    fn default() -> Self {
        let config = DonkeyConfig::default();
        Self {
            health: DEFAULT_HEALTH,
            age: DEFAULT_AGE,
            energy: DEFAULT_ENERGY,
            food: DEFAULT_FOOD,
            life_budget: initial_life_budget(DEFAULT_HEALTH, DEFAULT_AGE, &config),
            food_log: Vec::new(),
            research_log: Vec::new(),
        }
    }
}

impl Donkey {
    /// Create a donkey with explicit starting attributes.
    ///
    /// The life budget is derived from `age` and `health` using
    /// [`initial_life_budget`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidAttribute`] if `age` is 0, `energy` is
    /// outside `0..=max_energy`, or `food` is negative or not finite.
    pub fn new(
        health: HealthTier,
        age: u32,
        energy: f64,
        food: f64,
        config: &DonkeyConfig,
    ) -> Result<Self, AgentError> {
        if age == 0 {
            return Err(AgentError::InvalidAttribute {
                field: "age",
                reason: String::from("must be a positive number of years"),
            });
        }
        if !energy.is_finite() || !(0.0..=config.max_energy).contains(&energy) {
            return Err(AgentError::InvalidAttribute {
                field: "energy",
                reason: format!("must be within 0..={}, got {energy}", config.max_energy),
            });
        }
        if !food.is_finite() || food < 0.0 {
            return Err(AgentError::InvalidAttribute {
                field: "food",
                reason: format!("must be a non-negative number, got {food}"),
            });
        }

        Ok(Self {
            health,
            age,
            energy,
            food,
            life_budget: initial_life_budget(health, age, config),
            food_log: Vec::new(),
            research_log: Vec::new(),
        })
    }

    /// Create a donkey from (possibly partial) hints, filling gaps with the
    /// `DEFAULT_*` constants.
    ///
    /// A `death_age` hint replaces [`DonkeyConfig::lifespan`] for the life
    /// budget computation.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownHealthTier`] for an unrecognised tier
    /// name, or any error from [`Donkey::new`].
    pub fn from_hints(hints: &DonkeyHints, config: &DonkeyConfig) -> Result<Self, AgentError> {
        let health = match hints.health.as_deref() {
            Some(name) => HealthTier::from_name(name)
                .ok_or_else(|| AgentError::UnknownHealthTier(name.to_owned()))?,
            None => DEFAULT_HEALTH,
        };

        let mut config = config.clone();
        if let Some(death_age) = hints.death_age {
            config.lifespan = death_age;
        }

        Self::new(
            health,
            hints.age.unwrap_or(DEFAULT_AGE),
            hints.energy.unwrap_or(DEFAULT_ENERGY),
            hints.food.unwrap_or(DEFAULT_FOOD),
            &config,
        )
    }

    /// Replace the derived life budget with an explicit value.
    #[must_use]
    pub const fn with_life_budget(mut self, life_budget: f64) -> Self {
        self.life_budget = life_budget;
        self
    }

    /// Current health tier.
    pub const fn health(&self) -> HealthTier {
        self.health
    }

    /// Age in years.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Energy percentage.
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Food stock in kilograms.
    pub const fn food(&self) -> f64 {
        self.food
    }

    /// Remaining distance the donkey can travel before dying.
    pub const fn life_budget(&self) -> f64 {
        self.life_budget
    }

    /// Every meal so far, in order.
    pub fn food_log(&self) -> &[FoodLogEntry] {
        &self.food_log
    }

    /// Every research session so far, in order.
    pub fn research_log(&self) -> &[ResearchLogEntry] {
        &self.research_log
    }

    /// `true` while both life budget and energy are above zero.
    pub const fn is_alive(&self) -> bool {
        check_death(self).is_none()
    }

    /// Energy gained per kilogram of food at the current health tier.
    ///
    /// Only excellent, regular and poor donkeys can eat.
    pub const fn eating_yield(&self) -> f64 {
        match self.health {
            HealthTier::Excellent => 5.0,
            HealthTier::Regular => 3.0,
            HealthTier::Poor => 2.0,
            HealthTier::Good | HealthTier::Dying => 0.0,
        }
    }

    /// Travel `distance` units.
    ///
    /// The life budget decreases by exactly `distance` and may go negative.
    /// Energy decreases by `distance * travel_energy_rate` and stops at 0.
    pub fn travel(&mut self, distance: f64, config: &DonkeyConfig) {
        self.life_budget -= distance;
        self.energy = config.travel_energy_rate.mul_add(-distance, self.energy).max(0.0);
    }

    /// Spend a visit at `star`: eat first, then research.
    pub fn process_star(&mut self, star: &Star, config: &DonkeyConfig) {
        self.eat(star, config);
        self.research(star, config);
    }

    fn eat(&mut self, star: &Star, config: &DonkeyConfig) {
        let energy_per_kg = self.eating_yield();
        if self.energy >= config.eat_energy_threshold || self.food <= 0.0 || energy_per_kg <= 0.0 {
            return;
        }

        let to_fill = (config.max_energy - self.energy).max(0.0) / energy_per_kg;
        let within_time = if star.time_to_eat_rate > 0.0 {
            config.eat_time_budget / star.time_to_eat_rate
        } else {
            f64::INFINITY
        };
        let kilograms = to_fill.min(self.food).min(within_time).max(0.0);

        let before = self.energy;
        self.energy = kilograms.mul_add(energy_per_kg, self.energy).min(config.max_energy);
        self.food = (self.food - kilograms).max(0.0);

        if kilograms > config.log_epsilon {
            debug!(star = %star.label, kilograms, energy = self.energy, "donkey ate");
            self.food_log.push(FoodLogEntry {
                star: star.label.clone(),
                kilograms,
                energy_gained: self.energy - before,
            });
        }
    }

    fn research(&mut self, star: &Star, config: &DonkeyConfig) {
        let cost_per_unit = star.energy_research_cost;
        let planned = config.planned_research_units();

        // Research stops early rather than spending energy the donkey does
        // not have.
        let units = if cost_per_unit > 0.0 {
            planned.min(self.energy.max(0.0) / cost_per_unit)
        } else {
            planned
        };
        let energy_spent = units * cost_per_unit;
        let research_time = units * config.research_time_per_unit;

        self.energy = (self.energy - energy_spent).max(0.0);
        self.health = self.health.shifted(star.effects.health_effect);
        self.life_budget += star.effects.life_effect;

        if units > config.log_epsilon || star.effects.is_active() {
            debug!(
                star = %star.label,
                units,
                energy = self.energy,
                health = %self.health,
                "donkey researched"
            );
            self.research_log.push(ResearchLogEntry {
                star: star.label.clone(),
                research_time,
                energy_spent,
                health_effect: star.effects.health_effect,
                life_effect: star.effects.life_effect,
            });
        }
    }
}

/// Life budget a new donkey starts with.
///
/// `max(0, lifespan - age) * distance_per_year * (1 + bonus * tier)`.
pub fn initial_life_budget(health: HealthTier, age: u32, config: &DonkeyConfig) -> f64 {
    let years_left = f64::from(config.lifespan.saturating_sub(age));
    let bonus = config
        .health_bonus_per_tier
        .mul_add(f64::from(health.level()), 1.0);
    years_left * config.distance_per_year * bonus
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn config() -> DonkeyConfig {
        DonkeyConfig::default()
    }

    fn donkey(health: HealthTier, energy: f64, food: f64) -> Donkey {
        Donkey::new(health, 10, energy, food, &config()).unwrap()
    }

    fn star(time_to_eat: f64, research_cost: f64) -> Star {
        let mut star = Star::new("S");
        star.time_to_eat_rate = time_to_eat;
        star.energy_research_cost = research_cost;
        star
    }

    #[test]
    fn life_budget_follows_age_and_health() {
        let cfg = config();
        // (100 - 10) * 10 * (1 + 0.05 * 4)
        assert!(approx(initial_life_budget(HealthTier::Excellent, 10, &cfg), 1080.0));
        assert!(approx(initial_life_budget(HealthTier::Dying, 10, &cfg), 900.0));
        assert!(approx(initial_life_budget(HealthTier::Good, 150, &cfg), 0.0));
    }

    #[test]
    fn invalid_attributes_are_rejected() {
        let cfg = config();
        assert!(Donkey::new(HealthTier::Good, 0, 50.0, 1.0, &cfg).is_err());
        assert!(Donkey::new(HealthTier::Good, 5, 101.0, 1.0, &cfg).is_err());
        assert!(Donkey::new(HealthTier::Good, 5, -1.0, 1.0, &cfg).is_err());
        assert!(Donkey::new(HealthTier::Good, 5, 50.0, -0.5, &cfg).is_err());
        assert!(Donkey::new(HealthTier::Good, 5, 50.0, f64::NAN, &cfg).is_err());
    }

    #[test]
    fn hints_fill_gaps_with_defaults() {
        let hints = DonkeyHints {
            health: Some(String::from("mala")),
            food: Some(3.0),
            ..DonkeyHints::default()
        };
        let d = Donkey::from_hints(&hints, &config());
        assert!(d.is_ok());
        let d = d.unwrap();
        assert_eq!(d.health(), HealthTier::Poor);
        assert_eq!(d.age(), DEFAULT_AGE);
        assert!(approx(d.energy(), DEFAULT_ENERGY));
        assert!(approx(d.food(), 3.0));
    }

    #[test]
    fn death_age_hint_overrides_lifespan() {
        let hints = DonkeyHints {
            health: Some(String::from("dying")),
            age: Some(20),
            death_age: Some(30),
            ..DonkeyHints::default()
        };
        let d = Donkey::from_hints(&hints, &config()).unwrap();
        assert!(approx(d.life_budget(), 100.0));
    }

    #[test]
    fn unknown_health_name_is_an_error() {
        let hints = DonkeyHints {
            health: Some(String::from("zombie")),
            ..DonkeyHints::default()
        };
        assert!(matches!(
            Donkey::from_hints(&hints, &config()),
            Err(AgentError::UnknownHealthTier(_))
        ));
    }

    #[test]
    fn travel_spends_life_and_energy() {
        let mut d = donkey(HealthTier::Regular, 50.0, 0.0).with_life_budget(100.0);
        d.travel(30.0, &config());
        assert!(approx(d.life_budget(), 70.0));
        assert!(approx(d.energy(), 47.0));
    }

    #[test]
    fn travel_energy_stops_at_zero_but_life_goes_negative() {
        let mut d = donkey(HealthTier::Regular, 5.0, 0.0).with_life_budget(10.0);
        d.travel(200.0, &config());
        assert!(approx(d.energy(), 0.0));
        assert!(approx(d.life_budget(), -190.0));
        assert!(!d.is_alive());
    }

    #[test]
    fn excellent_donkey_eats_until_full() {
        // Needs (100 - 40) / 5 = 12 kg, has 20, time allows 10 / 0.5 = 20.
        let mut d = donkey(HealthTier::Excellent, 40.0, 20.0);
        d.process_star(&star(0.5, 0.0), &config());
        assert!(approx(d.food(), 8.0));
        assert!(approx(d.energy(), 100.0));
        assert_eq!(d.food_log().len(), 1);
        assert!(d.food_log().first().is_some_and(|e| approx(e.kilograms, 12.0)));
    }

    #[test]
    fn eating_is_limited_by_time_budget() {
        // 10 time units at 2 per kg: 5 kg, 3 energy per kg.
        let mut d = donkey(HealthTier::Regular, 10.0, 50.0);
        d.process_star(&star(2.0, 0.0), &config());
        assert!(approx(d.food(), 45.0));
        assert!(approx(d.energy(), 25.0));
    }

    #[test]
    fn eating_is_limited_by_food_stock() {
        let mut d = donkey(HealthTier::Poor, 10.0, 4.0);
        d.process_star(&star(1.0, 0.0), &config());
        assert!(approx(d.food(), 0.0));
        assert!(approx(d.energy(), 18.0));
    }

    #[test]
    fn no_eating_when_energy_high_or_tier_cannot_eat() {
        let mut full = donkey(HealthTier::Excellent, 50.0, 10.0);
        full.process_star(&star(1.0, 0.0), &config());
        assert!(approx(full.food(), 10.0));

        for tier in [HealthTier::Good, HealthTier::Dying] {
            let mut d = donkey(tier, 10.0, 10.0);
            d.process_star(&star(1.0, 0.0), &config());
            assert!(approx(d.food(), 10.0));
            assert!(d.food_log().is_empty());
        }
    }

    #[test]
    fn research_spends_energy_and_logs() {
        // 10 units at 2 energy each.
        let mut d = donkey(HealthTier::Good, 80.0, 0.0);
        d.process_star(&star(1.0, 2.0), &config());
        assert!(approx(d.energy(), 60.0));
        let entry = d.research_log().first();
        assert!(entry.is_some_and(|e| approx(e.research_time, 10.0)));
        assert!(entry.is_some_and(|e| approx(e.energy_spent, 20.0)));
    }

    #[test]
    fn research_never_spends_more_energy_than_available() {
        let mut d = donkey(HealthTier::Good, 15.0, 0.0);
        d.process_star(&star(1.0, 3.0), &config());
        assert!(approx(d.energy(), 0.0));
        // Only 5 units fit.
        assert!(d.research_log().first().is_some_and(|e| approx(e.research_time, 5.0)));
    }

    #[test]
    fn research_applies_star_effects() {
        let mut s = star(1.0, 0.0);
        s.effects.health_effect = 3;
        s.effects.life_effect = -25.0;
        let mut d = donkey(HealthTier::Regular, 80.0, 0.0).with_life_budget(100.0);
        d.process_star(&s, &config());
        assert_eq!(d.health(), HealthTier::Excellent);
        assert!(approx(d.life_budget(), 75.0));

        s.effects.health_effect = -9;
        d.process_star(&s, &config());
        assert_eq!(d.health(), HealthTier::Dying);
    }

    #[test]
    fn effects_alone_produce_a_research_entry() {
        let mut s = star(1.0, 0.0);
        s.effects.life_effect = 5.0;
        let cfg = DonkeyConfig {
            research_time_budget: 0.0,
            ..config()
        };
        let mut d = donkey(HealthTier::Good, 80.0, 0.0);
        d.process_star(&s, &cfg);
        assert_eq!(d.research_log().len(), 1);
    }

    #[test]
    fn clones_do_not_share_state() {
        let base = donkey(HealthTier::Excellent, 30.0, 10.0);
        let mut trial = base.clone();
        trial.travel(50.0, &config());
        trial.process_star(&star(1.0, 1.0), &config());
        assert_eq!(base, donkey(HealthTier::Excellent, 30.0, 10.0));
        assert!(base.food_log().is_empty());
    }

    #[test]
    fn transitions_keep_energy_and_health_in_range() {
        let cfg = config();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let tier = HealthTier::from_level(rng.random_range(0..=4));
            let mut d = donkey(tier, rng.random_range(0.0..=100.0), rng.random_range(0.0..50.0));
            for _ in 0..20 {
                let mut s = star(rng.random_range(0.0..5.0), rng.random_range(0.0..20.0));
                s.effects.health_effect = rng.random_range(-6..=6);
                s.effects.life_effect = rng.random_range(-50.0..50.0);
                if rng.random_bool(0.5) {
                    d.travel(rng.random_range(0.0..300.0), &cfg);
                }
                d.process_star(&s, &cfg);
                assert!((0.0..=100.0).contains(&d.energy()));
                assert!(d.food() >= 0.0);
                assert!(
                    (HealthTier::MIN_LEVEL..=HealthTier::MAX_LEVEL).contains(&d.health().level())
                );
            }
        }
    }
}
