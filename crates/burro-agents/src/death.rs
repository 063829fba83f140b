//! Death conditions for the donkey.
//!
//! The donkey dies when its life budget or its energy reaches zero. Both
//! [`Donkey::travel`](crate::Donkey::travel) and
//! [`Donkey::process_star`](crate::Donkey::process_star) may leave the
//! donkey in such a state; callers check after every transition.

use crate::donkey::Donkey;

/// The cause of the donkey's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// The remaining life budget dropped to 0 or below.
    LifeExhausted,
    /// Energy dropped to 0.
    EnergyDepleted,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LifeExhausted => write!(f, "life_exhausted"),
            Self::EnergyDepleted => write!(f, "energy_depleted"),
        }
    }
}

/// Check whether the donkey meets any death condition.
///
/// Returns `Some(cause)` if the donkey is dead, `None` if alive. Life is
/// checked before energy.
pub const fn check_death(donkey: &Donkey) -> Option<DeathCause> {
    if donkey.life_budget() <= 0.0 {
        return Some(DeathCause::LifeExhausted);
    }
    if donkey.energy() <= 0.0 {
        return Some(DeathCause::EnergyDepleted);
    }
    None
}
