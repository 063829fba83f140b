//! Constellation colours.
//!
//! Each constellation gets a bright colour (every channel in `100..=255`).
//! The RNG is seeded from the constellation name, so the same document
//! always produces the same palette.

use burro_types::Rgb;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lowest channel value, keeps colours readable on a dark board.
const MIN_CHANNEL: u8 = 100;

/// Deterministic bright colour for a constellation name.
pub fn constellation_color(name: &str) -> Rgb {
    let mut rng = SmallRng::seed_from_u64(name_seed(name));
    Rgb {
        r: rng.random_range(MIN_CHANNEL..=u8::MAX),
        g: rng.random_range(MIN_CHANNEL..=u8::MAX),
        b: rng.random_range(MIN_CHANNEL..=u8::MAX),
    }
}

/// FNV-1a over the name bytes.
fn name_seed(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
