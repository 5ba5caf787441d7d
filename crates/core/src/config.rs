mod seed;

pub use seed::Seed;

use rand::random;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a game. Two games started with the same config
/// will always hide their atoms in the same places.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed used to place the atoms. Can be given as an integer or any
    /// string; see [Seed] for how each is handled. If not given, a random
    /// seed is picked.
    pub seed: Seed,

    /// Distance from the center of the grid to the edge (in cells). The
    /// classic board has a radius of 4, for 61 cells.
    #[validate(range(min = 1, max = 100))]
    pub radius: u16,
}

impl GameConfig {
    pub const DEFAULT_RADIUS: u16 = 4;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: Seed::Int(random()),
            radius: Self::DEFAULT_RADIUS,
        }
    }
}
