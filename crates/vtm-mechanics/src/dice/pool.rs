//! Splitting a pool into regular and hunger dice.

use serde::{Deserialize, Serialize};

/// How many regular and hunger dice a pool contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolSplit {
    /// Ordinary dice.
    pub regular: u32,
    /// Hunger dice, never more than the pool.
    pub hunger: u32,
}

impl PoolSplit {
    /// Split `pool` dice given the current hunger level.
    ///
    /// Hunger above the pool size is clamped, so a pool of 2 at hunger 4
    /// rolls two hunger dice and no regular ones.
    pub fn new(pool: u32, hunger: u32) -> Self {
        let hunger = hunger.min(pool);
        Self {
            regular: pool - hunger,
            hunger,
        }
    }
}
