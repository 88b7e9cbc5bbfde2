//! Ten-sided dice, dice sources and pool splitting.
//!
//! Every check in the system rolls d10s. A die is either a regular die or a
//! hunger die; hunger dice replace regular dice one-for-one up to the
//! character's current hunger.

pub mod pool;
pub mod source;

pub use pool::PoolSplit;
pub use source::{DiceSource, OsDice, ScriptedDice};

use serde::{Deserialize, Serialize};

/// Lowest face that counts as a success.
pub const SUCCESS_THRESHOLD: u8 = 6;

/// Number of sides on every die in the pool.
pub const SIDES: u8 = 10;

/// A single rolled d10 face, always in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// Create a face, returning `None` outside `1..=10`.
    pub fn new(value: u8) -> Option<Self> {
        (1..=SIDES).contains(&value).then_some(Self(value))
    }

    /// The numeric face value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// A face of 6 or more.
    pub fn is_success(self) -> bool {
        self.0 >= SUCCESS_THRESHOLD
    }

    /// A face of exactly 10.
    pub fn is_critical(self) -> bool {
        self.0 == SIDES
    }

    /// A face of exactly 1. Only meaningful on a hunger die.
    pub fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl TryFrom<u8> for DieFace {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die face {value} is outside 1..=10"))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which sub-pool a die belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiceKind {
    /// An ordinary die.
    #[default]
    Regular,
    /// A hunger die: a 10 taints a critical, a 1 invites the Beast.
    Hunger,
}

impl std::fmt::Display for DiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Hunger => write!(f, "Hunger"),
        }
    }
}
