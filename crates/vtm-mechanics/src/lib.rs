//! Dice pool engine for V5-style games.
//!
//! Provides ten-sided dice sources, the pool-vs-difficulty resolution engine
//! with its hunger sub-pool, the derived checks (rouse, frenzy, skill and
//! custom pools) and the character sheet that feeds them.

pub mod checks;
pub mod dice;
pub mod error;
pub mod resolution;
pub mod sheet;

pub use checks::{FrenzyResult, RollAction, RouseResult, SkillResult};
pub use dice::{DiceKind, DiceSource, DieFace, OsDice, PoolSplit, ScriptedDice};
pub use error::{MechError, MechResult};
pub use resolution::{MAX_POOL, Outcome, RollRequest, RollResult, resolve_pool};
pub use sheet::{CharacterSheet, Resource, StatBlock, StatIndex};
