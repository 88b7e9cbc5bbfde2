//! Sources of d10 faces.
//!
//! The engine never calls a random number generator directly; it asks a
//! [`DiceSource`] for faces. Seeded [`StdRng`] gives reproducible rolls,
//! [`OsDice`] draws from operating-system entropy and [`ScriptedDice`]
//! replays a fixed list of faces.

use std::collections::VecDeque;

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, TryRngCore};

use super::{DieFace, SIDES};
use crate::error::{MechError, MechResult};

/// Anything that can produce uniformly distributed d10 faces.
pub trait DiceSource {
    /// Roll one d10.
    fn roll_d10(&mut self) -> MechResult<DieFace>;
}

impl DiceSource for StdRng {
    fn roll_d10(&mut self) -> MechResult<DieFace> {
        let value = self.random_range(1..=SIDES);
        DieFace::new(value)
            .ok_or_else(|| MechError::RandomSource(format!("face {value} out of range")))
    }
}

/// Largest multiple of ten representable in a `u32`; draws at or above it are rejected.
const UNBIASED_ZONE: u32 = u32::MAX - u32::MAX % SIDES as u32;

/// Dice backed by the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDice;

impl DiceSource for OsDice {
    fn roll_d10(&mut self) -> MechResult<DieFace> {
        let mut rng = OsRng;
        loop {
            let raw = rng
                .try_next_u32()
                .map_err(|e| MechError::RandomSource(e.to_string()))?;
            if raw < UNBIASED_ZONE {
                let value = (raw % SIDES as u32) as u8 + 1;
                return DieFace::new(value)
                    .ok_or_else(|| MechError::RandomSource(format!("face {value} out of range")));
            }
        }
    }
}

/// Replays a fixed sequence of faces, failing once it runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<DieFace>,
}

impl ScriptedDice {
    /// Build a script from raw values. Every value must be in `1..=10`.
    pub fn from_faces(values: &[u8]) -> MechResult<Self> {
        let faces = values
            .iter()
            .map(|&v| {
                DieFace::new(v).ok_or_else(|| {
                    MechError::InvalidArgument(format!("die face {v} is outside 1..=10"))
                })
            })
            .collect::<MechResult<VecDeque<_>>>()?;
        Ok(Self { faces })
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_d10(&mut self) -> MechResult<DieFace> {
        self.faces
            .pop_front()
            .ok_or_else(|| MechError::RandomSource("dice script exhausted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn std_rng_produces_valid_faces() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let face = rng.roll_d10().unwrap();
            assert!((1..=10).contains(&face.value()));
        }
    }

    #[test]
    fn std_rng_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.roll_d10().unwrap(), b.roll_d10().unwrap());
        }
    }

    #[test]
    fn os_dice_produce_valid_faces() {
        let mut dice = OsDice;
        for _ in 0..50 {
            let face = dice.roll_d10().unwrap();
            assert!((1..=10).contains(&face.value()));
        }
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut dice = ScriptedDice::from_faces(&[3, 10, 1]).unwrap();
        assert_eq!(dice.remaining(), 3);
        assert_eq!(dice.roll_d10().unwrap().value(), 3);
        assert_eq!(dice.roll_d10().unwrap().value(), 10);
        assert_eq!(dice.roll_d10().unwrap().value(), 1);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn scripted_exhaustion_is_an_error() {
        let mut dice = ScriptedDice::from_faces(&[]).unwrap();
        assert!(matches!(dice.roll_d10(), Err(MechError::RandomSource(_))));
    }

    #[test]
    fn scripted_rejects_bad_faces() {
        assert!(matches!(
            ScriptedDice::from_faces(&[4, 0]),
            Err(MechError::InvalidArgument(_))
        ));
        assert!(ScriptedDice::from_faces(&[11]).is_err());
    }
}
