//! Pool-vs-difficulty resolution with a hunger sub-pool.
//!
//! Each die showing 6 or more is a success. Tens are criticals; two or more
//! criticals add the full critical count again as bonus successes. Hunger
//! dice count like regular dice but a 10 on one makes the critical messy and
//! a 1 on one can turn a failure bestial.
//!
//! Outcomes are checked in priority order: bestial failure, messy critical,
//! success, failure.

pub mod result;

pub use result::RollResult;

use serde::{Deserialize, Serialize};

use crate::dice::{DiceSource, DieFace, PoolSplit};
use crate::error::{MechError, MechResult};

/// Largest pool a single roll accepts.
pub const MAX_POOL: u32 = 100;

/// The classified outcome of a pool roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Successes met the difficulty.
    Success,
    /// Successes fell short.
    Failure,
    /// A hunger die rolled a critical alongside at least one other critical.
    MessyCritical,
    /// A hunger die rolled a 1 and successes fell short.
    BestialFailure,
}

impl Outcome {
    /// Classify a tally, first match wins.
    pub fn classify(tally: &Tally, difficulty: u32) -> Self {
        if tally.bestial_failure && tally.successes < difficulty {
            Self::BestialFailure
        } else if tally.messy_critical && tally.criticals >= 2 {
            Self::MessyCritical
        } else if tally.successes >= difficulty {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Success and messy critical both achieve the goal.
    pub fn is_win(self) -> bool {
        matches!(self, Self::Success | Self::MessyCritical)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::MessyCritical => write!(f, "Messy Critical"),
            Self::BestialFailure => write!(f, "Bestial Failure"),
        }
    }
}

/// Running counts accumulated while reading the dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Successes so far, including any critical bonus once applied.
    pub successes: u32,
    /// Faces of exactly 10 across both sub-pools.
    pub criticals: u32,
    /// A hunger die showed a 10.
    pub messy_critical: bool,
    /// A hunger die showed a 1.
    pub bestial_failure: bool,
}

impl Tally {
    fn count_regular(&mut self, face: DieFace) {
        if face.is_success() {
            self.successes += 1;
        }
        if face.is_critical() {
            self.criticals += 1;
        }
    }

    fn count_hunger(&mut self, face: DieFace) {
        self.count_regular(face);
        if face.is_critical() {
            self.messy_critical = true;
        }
        if face.is_one() {
            self.bestial_failure = true;
        }
    }

    /// Adds the whole critical count, not two per pair, once there are two or more.
    fn apply_critical_bonus(&mut self) -> bool {
        if self.criticals >= 2 {
            self.successes += self.criticals;
            true
        } else {
            false
        }
    }
}

/// A validated request to roll a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Total dice rolled.
    pub pool: u32,
    /// Successes needed.
    pub difficulty: u32,
    /// Current hunger; sets the number of hunger dice.
    pub hunger: u32,
    /// Whether the roller is spending willpower on a reroll.
    pub use_reroll: bool,
}

impl RollRequest {
    /// Validate raw roll parameters.
    ///
    /// Pool and hunger must be non-negative, the pool at most [`MAX_POOL`]
    /// and difficulty at least 1.
    pub fn new(pool: i32, difficulty: i32, hunger: i32, use_reroll: bool) -> MechResult<Self> {
        let pool = u32::try_from(pool).map_err(|_| {
            MechError::InvalidArgument(format!("pool size must be non-negative, got {pool}"))
        })?;
        let hunger = u32::try_from(hunger).map_err(|_| {
            MechError::InvalidArgument(format!("hunger must be non-negative, got {hunger}"))
        })?;
        let difficulty = u32::try_from(difficulty).map_err(|_| {
            MechError::InvalidArgument(format!("difficulty must be at least 1, got {difficulty}"))
        })?;
        let request = Self {
            pool,
            difficulty,
            hunger,
            use_reroll,
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> MechResult<()> {
        if self.difficulty == 0 {
            return Err(MechError::InvalidArgument(
                "difficulty must be at least 1, got 0".to_string(),
            ));
        }
        if self.pool > MAX_POOL {
            return Err(MechError::InvalidArgument(format!(
                "pool size must be at most {MAX_POOL}, got {}",
                self.pool
            )));
        }
        Ok(())
    }

    /// How the pool divides into regular and hunger dice.
    pub fn split(&self) -> PoolSplit {
        PoolSplit::new(self.pool, self.hunger)
    }

    /// Roll the pool and classify the outcome.
    pub fn resolve(&self, dice: &mut dyn DiceSource) -> MechResult<RollResult> {
        self.validate()?;

        let split = self.split();
        let regular = roll_many(dice, split.regular)?;
        let hunger = roll_many(dice, split.hunger)?;

        let mut tally = Tally::default();
        for &face in &regular {
            tally.count_regular(face);
        }
        for &face in &hunger {
            tally.count_hunger(face);
        }
        let critical_bonus_applied = tally.apply_critical_bonus();
        let outcome = Outcome::classify(&tally, self.difficulty);

        Ok(RollResult {
            pool: self.pool,
            difficulty: self.difficulty,
            hunger_dice: split.hunger,
            use_reroll: self.use_reroll,
            regular,
            hunger,
            successes: tally.successes,
            criticals: tally.criticals,
            critical_bonus_applied,
            messy_critical: tally.messy_critical,
            bestial_failure: tally.bestial_failure,
            outcome,
        })
    }
}

/// Roll a pool of d10s against a difficulty.
///
/// No dice are drawn if any argument is invalid. `use_reroll` is echoed in
/// the result; spending willpower is left to the caller.
pub fn resolve_pool(
    pool: i32,
    difficulty: i32,
    hunger: i32,
    use_reroll: bool,
    dice: &mut dyn DiceSource,
) -> MechResult<RollResult> {
    RollRequest::new(pool, difficulty, hunger, use_reroll)?.resolve(dice)
}

fn roll_many(dice: &mut dyn DiceSource, count: u32) -> MechResult<Vec<DieFace>> {
    (0..count).map(|_| dice.roll_d10()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scripted(faces: &[u8]) -> ScriptedDice {
        ScriptedDice::from_faces(faces).unwrap()
    }

    #[test]
    fn messy_critical_beats_bestial_when_successes_suffice() {
        // 3 regular dice then 2 hunger dice
        let mut dice = scripted(&[6, 3, 10, 10, 1]);
        let r = resolve_pool(5, 3, 2, false, &mut dice).unwrap();
        assert_eq!(r.regular_values(), vec![6, 3, 10]);
        assert_eq!(r.hunger_values(), vec![10, 1]);
        assert_eq!(r.criticals, 2);
        assert!(r.critical_bonus_applied);
        assert_eq!(r.successes, 5);
        assert!(r.messy_critical);
        assert!(r.bestial_failure);
        assert_eq!(r.outcome, Outcome::MessyCritical);
    }

    #[test]
    fn all_low_faces_fail() {
        let mut dice = scripted(&[1, 2, 3]);
        let r = resolve_pool(3, 6, 0, false, &mut dice).unwrap();
        assert_eq!(r.successes, 0);
        assert!(!r.bestial_failure);
        assert_eq!(r.outcome, Outcome::Failure);
    }

    #[test]
    fn bestial_failure_when_short() {
        let mut dice = scripted(&[7, 1]);
        let r = resolve_pool(2, 3, 1, false, &mut dice).unwrap();
        assert_eq!(r.successes, 1);
        assert_eq!(r.outcome, Outcome::BestialFailure);
    }

    #[test]
    fn hunger_one_ignored_when_successes_meet_difficulty() {
        let mut dice = scripted(&[7, 8, 1]);
        let r = resolve_pool(3, 2, 1, false, &mut dice).unwrap();
        assert!(r.bestial_failure);
        assert_eq!(r.outcome, Outcome::Success);
    }

    #[test]
    fn three_criticals_add_three() {
        let mut dice = scripted(&[10, 10, 10, 6, 2]);
        let r = resolve_pool(5, 5, 0, false, &mut dice).unwrap();
        assert_eq!(r.criticals, 3);
        assert_eq!(r.successes, 4 + 3);
        assert_eq!(r.outcome, Outcome::Success);
    }

    #[test]
    fn single_critical_gets_no_bonus() {
        let mut dice = scripted(&[10, 4]);
        let r = resolve_pool(2, 1, 0, false, &mut dice).unwrap();
        assert_eq!(r.successes, 1);
        assert!(!r.critical_bonus_applied);
    }

    #[test]
    fn regular_criticals_alone_are_not_messy() {
        let mut dice = scripted(&[10, 10, 3]);
        let r = resolve_pool(3, 2, 1, false, &mut dice).unwrap();
        assert!(!r.messy_critical);
        assert_eq!(r.outcome, Outcome::Success);
    }

    #[test]
    fn messy_critical_even_below_difficulty() {
        // Two criticals always clear a difficulty of 4 by themselves, so use 5.
        let mut dice = scripted(&[10, 10]);
        let r = resolve_pool(2, 5, 1, false, &mut dice).unwrap();
        assert_eq!(r.successes, 4);
        assert_eq!(r.outcome, Outcome::MessyCritical);
    }

    #[test]
    fn zero_pool_rolls_nothing() {
        let mut dice = scripted(&[]);
        let r = resolve_pool(0, 1, 3, false, &mut dice).unwrap();
        assert_eq!(r.hunger_dice, 0);
        assert_eq!(r.successes, 0);
        assert_eq!(r.outcome, Outcome::Failure);
    }

    #[test]
    fn reroll_flag_is_echoed() {
        let mut dice = scripted(&[6]);
        let r = resolve_pool(1, 1, 0, true, &mut dice).unwrap();
        assert!(r.use_reroll);
    }

    #[test]
    fn invalid_arguments_draw_no_dice() {
        let mut dice = scripted(&[6, 6]);
        assert!(matches!(
            resolve_pool(-1, 2, 0, false, &mut dice),
            Err(MechError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve_pool(2, 0, 0, false, &mut dice),
            Err(MechError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve_pool(2, 2, -3, false, &mut dice),
            Err(MechError::InvalidArgument(_))
        ));
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn zero_difficulty_rejected_on_direct_request() {
        let request = RollRequest {
            pool: 1,
            difficulty: 0,
            hunger: 0,
            use_reroll: false,
        };
        let mut dice = scripted(&[6]);
        assert!(request.resolve(&mut dice).is_err());
    }

    #[test]
    fn oversized_pool_rejected_before_rolling() {
        let mut dice = scripted(&[6]);
        assert!(matches!(
            resolve_pool(2_000_000_000, 2, 0, false, &mut dice),
            Err(MechError::InvalidArgument(_))
        ));
        let request = RollRequest {
            pool: MAX_POOL + 1,
            difficulty: 1,
            hunger: 0,
            use_reroll: false,
        };
        assert!(request.resolve(&mut dice).is_err());
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn exhausted_source_fails() {
        let mut dice = scripted(&[6, 6]);
        assert!(matches!(
            resolve_pool(3, 2, 0, false, &mut dice),
            Err(MechError::RandomSource(_))
        ));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "Success");
        assert_eq!(Outcome::Failure.to_string(), "Failure");
        assert_eq!(Outcome::MessyCritical.to_string(), "Messy Critical");
        assert_eq!(Outcome::BestialFailure.to_string(), "Bestial Failure");
        assert!(Outcome::MessyCritical.is_win());
        assert!(!Outcome::BestialFailure.is_win());
    }

    fn roll_inputs() -> impl Strategy<Value = (i32, i32, i32, Vec<u8>)> {
        (0i32..15, 0i32..8, 1i32..8).prop_flat_map(|(pool, hunger, difficulty)| {
            (
                Just(pool),
                Just(hunger),
                Just(difficulty),
                proptest::collection::vec(1u8..=10, pool as usize),
            )
        })
    }

    proptest! {
        #[test]
        fn pool_split_invariant((pool, hunger, difficulty, faces) in roll_inputs()) {
            let mut dice = scripted(&faces);
            let r = resolve_pool(pool, difficulty, hunger, false, &mut dice).unwrap();
            prop_assert_eq!(r.hunger_dice, hunger.min(pool) as u32);
            prop_assert_eq!(r.regular.len() + r.hunger.len(), pool as usize);
            prop_assert_eq!(r.hunger.len(), r.hunger_dice as usize);
        }

        #[test]
        fn successes_follow_counting_rule((pool, hunger, difficulty, faces) in roll_inputs()) {
            let mut dice = scripted(&faces);
            let r = resolve_pool(pool, difficulty, hunger, false, &mut dice).unwrap();
            let base = faces.iter().filter(|&&f| f >= 6).count() as u32;
            let tens = faces.iter().filter(|&&f| f == 10).count() as u32;
            let bonus = if tens >= 2 { tens } else { 0 };
            prop_assert_eq!(r.criticals, tens);
            prop_assert_eq!(r.successes, base + bonus);
        }

        #[test]
        fn hunger_flags_come_from_hunger_dice((pool, hunger, difficulty, faces) in roll_inputs()) {
            let mut dice = scripted(&faces);
            let r = resolve_pool(pool, difficulty, hunger, false, &mut dice).unwrap();
            prop_assert_eq!(r.bestial_failure, r.hunger_values().contains(&1));
            prop_assert_eq!(r.messy_critical, r.hunger_values().contains(&10));
        }

        #[test]
        fn seeded_rolls_are_reproducible(seed in any::<u64>(), pool in 0i32..12, hunger in 0i32..6) {
            let a = resolve_pool(pool, 2, hunger, false, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = resolve_pool(pool, 2, hunger, false, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
