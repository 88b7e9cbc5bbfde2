//! Roll results and their summaries.

use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::dice::{DiceKind, DieFace};

/// The full record of one pool roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Total dice in the pool.
    pub pool: u32,
    /// Successes needed.
    pub difficulty: u32,
    /// How many of the pool's dice were hunger dice.
    pub hunger_dice: u32,
    /// Whether a willpower reroll was requested.
    pub use_reroll: bool,
    /// Regular dice in roll order.
    pub regular: Vec<DieFace>,
    /// Hunger dice in roll order.
    pub hunger: Vec<DieFace>,
    /// Final success count including any critical bonus.
    pub successes: u32,
    /// Faces of 10 across both sub-pools.
    pub criticals: u32,
    /// Two or more criticals added their count to the successes.
    pub critical_bonus_applied: bool,
    /// A hunger die showed a 10.
    pub messy_critical: bool,
    /// A hunger die showed a 1.
    pub bestial_failure: bool,
    /// The classified outcome.
    pub outcome: Outcome,
}

impl RollResult {
    /// Regular die values as plain numbers.
    pub fn regular_values(&self) -> Vec<u8> {
        self.regular.iter().map(|f| f.value()).collect()
    }

    /// Hunger die values as plain numbers.
    pub fn hunger_values(&self) -> Vec<u8> {
        self.hunger.iter().map(|f| f.value()).collect()
    }

    /// Every die with the sub-pool it came from, regular dice first.
    pub fn faces(&self) -> impl Iterator<Item = (DiceKind, DieFace)> + '_ {
        self.regular
            .iter()
            .map(|&f| (DiceKind::Regular, f))
            .chain(self.hunger.iter().map(|&f| (DiceKind::Hunger, f)))
    }

    /// Returns true for success and messy critical.
    pub fn is_win(&self) -> bool {
        self.outcome.is_win()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |faces: &[DieFace]| {
            faces
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "[{} | {}] {} vs {}: {}",
            join(&self.regular),
            join(&self.hunger),
            self.successes,
            self.difficulty,
            self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::resolution::resolve_pool;

    fn roll(pool: i32, difficulty: i32, hunger: i32, faces: &[u8]) -> RollResult {
        let mut dice = ScriptedDice::from_faces(faces).unwrap();
        resolve_pool(pool, difficulty, hunger, false, &mut dice).unwrap()
    }

    #[test]
    fn faces_tagged_by_sub_pool() {
        let r = roll(3, 2, 1, &[6, 2, 10]);
        let kinds: Vec<_> = r.faces().map(|(k, f)| (k, f.value())).collect();
        assert_eq!(
            kinds,
            vec![
                (DiceKind::Regular, 6),
                (DiceKind::Regular, 2),
                (DiceKind::Hunger, 10)
            ]
        );
    }

    #[test]
    fn display() {
        let r = roll(3, 2, 1, &[6, 3, 1]);
        assert_eq!(r.to_string(), "[6, 3 | 1] 1 vs 2: Bestial Failure");
    }

    #[test]
    fn serializes_faces_as_numbers() {
        let r = roll(2, 1, 1, &[7, 10]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["regular"], serde_json::json!([7]));
        assert_eq!(json["hunger"], serde_json::json!([10]));
        assert_eq!(json["outcome"], "Success");
    }
}
