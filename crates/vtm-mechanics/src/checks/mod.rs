//! Checks built on the pool engine.
//!
//! - **Rouse**: one die, 6 or more passes; a failure costs a point of hunger.
//! - **Frenzy**: Composure + Resolve against difficulty 3.
//! - **Skill**: attribute + skill against a chosen difficulty.
//! - **Custom**: any pool, optionally spending willpower on a reroll.
//!
//! Every check except rouse rolls the character's current hunger as hunger
//! dice. None of them touch the sheet; the caller applies consequences.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceSource, DieFace, SUCCESS_THRESHOLD};
use crate::error::{MechError, MechResult};
use crate::resolution::{Outcome, RollRequest, RollResult};
use crate::sheet::CharacterSheet;

/// Difficulty of every frenzy check.
pub const FRENZY_DIFFICULTY: u32 = 3;

/// A roll the player can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollAction {
    /// Single die to see whether hunger rises.
    Rouse,
    /// Resist the Beast.
    Frenzy,
    /// Attribute + skill pool.
    Skill {
        /// Attribute name, e.g. "dexterity".
        attribute: String,
        /// Skill name, e.g. "stealth".
        skill: String,
        /// Successes needed.
        difficulty: i32,
    },
    /// Free-form pool.
    Custom {
        /// Total dice.
        pool: i32,
        /// Successes needed.
        difficulty: i32,
        /// Spend a willpower on a reroll.
        use_reroll: bool,
    },
}

impl RollAction {
    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rouse => "Rouse Check",
            Self::Frenzy => "Frenzy Check",
            Self::Skill { .. } => "Skill Check",
            Self::Custom { .. } => "Dice Roll",
        }
    }
}

/// Result of a rouse check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouseResult {
    /// The single face rolled.
    pub face: DieFace,
    /// Face was 6 or more; hunger holds.
    pub success: bool,
}

/// Roll a rouse check.
pub fn rouse_check(dice: &mut dyn DiceSource) -> MechResult<RouseResult> {
    let face = dice.roll_d10()?;
    Ok(RouseResult {
        face,
        success: face.value() >= SUCCESS_THRESHOLD,
    })
}

/// Result of a frenzy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrenzyResult {
    /// Composure rating used.
    pub composure: u32,
    /// Resolve rating used.
    pub resolve: u32,
    /// The underlying pool roll.
    pub roll: RollResult,
    /// The Beast took over.
    pub lost_control: bool,
}

/// Roll Composure + Resolve at the sheet's hunger against difficulty 3.
///
/// Failure and bestial failure both lose control; success and messy
/// critical keep it.
pub fn frenzy_check(
    sheet: &CharacterSheet,
    dice: &mut dyn DiceSource,
) -> MechResult<FrenzyResult> {
    let index = sheet.index();
    let composure = index.attribute("composure");
    let resolve = index.attribute("resolve");
    let roll = RollRequest {
        pool: pool_of(composure, resolve)?,
        difficulty: FRENZY_DIFFICULTY,
        hunger: sheet.hunger,
        use_reroll: false,
    }
    .resolve(dice)?;
    let lost_control = matches!(roll.outcome, Outcome::Failure | Outcome::BestialFailure);
    Ok(FrenzyResult {
        composure,
        resolve,
        roll,
        lost_control,
    })
}

/// Result of a skill check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResult {
    /// Attribute name as asked for.
    pub attribute: String,
    /// Attribute rating used (1 if unknown).
    pub attribute_value: u32,
    /// Skill name as asked for.
    pub skill: String,
    /// Skill rating used (0 if unknown).
    pub skill_value: u32,
    /// The underlying pool roll.
    pub roll: RollResult,
}

/// Roll attribute + skill at the sheet's hunger. Unknown names fall back to defaults.
pub fn skill_check(
    sheet: &CharacterSheet,
    attribute: &str,
    skill: &str,
    difficulty: i32,
    dice: &mut dyn DiceSource,
) -> MechResult<SkillResult> {
    let difficulty = checked_difficulty(difficulty)?;
    let index = sheet.index();
    let attribute_value = index.attribute(attribute);
    let skill_value = index.skill(skill);
    let roll = RollRequest {
        pool: pool_of(attribute_value, skill_value)?,
        difficulty,
        hunger: sheet.hunger,
        use_reroll: false,
    }
    .resolve(dice)?;
    Ok(SkillResult {
        attribute: attribute.to_string(),
        attribute_value,
        skill: skill.to_string(),
        skill_value,
        roll,
    })
}

/// Roll a free-form pool at the sheet's hunger.
pub fn custom_roll(
    sheet: &CharacterSheet,
    pool: i32,
    difficulty: i32,
    use_reroll: bool,
    dice: &mut dyn DiceSource,
) -> MechResult<RollResult> {
    let hunger = i32::try_from(sheet.hunger).unwrap_or(i32::MAX);
    RollRequest::new(pool, difficulty, hunger, use_reroll)?.resolve(dice)
}

fn pool_of(first: u32, second: u32) -> MechResult<u32> {
    first.checked_add(second).ok_or_else(|| {
        MechError::InvalidArgument(format!("pool of {first} + {second} dice is out of range"))
    })
}

fn checked_difficulty(difficulty: i32) -> MechResult<u32> {
    u32::try_from(difficulty)
        .ok()
        .filter(|&d| d >= 1)
        .ok_or_else(|| {
            MechError::InvalidArgument(format!("difficulty must be at least 1, got {difficulty}"))
        })
}
