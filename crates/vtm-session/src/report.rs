//! Roll reports and their plain-text rendering.

use serde::{Deserialize, Serialize};
use vtm_mechanics::checks::SkillResult;
use vtm_mechanics::{DiceKind, FrenzyResult, Outcome, Resource, RollResult, RouseResult};

use crate::config::SheetSettings;

/// What was rolled and how it came out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportDetail {
    /// A free-form pool.
    Pool(RollResult),
    /// An attribute + skill pool.
    Skill(SkillResult),
    /// A single rouse die.
    Rouse(RouseResult),
    /// A frenzy pool.
    Frenzy(FrenzyResult),
}

impl ReportDetail {
    /// The pool roll behind this detail, if any.
    pub fn roll(&self) -> Option<&RollResult> {
        match self {
            Self::Pool(roll) => Some(roll),
            Self::Skill(skill) => Some(&skill.roll),
            Self::Frenzy(frenzy) => Some(&frenzy.roll),
            Self::Rouse(_) => None,
        }
    }
}

/// A resource moved by a roll's consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Which resource.
    pub resource: Resource,
    /// Value before.
    pub from: u32,
    /// Value after.
    pub to: u32,
}

impl ResourceChange {
    /// Record a change.
    pub fn new(resource: Resource, from: u32, to: u32) -> Self {
        Self { resource, from, to }
    }
}

/// Everything a caller needs to show or log one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// Character the roll was made for.
    pub character_id: String,
    /// Human label of the action, e.g. "Rouse Check".
    pub label: String,
    /// The roll itself.
    pub detail: ReportDetail,
    /// Resource changes applied to the sheet.
    pub changes: Vec<ResourceChange>,
    /// The changes were written to the store.
    pub persisted: bool,
    /// Hunger after the roll.
    pub hunger: u32,
    /// Willpower after the roll.
    pub willpower: u32,
}

impl RollReport {
    /// Render as plain text. Die faces appear only with `show_roll_details`.
    pub fn render(&self, settings: &SheetSettings) -> String {
        let mut lines = Vec::new();
        match &self.detail {
            ReportDetail::Pool(roll) => {
                lines.push(pool_header(&self.label, roll));
                push_roll(&mut lines, roll, settings);
            }
            ReportDetail::Skill(skill) => {
                lines.push(format!(
                    "{}: {} ({}) + {} ({})",
                    self.label,
                    skill.attribute,
                    skill.attribute_value,
                    skill.skill,
                    skill.skill_value
                ));
                lines.push(pool_header("Pool", &skill.roll));
                push_roll(&mut lines, &skill.roll, settings);
            }
            ReportDetail::Rouse(rouse) => {
                lines.push(self.label.clone());
                let verdict = if rouse.success {
                    "Success - no Hunger gained"
                } else {
                    "Failure - Hunger increases by 1"
                };
                lines.push(format!("Roll: {} | {verdict}", rouse.face));
            }
            ReportDetail::Frenzy(frenzy) => {
                lines.push(self.label.clone());
                lines.push(format!(
                    "Pool: Composure ({}) + Resolve ({}) = {}, Hunger Dice: {}",
                    frenzy.composure, frenzy.resolve, frenzy.roll.pool, frenzy.roll.hunger_dice
                ));
                if settings.show_roll_details {
                    push_faces(&mut lines, &frenzy.roll);
                }
                lines.push(format!(
                    "Result: {} successes vs Difficulty {}",
                    frenzy.roll.successes, frenzy.roll.difficulty
                ));
                lines.push(if frenzy.lost_control {
                    "Frenzy! The Beast takes control.".to_string()
                } else {
                    "Resisted! You maintain control.".to_string()
                });
            }
        }

        for change in &self.changes {
            lines.push(format!(
                "{}: {} -> {}",
                change.resource, change.from, change.to
            ));
        }
        if !self.changes.is_empty() && !self.persisted {
            lines.push("(changes not saved)".to_string());
        }
        lines.join("\n")
    }
}

fn pool_header(label: &str, roll: &RollResult) -> String {
    format!(
        "{label} (Pool: {}, Difficulty: {}, Hunger: {})",
        roll.pool, roll.difficulty, roll.hunger_dice
    )
}

fn push_roll(lines: &mut Vec<String>, roll: &RollResult, settings: &SheetSettings) {
    if settings.show_roll_details {
        push_faces(lines, roll);
    }
    lines.push(format!(
        "Successes: {} | Result: {}",
        roll.successes, roll.outcome
    ));
    match roll.outcome {
        Outcome::MessyCritical => {
            lines.push("Messy Critical! The Beast taints your success.".to_string());
        }
        Outcome::BestialFailure => {
            lines.push("Bestial Failure! The Beast takes control.".to_string());
        }
        Outcome::Success | Outcome::Failure => {}
    }
    // hunger dice the outcome did not already account for
    if roll.bestial_failure && roll.outcome != Outcome::BestialFailure {
        lines.push("A hunger die rolled a 1, but the successes held.".to_string());
    }
    if roll.messy_critical && roll.outcome != Outcome::MessyCritical {
        lines.push("A hunger die rolled a 10 without a second critical.".to_string());
    }
}

fn push_faces(lines: &mut Vec<String>, roll: &RollResult) {
    for kind in [DiceKind::Regular, DiceKind::Hunger] {
        let faces: Vec<String> = roll
            .faces()
            .filter(|(k, _)| *k == kind)
            .map(|(_, face)| face.to_string())
            .collect();
        let shown = if faces.is_empty() {
            "-".to_string()
        } else {
            faces.join(" ")
        };
        lines.push(format!("{kind} Dice: {shown}"));
    }
}
