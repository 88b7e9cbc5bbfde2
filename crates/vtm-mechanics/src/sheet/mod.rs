//! Character sheets: identity, attributes, skills and resources.
//!
//! Sheets are stored as camelCase JSON. A stored record may be partial; it
//! is merged over [`CharacterSheet::default`] before being read, so fields
//! added later always have a value.

pub mod stats;

pub use stats::{DEFAULT_ATTRIBUTE, DEFAULT_SKILL, MAX_RATING, StatBlock, StatIndex};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MechError, MechResult};

/// Highest hunger a character can reach.
pub const HUNGER_MAX: u32 = 5;

/// Highest humanity rating.
pub const HUMANITY_MAX: u32 = 10;

/// Highest blood potency rating.
pub const BLOOD_POTENCY_MAX: u32 = 10;

const PHYSICAL_ATTRIBUTES: &[&str] = &["strength", "dexterity", "stamina"];
const SOCIAL_ATTRIBUTES: &[&str] = &["charisma", "manipulation", "composure"];
const MENTAL_ATTRIBUTES: &[&str] = &["intelligence", "wits", "resolve"];

const PHYSICAL_SKILLS: &[&str] = &[
    "athletics", "brawl", "drive", "firearms", "larceny", "melee", "stealth", "survival",
];
const SOCIAL_SKILLS: &[&str] = &[
    "animalKen",
    "etiquette",
    "insight",
    "intimidation",
    "leadership",
    "performance",
    "persuasion",
    "streetwise",
    "subterfuge",
];
const MENTAL_SKILLS: &[&str] = &[
    "academics",
    "awareness",
    "finance",
    "investigation",
    "medicine",
    "occult",
    "politics",
    "science",
    "technology",
];

/// A vampire's full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Clan, empty until chosen.
    pub clan: String,
    /// Generation, e.g. "13th".
    pub generation: String,
    /// Sire's name.
    pub sire: String,
    /// One-line concept.
    pub concept: String,
    /// Attribute ratings by category.
    pub attributes: StatBlock,
    /// Skill ratings by category.
    pub skills: StatBlock,
    /// Discipline ratings by name.
    pub disciplines: BTreeMap<String, u32>,
    /// Blood potency.
    pub blood_potency: u32,
    /// Humanity.
    pub humanity: u32,
    /// Current willpower.
    pub willpower: u32,
    /// Willpower capacity.
    pub willpower_max: u32,
    /// Current health.
    pub health: u32,
    /// Health capacity.
    pub health_max: u32,
    /// Per-box health state ("healthy", "superficial", "aggravated").
    pub health_status: Vec<String>,
    /// Current hunger, `0..=5`.
    pub hunger: u32,
    /// Predator type.
    pub predator_type: String,
    /// Long-term ambition.
    pub ambition: String,
    /// Short-term desire.
    pub desire: String,
    /// Chronicle tenets the character holds to.
    pub convictions: Vec<String>,
    /// People anchoring those convictions.
    pub touchstones: Vec<String>,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            name: "New Vampire".to_string(),
            clan: String::new(),
            generation: "13th".to_string(),
            sire: String::new(),
            concept: String::new(),
            attributes: StatBlock::uniform(
                PHYSICAL_ATTRIBUTES,
                SOCIAL_ATTRIBUTES,
                MENTAL_ATTRIBUTES,
                1,
            ),
            skills: StatBlock::uniform(PHYSICAL_SKILLS, SOCIAL_SKILLS, MENTAL_SKILLS, 0),
            disciplines: BTreeMap::new(),
            blood_potency: 1,
            humanity: 7,
            willpower: 5,
            willpower_max: 5,
            health: 3,
            health_max: 3,
            health_status: vec!["healthy".to_string(); 3],
            hunger: 2,
            predator_type: String::new(),
            ambition: String::new(),
            desire: String::new(),
            convictions: Vec::new(),
            touchstones: Vec::new(),
        }
    }
}

impl CharacterSheet {
    /// Read a stored record, filling anything it lacks from the default sheet.
    pub fn from_stored(stored: &Value) -> MechResult<Self> {
        let mut merged = serde_json::to_value(Self::default())
            .map_err(|e| MechError::InvalidSheet(e.to_string()))?;
        deep_merge(&mut merged, stored);
        serde_json::from_value(merged).map_err(|e| MechError::InvalidSheet(e.to_string()))
    }

    /// The record in its stored JSON form.
    pub fn to_stored(&self) -> MechResult<Value> {
        serde_json::to_value(self).map_err(|e| MechError::InvalidSheet(e.to_string()))
    }

    /// Flat stat lookup for building pools.
    pub fn index(&self) -> StatIndex {
        StatIndex::new(&self.attributes, &self.skills)
    }

    /// An attribute rating, or [`DEFAULT_ATTRIBUTE`] if the sheet lacks it.
    pub fn attribute(&self, name: &str) -> u32 {
        self.index().attribute(name)
    }

    /// A skill rating, or [`DEFAULT_SKILL`] if the sheet lacks it.
    pub fn skill(&self, name: &str) -> u32 {
        self.index().skill(name)
    }

    /// Set an existing attribute, capped at [`MAX_RATING`]. Returns the
    /// stored value, or `None` if no category holds it.
    pub fn set_attribute(&mut self, name: &str, value: u32) -> Option<u32> {
        self.attributes.set(name, value)
    }

    /// Set an existing skill, capped at [`MAX_RATING`].
    pub fn set_skill(&mut self, name: &str, value: u32) -> Option<u32> {
        self.skills.set(name, value)
    }

    /// Current value of a resource.
    pub fn resource(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Hunger => self.hunger,
            Resource::Willpower => self.willpower,
            Resource::WillpowerMax => self.willpower_max,
            Resource::Health => self.health,
            Resource::HealthMax => self.health_max,
            Resource::Humanity => self.humanity,
            Resource::BloodPotency => self.blood_potency,
        }
    }

    /// Set a resource, clamped to its range. Returns the stored value.
    ///
    /// Lowering a capacity drags the current value down with it.
    pub fn set_resource(&mut self, resource: Resource, value: u32) -> u32 {
        match resource {
            Resource::Hunger => self.hunger = value.min(HUNGER_MAX),
            Resource::Willpower => self.willpower = value.min(self.willpower_max),
            Resource::WillpowerMax => {
                self.willpower_max = value;
                self.willpower = self.willpower.min(value);
            }
            Resource::Health => self.health = value.min(self.health_max),
            Resource::HealthMax => {
                self.health_max = value;
                self.health = self.health.min(value);
            }
            Resource::Humanity => self.humanity = value.min(HUMANITY_MAX),
            Resource::BloodPotency => self.blood_potency = value.min(BLOOD_POTENCY_MAX),
        }
        self.resource(resource)
    }

    /// Add one hunger unless already at [`HUNGER_MAX`]. Returns true if it rose.
    pub fn raise_hunger(&mut self) -> bool {
        if self.hunger < HUNGER_MAX {
            self.hunger += 1;
            true
        } else {
            false
        }
    }

    /// Spend one willpower if any is left. Returns true if spent.
    pub fn spend_willpower(&mut self) -> bool {
        if self.willpower > 0 {
            self.willpower -= 1;
            true
        } else {
            false
        }
    }
}

/// A numeric resource on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Hunger, `0..=5`.
    Hunger,
    /// Current willpower.
    Willpower,
    /// Willpower capacity.
    WillpowerMax,
    /// Current health.
    Health,
    /// Health capacity.
    HealthMax,
    /// Humanity.
    Humanity,
    /// Blood potency.
    BloodPotency,
}

impl Resource {
    /// Parse a resource name such as "hunger", "willpower-max" or "bloodPotency".
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "hunger" => Some(Self::Hunger),
            "willpower" => Some(Self::Willpower),
            "willpowermax" => Some(Self::WillpowerMax),
            "health" => Some(Self::Health),
            "healthmax" => Some(Self::HealthMax),
            "humanity" => Some(Self::Humanity),
            "bloodpotency" => Some(Self::BloodPotency),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hunger => write!(f, "Hunger"),
            Self::Willpower => write!(f, "Willpower"),
            Self::WillpowerMax => write!(f, "Willpower Max"),
            Self::Health => write!(f, "Health"),
            Self::HealthMax => write!(f, "Health Max"),
            Self::Humanity => write!(f, "Humanity"),
            Self::BloodPotency => write!(f, "Blood Potency"),
        }
    }
}

/// Objects merge key by key; anything else in `overlay` replaces `base`.
fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) if value.is_object() => deep_merge(existing, value),
                    _ => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
