//! Attribute and skill tables grouped by category.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Value returned for an attribute the sheet does not know.
pub const DEFAULT_ATTRIBUTE: u32 = 1;

/// Value returned for a skill the sheet does not know (untrained).
pub const DEFAULT_SKILL: u32 = 0;

/// Highest rating an attribute or skill can hold (five dots).
pub const MAX_RATING: u32 = 5;

/// Ratings split into physical, social and mental categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    /// Physical ratings.
    pub physical: BTreeMap<String, u32>,
    /// Social ratings.
    pub social: BTreeMap<String, u32>,
    /// Mental ratings.
    pub mental: BTreeMap<String, u32>,
}

impl StatBlock {
    /// Build a block with every listed name set to `value`.
    pub fn uniform(physical: &[&str], social: &[&str], mental: &[&str], value: u32) -> Self {
        let fill = |names: &[&str]| -> BTreeMap<String, u32> {
            names.iter().map(|n| (n.to_string(), value)).collect()
        };
        Self {
            physical: fill(physical),
            social: fill(social),
            mental: fill(mental),
        }
    }

    /// Categories in search order.
    pub fn categories(&self) -> [(&'static str, &BTreeMap<String, u32>); 3] {
        [
            ("physical", &self.physical),
            ("social", &self.social),
            ("mental", &self.mental),
        ]
    }

    /// Look a rating up by name, searching physical, social then mental.
    pub fn get(&self, name: &str) -> Option<u32> {
        let wanted = normalize(name);
        self.categories().into_iter().find_map(|(_, ratings)| {
            ratings
                .iter()
                .find(|(key, _)| normalize(key) == wanted)
                .map(|(_, v)| *v)
        })
    }

    /// Update the first rating matching `name`, capped at [`MAX_RATING`].
    ///
    /// Returns the stored value, or `None` if no category holds the name.
    pub fn set(&mut self, name: &str, value: u32) -> Option<u32> {
        let wanted = normalize(name);
        let slot = [&mut self.physical, &mut self.social, &mut self.mental]
            .into_iter()
            .find_map(|ratings| {
                ratings
                    .iter_mut()
                    .find(|(key, _)| normalize(key) == wanted)
                    .map(|(_, v)| v)
            })?;
        *slot = value.min(MAX_RATING);
        Some(*slot)
    }

    /// Flatten into a normalized name → value map; earlier categories win.
    pub fn flatten(&self) -> HashMap<String, u32> {
        let mut flat = HashMap::new();
        for (_, ratings) in self.categories() {
            for (key, value) in ratings {
                flat.entry(normalize(key)).or_insert(*value);
            }
        }
        flat
    }
}

/// Flat lookup over a sheet's attributes and skills, built once per check.
#[derive(Debug, Clone, Default)]
pub struct StatIndex {
    attributes: HashMap<String, u32>,
    skills: HashMap<String, u32>,
}

impl StatIndex {
    /// Index both tables.
    pub fn new(attributes: &StatBlock, skills: &StatBlock) -> Self {
        Self {
            attributes: attributes.flatten(),
            skills: skills.flatten(),
        }
    }

    /// An attribute rating, or [`DEFAULT_ATTRIBUTE`] if unknown.
    pub fn attribute(&self, name: &str) -> u32 {
        self.attributes
            .get(&normalize(name))
            .copied()
            .unwrap_or(DEFAULT_ATTRIBUTE)
    }

    /// A skill rating, or [`DEFAULT_SKILL`] if unknown.
    pub fn skill(&self, name: &str) -> u32 {
        self.skills
            .get(&normalize(name))
            .copied()
            .unwrap_or(DEFAULT_SKILL)
    }
}

/// Case- and separator-insensitive key: "Animal Ken", "animal_ken" and "animalKen" all match.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatBlock {
        let mut b = StatBlock::uniform(&["strength"], &["composure"], &["resolve"], 1);
        b.social.insert("animalKen".to_string(), 3);
        b
    }

    #[test]
    fn get_is_case_and_separator_insensitive() {
        let b = block();
        assert_eq!(b.get("Strength"), Some(1));
        assert_eq!(b.get("animal ken"), Some(3));
        assert_eq!(b.get("ANIMAL_KEN"), Some(3));
        assert_eq!(b.get("occult"), None);
    }

    #[test]
    fn earlier_category_wins() {
        let mut b = block();
        b.mental.insert("strength".to_string(), 4);
        assert_eq!(b.get("strength"), Some(1));
        assert_eq!(b.flatten()["strength"], 1);

        assert_eq!(b.set("strength", 2), Some(2));
        assert_eq!(b.physical["strength"], 2);
        assert_eq!(b.mental["strength"], 4);
    }

    #[test]
    fn set_unknown_is_rejected() {
        let mut b = block();
        assert_eq!(b.set("flight", 5), None);
        assert_eq!(b.get("flight"), None);
    }

    #[test]
    fn set_caps_at_five_dots() {
        let mut b = block();
        assert_eq!(b.set("Composure", u32::MAX), Some(MAX_RATING));
        assert_eq!(b.get("composure"), Some(MAX_RATING));
    }

    #[test]
    fn index_defaults() {
        let attributes = block();
        let skills = StatBlock::uniform(&["melee"], &[], &["occult"], 2);
        let index = StatIndex::new(&attributes, &skills);
        assert_eq!(index.attribute("Composure"), 1);
        assert_eq!(index.attribute("Charm"), DEFAULT_ATTRIBUTE);
        assert_eq!(index.skill("melee"), 2);
        assert_eq!(index.skill("Basket Weaving"), DEFAULT_SKILL);
    }
}
