//! The roll service: dispatches roll actions and applies their consequences.
//!
//! Each action runs under a per-character lock from loading the record to
//! writing it back, so concurrent rolls for one character cannot lose a
//! hunger or willpower update. Side effects are best-effort: a record that
//! cannot be loaded or saved is logged and the roll report still returned.
//!
//! Sheets changed but not written (auto-save off, or a failed save) are kept
//! in memory and take precedence over the store until the next write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};
use vtm_mechanics::checks::{custom_roll, frenzy_check, rouse_check, skill_check};
use vtm_mechanics::{CharacterSheet, DiceSource, Resource, RollAction};

use crate::config::SheetSettings;
use crate::error::{SessionError, SessionResult};
use crate::report::{ReportDetail, ResourceChange, RollReport};
use crate::store::CharacterStore;

/// Performs rolls for characters held in a [`CharacterStore`].
#[derive(Debug)]
pub struct RollService<S> {
    store: Mutex<S>,
    settings: SheetSettings,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    unsaved: Mutex<HashMap<String, CharacterSheet>>,
}

impl<S: CharacterStore> RollService<S> {
    /// Create a service over a store.
    pub fn new(store: S, settings: SheetSettings) -> Self {
        Self {
            store: Mutex::new(store),
            settings,
            locks: Mutex::new(HashMap::new()),
            unsaved: Mutex::new(HashMap::new()),
        }
    }

    /// The settings rolls are performed with.
    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// The character's current sheet; a character with no record gets the default sheet.
    pub fn sheet(&self, id: &str) -> SessionResult<CharacterSheet> {
        let lock = self.character_lock(id)?;
        let _held = lock
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?;
        self.load(id)
    }

    /// Roll `action` for character `id` and apply its consequences.
    ///
    /// A failed rouse check raises hunger; a custom roll with a reroll spends
    /// willpower. Invalid roll arguments and dice failures are errors; store
    /// failures are not.
    pub fn perform(
        &self,
        id: &str,
        action: &RollAction,
        dice: &mut dyn DiceSource,
    ) -> SessionResult<RollReport> {
        let lock = self.character_lock(id)?;
        let _held = lock
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?;

        debug!(character = id, action = action.label(), "performing roll");

        let (mut sheet, available) = match self.load(id) {
            Ok(sheet) => (sheet, true),
            Err(e) => {
                warn!(
                    character = id,
                    error = %e,
                    "character record unavailable, rolling with defaults"
                );
                (CharacterSheet::default(), false)
            }
        };

        let detail = match action {
            RollAction::Rouse => ReportDetail::Rouse(rouse_check(dice)?),
            RollAction::Frenzy => ReportDetail::Frenzy(frenzy_check(&sheet, dice)?),
            RollAction::Skill {
                attribute,
                skill,
                difficulty,
            } => ReportDetail::Skill(skill_check(&sheet, attribute, skill, *difficulty, dice)?),
            RollAction::Custom {
                pool,
                difficulty,
                use_reroll,
            } => ReportDetail::Pool(custom_roll(&sheet, *pool, *difficulty, *use_reroll, dice)?),
        };
        if let Some(roll) = detail.roll() {
            debug!(character = id, result = %roll, "pool resolved");
        }

        let changes = if available {
            apply_consequences(&mut sheet, &detail)
        } else {
            Vec::new()
        };
        for change in &changes {
            info!(
                character = id,
                resource = %change.resource,
                from = change.from,
                to = change.to,
                "resource changed"
            );
        }

        let persisted = if changes.is_empty() {
            false
        } else if self.settings.auto_save {
            match self.save(id, &sheet) {
                Ok(()) => true,
                Err(e) => {
                    warn!(character = id, error = %e, "could not save character after roll");
                    self.keep_unsaved(id, &sheet)?;
                    false
                }
            }
        } else {
            self.keep_unsaved(id, &sheet)?;
            false
        };

        Ok(RollReport {
            character_id: id.to_string(),
            label: action.label().to_string(),
            detail,
            changes,
            persisted,
            hunger: sheet.hunger,
            willpower: sheet.willpower,
        })
    }

    /// Edit a character's sheet and save it.
    ///
    /// Explicit edits are always written, whatever `auto_save` says.
    pub fn update<T>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut CharacterSheet) -> SessionResult<T>,
    ) -> SessionResult<T> {
        let lock = self.character_lock(id)?;
        let _held = lock
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?;
        let mut sheet = self.load(id)?;
        let value = edit(&mut sheet)?;
        self.save(id, &sheet)?;
        debug!(character = id, "sheet updated");
        Ok(value)
    }

    fn character_lock(&self, id: &str) -> SessionResult<Arc<Mutex<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?;
        Ok(Arc::clone(locks.entry(id.to_string()).or_default()))
    }

    fn load(&self, id: &str) -> SessionResult<CharacterSheet> {
        let pending = self
            .unsaved
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?
            .get(id)
            .cloned();
        if let Some(sheet) = pending {
            return Ok(sheet);
        }
        let stored = self
            .store
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?
            .get(id)?;
        match stored {
            Some(record) => Ok(CharacterSheet::from_stored(&record)?),
            None => Ok(CharacterSheet::default()),
        }
    }

    fn save(&self, id: &str, sheet: &CharacterSheet) -> SessionResult<()> {
        let record = sheet.to_stored()?;
        self.store
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?
            .set(id, record)?;
        self.unsaved
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?
            .remove(id);
        Ok(())
    }

    fn keep_unsaved(&self, id: &str, sheet: &CharacterSheet) -> SessionResult<()> {
        self.unsaved
            .lock()
            .map_err(|_| SessionError::LockPoisoned(id.to_string()))?
            .insert(id.to_string(), sheet.clone());
        Ok(())
    }
}

/// Mutate the sheet for whatever the roll calls for and list what changed.
fn apply_consequences(sheet: &mut CharacterSheet, detail: &ReportDetail) -> Vec<ResourceChange> {
    let mut changes = Vec::new();
    match detail {
        ReportDetail::Rouse(rouse) if !rouse.success => {
            let from = sheet.hunger;
            if sheet.raise_hunger() {
                changes.push(ResourceChange::new(Resource::Hunger, from, sheet.hunger));
            }
        }
        ReportDetail::Pool(roll) if roll.use_reroll => {
            let from = sheet.willpower;
            if sheet.spend_willpower() {
                changes.push(ResourceChange::new(Resource::Willpower, from, sheet.willpower));
            }
        }
        _ => {}
    }
    changes
}
