pub mod roll;
pub mod set;
pub mod settings;
pub mod sheet;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use vtm_mechanics::{DiceSource, OsDice, ScriptedDice};
use vtm_session::{JsonFileStore, RollService};

/// Options shared by every subcommand.
pub struct Context {
    pub store: PathBuf,
    pub character: String,
    pub seed: Option<u64>,
    pub faces: Option<Vec<u8>>,
}

impl Context {
    /// Open the store file and wrap it in a roll service using its settings.
    fn service(&self) -> Result<RollService<JsonFileStore>, String> {
        let store = JsonFileStore::open(&self.store).map_err(|e| e.to_string())?;
        let settings = store.settings().clone();
        Ok(RollService::new(store, settings))
    }

    /// Scripted faces win over a seed; with neither, roll from OS entropy.
    fn dice(&self) -> Result<Box<dyn DiceSource>, String> {
        if let Some(faces) = &self.faces {
            let script = ScriptedDice::from_faces(faces).map_err(|e| e.to_string())?;
            return Ok(Box::new(script));
        }
        let dice: Box<dyn DiceSource> = match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(OsDice),
        };
        Ok(dice)
    }
}
