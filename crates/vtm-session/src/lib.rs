//! Character store and roll service for the V5 dice engine.
//!
//! Holds characters in a key-value [`CharacterStore`], runs roll actions
//! through [`RollService`] and applies their hunger and willpower
//! consequences, and renders [`RollReport`]s as plain text.

pub mod config;
pub mod error;
pub mod report;
pub mod service;
pub mod store;

pub use config::SheetSettings;
pub use error::{SessionError, SessionResult};
pub use report::{ReportDetail, ResourceChange, RollReport};
pub use service::RollService;
pub use store::{CharacterStore, JsonFileStore, MemoryStore};
