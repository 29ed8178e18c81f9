//! Shared core for Phonics Quest.
//!
//! Curriculum content (stages, words, phonemes) and per-child progress
//! tracking: unlock gating, stars, word mastery, currency and adaptive
//! difficulty, persisted through a pluggable key-value adapter.

pub mod catalog;
pub mod config;
pub mod error;
pub mod progress;
pub mod storage;

pub use catalog::{Catalog, CollectionItem, Stage, StageDisplay, Word};
pub use config::PhonicsConfig;
pub use error::PhonicsError;
pub use progress::{
    BlendOutcome, DifficultyTier, ProgressState, ProgressStore, SaveStatus, StageCompletion,
    StageProgress, StageSummary,
};
pub use storage::{FileAdapter, MemoryAdapter, PersistenceAdapter, PROGRESS_KEY};
