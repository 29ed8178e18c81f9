//! Progress Module
//!
//! Per-player progress: stage unlock gating, star ratings, word mastery,
//! currency and adaptive difficulty.
//!
//! - `state`: the persisted blob and the pure update rules
//! - `store`: the stateful store that applies events and persists them

pub mod state;
pub mod store;

pub use state::{
    completion_reward, rate_stars, DifficultyTier, ProgressState, StageProgress, StageSummary,
    WordAttempts, MASTERY_THRESHOLD, SCHEMA_VERSION,
};
pub use store::{BlendOutcome, ProgressStore, SaveStatus, StageCompletion};
