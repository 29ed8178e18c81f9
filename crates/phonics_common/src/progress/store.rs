//! Progress Store
//!
//! Sole owner of the player's `ProgressState`. Loads once at construction,
//! applies gameplay events in memory and writes the whole state back through
//! the injected adapter after every mutation.
//!
//! Storage trouble never interrupts play: unreadable or incompatible saves
//! are replaced with a fresh state, and failed writes are reported through
//! `SaveStatus` while the in-memory state stays authoritative.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::state::{completion_reward, DifficultyTier, ProgressState, StageProgress, StageSummary};
use crate::catalog::Catalog;
use crate::error::PhonicsError;
use crate::storage::PersistenceAdapter;

/// Outcome of the write that follows every mutation
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    /// Applied in memory only
    NotSaved(PhonicsError),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    pub fn error(&self) -> Option<&PhonicsError> {
        match self {
            SaveStatus::Saved => None,
            SaveStatus::NotSaved(e) => Some(e),
        }
    }
}

/// Result of `record_blend_attempt`
#[derive(Debug)]
pub struct BlendOutcome {
    /// This attempt pushed the word over the mastery threshold
    pub newly_mastered: bool,
    pub save: SaveStatus,
}

/// Result of `complete_stage`
#[derive(Debug)]
pub struct StageCompletion {
    /// Stars after this completion
    pub stars: u8,
    pub currency_awarded: u64,
    /// Stage newly unlocked by this completion; None if it was already open
    pub unlocked_next: Option<u32>,
    pub save: SaveStatus,
}

pub struct ProgressStore {
    adapter: Box<dyn PersistenceAdapter>,
    state: ProgressState,
    stage_count: u32,
    last_save_error: Option<String>,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("state", &self.state)
            .field("stage_count", &self.stage_count)
            .field("last_save_error", &self.last_save_error)
            .finish()
    }
}

impl ProgressStore {
    /// Open the store over `adapter` for a catalog of `stage_count` stages
    pub fn open(adapter: impl PersistenceAdapter + 'static, stage_count: u32) -> Self {
        let state = Self::load_state(&adapter, stage_count);
        Self {
            adapter: Box::new(adapter),
            state,
            stage_count,
            last_save_error: None,
        }
    }

    pub fn for_catalog(catalog: &Catalog, adapter: impl PersistenceAdapter + 'static) -> Self {
        Self::open(adapter, catalog.stage_count())
    }

    fn load_state(adapter: &dyn PersistenceAdapter, stage_count: u32) -> ProgressState {
        let bytes = match adapter.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No saved progress, starting fresh");
                return ProgressState::fresh(stage_count);
            }
            Err(e) => {
                warn!("Could not read saved progress, starting fresh: {}", e);
                return ProgressState::fresh(stage_count);
            }
        };

        match ProgressState::from_json_bytes(&bytes) {
            Ok(mut state) => {
                state.repair(stage_count);
                debug!(
                    "Loaded progress: {} stages, {} currency",
                    state.stages.len(),
                    state.currency_balance
                );
                state
            }
            Err(e) => {
                warn!("Discarding incompatible saved progress: {}", e);
                ProgressState::fresh(stage_count)
            }
        }
    }

    fn save(&mut self) -> SaveStatus {
        let result = self
            .state
            .to_json_bytes()
            .and_then(|bytes| self.adapter.save(&bytes));

        match result {
            Ok(()) => {
                self.last_save_error = None;
                SaveStatus::Saved
            }
            Err(e) => {
                warn!("Progress not saved: {}", e);
                self.last_save_error = Some(e.to_string());
                SaveStatus::NotSaved(e)
            }
        }
    }

    fn entry_mut(&mut self, stage_id: u32) -> &mut StageProgress {
        self.state.stages.entry(stage_id).or_insert_with(StageProgress::locked)
    }

    // ========== Queries ==========

    /// Stored entry, or a locked default for ids never initialized
    pub fn get_stage_progress(&self, stage_id: u32) -> StageProgress {
        self.state
            .stages
            .get(&stage_id)
            .cloned()
            .unwrap_or_else(StageProgress::locked)
    }

    pub fn is_unlocked(&self, stage_id: u32) -> bool {
        self.state
            .stages
            .get(&stage_id)
            .map(|s| s.unlocked)
            .unwrap_or(false)
    }

    pub fn get_currency(&self) -> u64 {
        self.state.currency_balance
    }

    /// Recomputed from the current counters on every call
    pub fn get_difficulty_tier(&self, stage_id: u32) -> DifficultyTier {
        self.state
            .stages
            .get(&stage_id)
            .map(|s| s.difficulty_tier())
            .unwrap_or(DifficultyTier::Easy)
    }

    pub fn get_mastered_words(&self, stage_id: u32) -> BTreeSet<String> {
        self.state
            .stages
            .get(&stage_id)
            .map(|s| s.mastered_words.clone())
            .unwrap_or_default()
    }

    pub fn get_stars(&self, stage_id: u32) -> u8 {
        self.state.stages.get(&stage_id).map(|s| s.stars).unwrap_or(0)
    }

    pub fn get_stage_summary(&self, stage_id: u32) -> StageSummary {
        self.get_stage_progress(stage_id).summary()
    }

    pub fn accuracy(&self, stage_id: u32) -> f64 {
        self.state
            .stages
            .get(&stage_id)
            .map(|s| s.accuracy())
            .unwrap_or(0.0)
    }

    pub fn total_stars(&self) -> u32 {
        self.state.total_stars()
    }

    pub fn total_words_mastered(&self) -> u64 {
        self.state.total_words_mastered
    }

    /// Highest unlocked stage id within the catalog (stage 1 at minimum)
    pub fn highest_unlocked_stage(&self) -> u32 {
        (1..=self.stage_count)
            .rev()
            .find(|id| self.is_unlocked(*id))
            .unwrap_or(1)
    }

    pub fn stage_count(&self) -> u32 {
        self.stage_count
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Message of the most recent failed write, cleared by the next good one
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    // ========== Events ==========

    pub fn unlock_stage(&mut self, stage_id: u32) -> SaveStatus {
        self.entry_mut(stage_id).unlocked = true;
        self.save()
    }

    pub fn record_collection_complete(&mut self, stage_id: u32, items_collected: u32) -> SaveStatus {
        self.entry_mut(stage_id).record_collection(items_collected);
        self.save()
    }

    /// Record a blend attempt. Words outside the stage's list are tracked too.
    pub fn record_blend_attempt(&mut self, stage_id: u32, word: &str, success: bool) -> BlendOutcome {
        let newly_mastered = self.entry_mut(stage_id).record_blend(word, success);
        if success {
            self.state.total_words_mastered = self.state.total_words_mastered.saturating_add(1);
        }
        if newly_mastered {
            debug!("Stage {}: '{}' mastered", stage_id, word);
        }
        BlendOutcome {
            newly_mastered,
            save: self.save(),
        }
    }

    pub fn complete_stage(&mut self, stage_id: u32, score: u64) -> StageCompletion {
        self.complete_stage_at(stage_id, score, Utc::now())
    }

    /// `complete_stage` with an explicit completion time
    pub fn complete_stage_at(&mut self, stage_id: u32, score: u64, now: DateTime<Utc>) -> StageCompletion {
        let stars = self.entry_mut(stage_id).complete(score, now);

        let unlocked_next = if stage_id < self.stage_count {
            let next = stage_id + 1;
            let entry = self.entry_mut(next);
            if entry.unlocked {
                None
            } else {
                entry.unlocked = true;
                info!("Stage {} unlocked", next);
                Some(next)
            }
        } else {
            None
        };

        let currency_awarded = completion_reward(stars, score);
        self.state.currency_balance = self.state.currency_balance.saturating_add(currency_awarded);
        info!(
            "Stage {} complete: score={} stars={} +{} currency",
            stage_id, score, stars, currency_awarded
        );

        StageCompletion {
            stars,
            currency_awarded,
            unlocked_next,
            save: self.save(),
        }
    }

    pub fn add_currency(&mut self, amount: u64) -> SaveStatus {
        self.state.currency_balance = self.state.currency_balance.saturating_add(amount);
        self.save()
    }

    /// Replace all progress with a fresh state
    pub fn reset(&mut self) -> SaveStatus {
        info!("Resetting all progress");
        self.state = ProgressState::fresh(self.stage_count);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryAdapter;

    fn store() -> (ProgressStore, MemoryAdapter) {
        let adapter = MemoryAdapter::new();
        (ProgressStore::open(adapter.clone(), 6), adapter)
    }

    #[test]
    fn test_fresh_store() {
        let (store, adapter) = store();
        assert!(store.is_unlocked(1));
        assert!(!store.is_unlocked(2));
        assert_eq!(store.get_currency(), 0);
        assert_eq!(store.highest_unlocked_stage(), 1);
        // Opening alone does not write
        assert_eq!(adapter.write_count(), 0);
    }

    #[test]
    fn test_every_mutation_persists() {
        let (mut store, adapter) = store();
        store.unlock_stage(3);
        store.record_collection_complete(1, 12);
        store.record_blend_attempt(1, "cat", true);
        store.complete_stage(1, 100);
        store.add_currency(5);
        store.reset();
        assert_eq!(adapter.write_count(), 6);
    }

    #[test]
    fn test_unknown_stage_defaults() {
        let (store, _) = store();
        let progress = store.get_stage_progress(42);
        assert_eq!(progress, StageProgress::locked());
        assert!(!store.is_unlocked(42));
        assert_eq!(store.get_stars(42), 0);
        assert!(store.get_mastered_words(42).is_empty());
        assert_eq!(store.get_difficulty_tier(42), DifficultyTier::Easy);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let (mut store, _) = store();
        assert!(store.unlock_stage(4).is_saved());
        assert!(store.unlock_stage(4).is_saved());
        assert!(store.is_unlocked(4));
        assert_eq!(store.highest_unlocked_stage(), 4);
    }

    #[test]
    fn test_collection_keeps_max() {
        let (mut store, _) = store();
        store.record_collection_complete(1, 10);
        store.record_collection_complete(1, 4);
        assert_eq!(store.get_stage_progress(1).collected_item_count, 10);
    }

    #[test]
    fn test_blend_counts_global_counter() {
        let (mut store, _) = store();
        store.record_blend_attempt(2, "pig", true);
        store.record_blend_attempt(2, "pig", false);
        let outcome = store.record_blend_attempt(2, "pig", true);
        assert!(outcome.newly_mastered);
        assert!(outcome.save.is_saved());
        assert_eq!(store.total_words_mastered(), 2);
        assert!(store.get_mastered_words(2).contains("pig"));
    }

    #[test]
    fn test_complete_last_stage_unlocks_nothing() {
        let (mut store, _) = store();
        let completion = store.complete_stage(6, 0);
        assert_eq!(completion.unlocked_next, None);
        assert!(!store.state().stages.contains_key(&7));
    }

    #[test]
    fn test_completion_reward_saturates_balance() {
        let (mut store, _) = store();
        store.add_currency(u64::MAX);
        let completion = store.complete_stage(1, 100);
        assert_eq!(completion.currency_awarded, 10);
        assert!(completion.save.is_saved());
        assert_eq!(store.get_currency(), u64::MAX);
    }

    #[test]
    fn test_loaded_large_balance_survives_completion() {
        let json = format!(
            r#"{{"schemaVersion":1,"currencyBalance":{},"stages":{{}}}}"#,
            u64::MAX - 1
        );
        let mut store = ProgressStore::open(MemoryAdapter::with_bytes(json.as_bytes()), 6);
        store.complete_stage(1, 500);
        assert_eq!(store.get_currency(), u64::MAX);
    }

    #[test]
    fn test_unlocked_next_only_reports_new_unlocks() {
        let (mut store, _) = store();
        store.unlock_stage(2);
        let completion = store.complete_stage(1, 0);
        assert_eq!(completion.unlocked_next, None);
        assert!(store.is_unlocked(2));

        let completion = store.complete_stage(2, 0);
        assert_eq!(completion.unlocked_next, Some(3));
        let again = store.complete_stage(2, 0);
        assert_eq!(again.unlocked_next, None);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let (mut store, adapter) = store();
        adapter.set_fail_writes(true);

        let status = store.add_currency(40);
        assert!(!status.is_saved());
        assert!(status.error().unwrap().is_persistence());
        assert_eq!(store.get_currency(), 40);
        assert!(store.last_save_error().is_some());

        adapter.set_fail_writes(false);
        assert!(store.add_currency(2).is_saved());
        assert!(store.last_save_error().is_none());
        assert_eq!(store.get_currency(), 42);
    }

    #[test]
    fn test_unreadable_storage_starts_fresh() {
        let adapter = MemoryAdapter::new();
        adapter.set_fail_reads(true);
        let store = ProgressStore::open(adapter, 6);
        assert_eq!(store.state(), &ProgressState::fresh(6));
    }
}
