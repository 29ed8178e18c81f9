//! Persisted progress state and the pure rules that update it.
//!
//! ## Star Rating
//!
//! Accuracy is correct / total blend attempts for the stage (0 with no
//! attempts). On completion:
//! - >= 0.90: 3 stars
//! - >= 0.70: at least 2
//! - >= 0.50: at least 1
//! - otherwise unchanged
//!
//! Stars never go down.
//!
//! ## Difficulty Tier
//!
//! Easy until 5 blend attempts exist, then Hard at >= 0.85 accuracy,
//! Medium at >= 0.60, Easy below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::PhonicsError;

/// Bumped whenever the persisted layout changes incompatibly
pub const SCHEMA_VERSION: u32 = 1;

/// Correct blends of one word needed before it counts as mastered
pub const MASTERY_THRESHOLD: u32 = 2;

/// Blend attempts needed before the difficulty tier moves off Easy
pub const MIN_ATTEMPTS_FOR_TIER: u64 = 5;

pub const MAX_STARS: u8 = 3;

/// Currency per star on stage completion
pub const CURRENCY_PER_STAR: u64 = 50;

/// Score points per currency point on stage completion
pub const SCORE_PER_CURRENCY: u64 = 10;

/// Derive the new star count from accuracy and the current stars
pub fn rate_stars(accuracy: f64, current: u8) -> u8 {
    if accuracy >= 0.9 {
        MAX_STARS
    } else if accuracy >= 0.7 {
        current.max(2)
    } else if accuracy >= 0.5 {
        current.max(1)
    } else {
        current
    }
}

/// Currency awarded for completing a stage
pub fn completion_reward(stars: u8, score: u64) -> u64 {
    stars as u64 * CURRENCY_PER_STAR + score / SCORE_PER_CURRENCY
}

fn accuracy_of(correct: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

// ============================================================================
// Difficulty Tier
// ============================================================================

/// Adaptive difficulty inferred from blend accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

impl DifficultyTier {
    pub fn from_attempts(correct: u64, total: u64) -> Self {
        if total < MIN_ATTEMPTS_FOR_TIER {
            return Self::Easy;
        }
        let accuracy = accuracy_of(correct, total);
        if accuracy >= 0.85 {
            Self::Hard
        } else if accuracy >= 0.60 {
            Self::Medium
        } else {
            Self::Easy
        }
    }

    /// Numeric tier (0, 1, 2)
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Stage Progress
// ============================================================================

/// Correct/wrong blend counters for one word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAttempts {
    pub correct: u32,
    pub wrong: u32,
}

/// Per-stage progress record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageProgress {
    pub unlocked: bool,
    /// 0-3, never decreases
    #[serde(deserialize_with = "deserialize_stars")]
    pub stars: u8,
    pub best_score: u64,
    /// Stage completions
    pub attempts: u32,
    pub total_blend_attempts: u64,
    /// Always <= total_blend_attempts
    pub correct_blend_attempts: u64,
    pub mastered_words: BTreeSet<String>,
    /// Entries are created on the first attempt at a word
    pub word_attempt_counts: BTreeMap<String, WordAttempts>,
    pub collected_item_count: u32,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Accept any non-negative star count and clamp it, so one bad field
/// does not discard the whole save
fn deserialize_stars<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = u64::deserialize(deserializer)?;
    Ok(raw.min(MAX_STARS as u64) as u8)
}

/// Display projection of a stage's progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub unlocked: bool,
    pub stars: u8,
    pub best_score: u64,
    pub mastered_count: usize,
    pub attempts: u32,
}

impl StageProgress {
    /// Fresh locked entry
    pub fn locked() -> Self {
        Self::default()
    }

    /// Fresh entry, unlocked (stage 1)
    pub fn unlocked() -> Self {
        Self {
            unlocked: true,
            ..Self::default()
        }
    }

    /// Blend accuracy (0.0 with no attempts)
    pub fn accuracy(&self) -> f64 {
        accuracy_of(self.correct_blend_attempts, self.total_blend_attempts)
    }

    pub fn difficulty_tier(&self) -> DifficultyTier {
        DifficultyTier::from_attempts(self.correct_blend_attempts, self.total_blend_attempts)
    }

    pub fn is_mastered(&self, word: &str) -> bool {
        self.mastered_words.contains(word)
    }

    /// Record one blend attempt. Returns true if this attempt mastered the word.
    ///
    /// Wrong attempts never undo mastery and do not reset the correct count.
    pub fn record_blend(&mut self, word: &str, success: bool) -> bool {
        self.total_blend_attempts = self.total_blend_attempts.saturating_add(1);
        let counts = self.word_attempt_counts.entry(word.to_string()).or_default();

        if !success {
            counts.wrong = counts.wrong.saturating_add(1);
            return false;
        }

        self.correct_blend_attempts = self.correct_blend_attempts.saturating_add(1);
        counts.correct = counts.correct.saturating_add(1);
        if counts.correct >= MASTERY_THRESHOLD && !self.mastered_words.contains(word) {
            self.mastered_words.insert(word.to_string());
            return true;
        }
        false
    }

    /// Record collection completion, keeping the best item count
    pub fn record_collection(&mut self, items_collected: u32) {
        self.collected_item_count = self.collected_item_count.max(items_collected);
    }

    /// Apply a stage completion and return the resulting star count
    pub fn complete(&mut self, score: u64, now: DateTime<Utc>) -> u8 {
        self.attempts = self.attempts.saturating_add(1);
        self.best_score = self.best_score.max(score);
        self.completed_at = Some(now);
        self.stars = rate_stars(self.accuracy(), self.stars);
        self.stars
    }

    pub fn summary(&self) -> StageSummary {
        StageSummary {
            unlocked: self.unlocked,
            stars: self.stars,
            best_score: self.best_score,
            mastered_count: self.mastered_words.len(),
            attempts: self.attempts,
        }
    }

    /// Clamp values a hand-edited or older save may have broken
    fn repair(&mut self) {
        self.stars = self.stars.min(MAX_STARS);
        self.correct_blend_attempts = self.correct_blend_attempts.min(self.total_blend_attempts);
    }
}

// ============================================================================
// Progress State
// ============================================================================

/// Whole per-player progress blob, persisted as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub schema_version: u32,
    #[serde(default)]
    pub currency_balance: u64,
    /// Incremented on every correct blend
    #[serde(default)]
    pub total_words_mastered: u64,
    pub stages: BTreeMap<u32, StageProgress>,
}

impl ProgressState {
    /// Fresh state: every stage locked except stage 1
    pub fn fresh(stage_count: u32) -> Self {
        let stages = (1..=stage_count)
            .map(|id| {
                let entry = if id == 1 {
                    StageProgress::unlocked()
                } else {
                    StageProgress::locked()
                };
                (id, entry)
            })
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            currency_balance: 0,
            total_words_mastered: 0,
            stages,
        }
    }

    /// Parse persisted bytes, rejecting other schema versions
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PhonicsError> {
        let state: ProgressState = serde_json::from_slice(bytes)?;
        if state.schema_version != SCHEMA_VERSION {
            return Err(PhonicsError::Persistence(format!(
                "schema version {} does not match {}",
                state.schema_version, SCHEMA_VERSION
            )));
        }
        Ok(state)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, PhonicsError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Fill in missing stage entries and clamp out-of-range values.
    ///
    /// Entries beyond `stage_count` are left alone.
    pub fn repair(&mut self, stage_count: u32) {
        for id in 1..=stage_count {
            self.stages.entry(id).or_insert_with(|| {
                if id == 1 {
                    StageProgress::unlocked()
                } else {
                    StageProgress::locked()
                }
            });
        }
        if let Some(first) = self.stages.get_mut(&1) {
            first.unlocked = true;
        }
        for stage in self.stages.values_mut() {
            stage.repair();
        }
    }

    pub fn total_stars(&self) -> u32 {
        self.stages.values().map(|s| s.stars as u32).sum()
    }
}
