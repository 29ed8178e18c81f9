//! Content Catalog
//!
//! Immutable curriculum table: stages, their display metadata and the
//! fifteen target words of each stage.
//!
//! ## Projections
//!
//! - Collection items: the first five words of a stage, phonemes flattened
//!   word-major. The collection sub-game spawns items in exactly this order.
//! - Battle words: all fifteen words in catalog order.
//!
//! The catalog is validated once at construction and refuses to build if any
//! stage breaks the word rules, so lookups never re-check content.

mod stages;

use crate::error::PhonicsError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Number of target words every stage carries
pub const WORDS_PER_STAGE: usize = 15;

/// Words at the head of a stage that feed the collection sub-game
pub const COLLECTION_WORD_COUNT: usize = 5;

/// Allowed phoneme chunks per word
pub const MIN_PHONEMES: usize = 2;
pub const MAX_PHONEMES: usize = 4;

/// A target word and its grapheme chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    /// Ordered chunks; concatenated they spell `text`
    pub phonemes: Vec<String>,
    /// Game-balance weight used by the battle sub-game
    pub damage: u32,
    /// Scaffold symbol shown next to the word
    pub hint: String,
}

impl Word {
    pub fn new(text: &str, phonemes: &[&str], damage: u32, hint: &str) -> Self {
        Self {
            text: text.to_string(),
            phonemes: phonemes.iter().map(|p| p.to_string()).collect(),
            damage,
            hint: hint.to_string(),
        }
    }
}

/// Presentation fields; passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDisplay {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub boss: String,
    #[serde(default)]
    pub color: String,
}

/// One themed curriculum unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: u32,
    pub name: String,
    /// Phonics rule label, e.g. "short a"
    pub pattern: String,
    #[serde(default)]
    pub display: StageDisplay,
    pub words: Vec<Word>,
}

/// A single phoneme pickup in the collection sub-game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub phoneme: String,
    pub word_index: usize,
    pub phoneme_index: usize,
    pub hint: String,
    pub word: String,
}

/// Validated, read-only stage table
#[derive(Debug, Clone)]
pub struct Catalog {
    stages: Vec<Stage>,
}

impl Catalog {
    /// Build a catalog, failing fast if any stage is malformed
    pub fn new(stages: Vec<Stage>) -> Result<Self, PhonicsError> {
        validate_stages(&stages)?;
        debug!("Catalog loaded with {} stages", stages.len());
        Ok(Self { stages })
    }

    /// The built-in six-stage curriculum
    pub fn builtin() -> Result<Self, PhonicsError> {
        let stages = stages::BUILTIN_STAGES
            .iter()
            .map(|def| Stage {
                id: def.id,
                name: def.name.to_string(),
                pattern: def.pattern.to_string(),
                display: StageDisplay {
                    theme: def.theme.to_string(),
                    boss: def.boss.to_string(),
                    color: def.color.to_string(),
                },
                words: def
                    .words
                    .iter()
                    .map(|(text, phonemes, damage, hint)| Word::new(text, phonemes, *damage, hint))
                    .collect(),
            })
            .collect();
        Self::new(stages)
    }

    /// Load a custom curriculum from a JSON array of stages
    pub fn from_json(json: &str) -> Result<Self, PhonicsError> {
        let stages: Vec<Stage> = serde_json::from_str(json)?;
        Self::new(stages)
    }

    pub fn get_stage(&self, stage_id: u32) -> Result<&Stage, PhonicsError> {
        // Ids are validated as 1..=N in order, so the id is the index + 1
        stage_id
            .checked_sub(1)
            .and_then(|idx| self.stages.get(idx as usize))
            .ok_or(PhonicsError::StageNotFound { stage_id })
    }

    /// All stages in definition order
    pub fn list_stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Phoneme spawn sequence for the collection sub-game
    pub fn get_collection_items(&self, stage_id: u32) -> Result<Vec<CollectionItem>, PhonicsError> {
        let stage = self.get_stage(stage_id)?;
        let items = stage
            .words
            .iter()
            .take(COLLECTION_WORD_COUNT)
            .enumerate()
            .flat_map(|(word_index, word)| {
                word.phonemes
                    .iter()
                    .enumerate()
                    .map(move |(phoneme_index, phoneme)| CollectionItem {
                        phoneme: phoneme.clone(),
                        word_index,
                        phoneme_index,
                        hint: word.hint.clone(),
                        word: word.text.clone(),
                    })
            })
            .collect();
        Ok(items)
    }

    /// Word pool for the battle sub-game
    pub fn get_battle_words(&self, stage_id: u32) -> Result<&[Word], PhonicsError> {
        Ok(&self.get_stage(stage_id)?.words)
    }

    pub fn stage_count(&self) -> u32 {
        self.stages.len() as u32
    }

    pub fn last_stage_id(&self) -> u32 {
        self.stage_count()
    }
}

fn validate_stages(stages: &[Stage]) -> Result<(), PhonicsError> {
    if stages.is_empty() {
        return Err(PhonicsError::InvalidCatalog("catalog has no stages".to_string()));
    }

    for (idx, stage) in stages.iter().enumerate() {
        let expected_id = idx as u32 + 1;
        if stage.id != expected_id {
            return Err(PhonicsError::InvalidCatalog(format!(
                "stage at position {} has id {}, expected {}",
                idx, stage.id, expected_id
            )));
        }
        validate_stage(stage)?;
    }

    Ok(())
}

fn validate_stage(stage: &Stage) -> Result<(), PhonicsError> {
    let invalid = |msg: String| PhonicsError::InvalidCatalog(format!("stage {}: {}", stage.id, msg));

    if stage.words.len() != WORDS_PER_STAGE {
        return Err(invalid(format!(
            "has {} words, expected {}",
            stage.words.len(),
            WORDS_PER_STAGE
        )));
    }

    let mut seen = HashSet::new();
    for word in &stage.words {
        if !seen.insert(word.text.as_str()) {
            return Err(invalid(format!("duplicate word '{}'", word.text)));
        }
        if !(MIN_PHONEMES..=MAX_PHONEMES).contains(&word.phonemes.len()) {
            return Err(invalid(format!(
                "word '{}' has {} phonemes, expected {}-{}",
                word.text,
                word.phonemes.len(),
                MIN_PHONEMES,
                MAX_PHONEMES
            )));
        }
        if word.phonemes.iter().any(|p| p.is_empty()) {
            return Err(invalid(format!("word '{}' has an empty phoneme", word.text)));
        }
        let joined: String = word.phonemes.concat();
        if joined != word.text {
            return Err(invalid(format!(
                "phonemes of '{}' spell '{}'",
                word.text, joined
            )));
        }
        if word.damage == 0 {
            return Err(invalid(format!("word '{}' has zero damage", word.text)));
        }
    }

    Ok(())
}
