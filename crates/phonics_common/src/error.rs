//! Error types for the phonics core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonicsError {
    #[error("Stage {stage_id} not found in catalog")]
    StageNotFound { stage_id: u32 },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PhonicsError {
    /// Catalog lookup failed; fatal to the call that raised it
    pub fn is_not_found(&self) -> bool {
        matches!(self, PhonicsError::StageNotFound { .. })
    }

    /// Store read/write failure; always recoverable
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            PhonicsError::Persistence(_) | PhonicsError::Io(_) | PhonicsError::Json(_)
        )
    }
}
