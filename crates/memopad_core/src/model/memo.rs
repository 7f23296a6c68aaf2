//! Memo domain model.
//!
//! # Responsibility
//! - Define the canonical record handed out by the external store.
//! - Provide the validated draft shape for create/update input.
//!
//! # Invariants
//! - `id` is stable and never reused for another memo.
//! - `created_at` is immutable after insert; `updated_at` equals `created_at`
//!   until the first update.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a memo record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemoId = Uuid;

/// Canonical memo record as returned by the external store.
///
/// Timestamps are epoch milliseconds minted by the store; the client never
/// fabricates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Stable global ID assigned by the store at insert.
    pub id: MemoId,
    /// Display title, non-empty after trimming.
    pub title: String,
    /// Free-form body text, may be empty.
    pub content: String,
    /// Insert timestamp in epoch milliseconds, immutable.
    pub created_at: i64,
    /// Last-update timestamp in epoch milliseconds. Equal to `created_at`
    /// until the first update.
    pub updated_at: i64,
}

/// Validation failure for memo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "memo title must not be empty"),
        }
    }
}

impl Error for MemoValidationError {}

/// User-supplied input for create/update operations.
///
/// Both fields are trimmed at construction so the store only ever persists
/// normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoDraft {
    pub title: String,
    pub content: String,
}

impl MemoDraft {
    /// Builds a draft from raw user input, trimming surrounding whitespace
    /// on both fields.
    pub fn new(title: impl AsRef<str>, content: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            content: content.as_ref().trim().to_string(),
        }
    }

    /// Checks the draft against the non-empty-title constraint.
    ///
    /// Callers must reject invalid drafts before any external request is
    /// issued.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.title.is_empty() {
            return Err(MemoValidationError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoDraft, MemoValidationError};

    #[test]
    fn draft_trims_both_fields() {
        let draft = MemoDraft::new("  Groceries \n", "\tMilk, eggs ");
        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.content, "Milk, eggs");
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let draft = MemoDraft::new("   \t\n", "content survives");
        assert_eq!(draft.validate(), Err(MemoValidationError::EmptyTitle));
    }

    #[test]
    fn empty_content_is_allowed() {
        let draft = MemoDraft::new("Title", "");
        assert!(draft.validate().is_ok());
    }
}
