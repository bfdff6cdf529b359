//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record {id, title, author}.
//! - Distinguish unpersisted records from store-assigned ones.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never reused.
//! - An id of `UNSAVED_BOOK_ID` marks a record that has not been persisted.

use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for a catalog record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Sentinel id carried by records that have not been persisted yet.
pub const UNSAVED_BOOK_ID: BookId = 0;

/// Canonical catalog record.
///
/// Title and author are free-form text; the store enforces nothing about
/// them beyond NOT NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned row id; `UNSAVED_BOOK_ID` before persistence.
    pub id: BookId,
    /// Book title as entered by the user.
    pub title: String,
    /// Author name as entered by the user.
    pub author: String,
}

impl Book {
    /// Creates an unpersisted record; the store assigns the real id on insert.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::with_id(UNSAVED_BOOK_ID, title, author)
    }

    /// Creates a record with a known store-assigned id.
    ///
    /// Used by read paths and by callers editing an existing row.
    pub fn with_id(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }

    /// Returns whether this record carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_BOOK_ID
    }
}
