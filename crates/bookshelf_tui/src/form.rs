//! Three-field edit form bound to the selected record.
//!
//! # Responsibility
//! - Hold the identifier/title/author text buffers and the focus pointer.
//! - Parse the identifier field on demand; parsing is the only validation
//!   the form performs.
//!
//! # Invariants
//! - Selecting a record replaces all three buffers with that record's
//!   fields; clearing resets all three and the focus.

use bookshelf_core::{Book, BookId};
use std::fmt::{Display, Formatter};

/// Focusable form fields, in visual order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Id,
    Title,
    Author,
}

impl FormField {
    /// Field label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Author => "Author",
        }
    }

    /// Next field in visual order, wrapping at the end.
    pub fn next(self) -> Self {
        match self {
            Self::Id => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Id,
        }
    }

    /// Previous field in visual order, wrapping at the start.
    pub fn prev(self) -> Self {
        match self {
            Self::Id => Self::Author,
            Self::Title => Self::Id,
            Self::Author => Self::Title,
        }
    }
}

/// Error produced when the identifier field does not hold an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    raw: String,
}

impl Display for IdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "identifier must be an integer, got `{}`", self.raw)
    }
}

impl std::error::Error for IdParseError {}

/// Text buffers and focus pointer for the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: String,
    pub title: String,
    pub author: String,
    pub focus: FormField,
}

impl FormState {
    /// Builds a form populated from one record's three fields.
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            focus: FormField::default(),
        }
    }

    /// Returns the buffer text for one field.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Title => &self.title,
            FormField::Author => &self.author,
        }
    }

    /// Appends one character to the focused field.
    pub fn push_char(&mut self, ch: char) {
        self.field_mut(self.focus).push(ch);
    }

    /// Removes the last character of the focused field.
    pub fn pop_char(&mut self) {
        self.field_mut(self.focus).pop();
    }

    /// Moves focus to the next field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Parses the identifier field as a store-assigned id.
    pub fn parse_id(&self) -> Result<BookId, IdParseError> {
        self.id.trim().parse::<BookId>().map_err(|_| IdParseError {
            raw: self.id.clone(),
        })
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
        }
    }
}
