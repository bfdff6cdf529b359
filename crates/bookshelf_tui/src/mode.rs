//! Input modes for the terminal surface.
//!
//! # Responsibility
//! - Name the two key-dispatch contexts: list browsing and form editing.

/// Key-dispatch context for the single catalog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List has focus; command keys are live.
    Browse,
    /// Form has focus; keys type into the focused field.
    Edit,
}

impl Mode {
    /// Short label shown in the status line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Browse => "BROWSE",
            Self::Edit => "EDIT",
        }
    }
}
