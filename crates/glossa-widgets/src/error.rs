#![forbid(unsafe_code)]

use std::fmt;

/// A node's content could not be read or written.
///
/// Returned by [`Translatable`](crate::node::Translatable) implementations
/// and produced by the translator when a node is already borrowed or its
/// content panics. Never propagated past [`Translator`](crate::Translator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentError {
    message: String,
}

impl ContentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node content: {}", self.message)
    }
}

impl std::error::Error for ContentError {}
