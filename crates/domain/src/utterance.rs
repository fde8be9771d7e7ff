//! Utterances and their classification.

use serde::{Deserialize, Serialize};

/// One unit of natural-language user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utterance(String);

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the utterance contains only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Utterance {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Utterance {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// What kind of turn the user took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Asking for information or an opinion. Never mutates state.
    Question,
    /// Requesting a device change.
    Command,
    /// Neither a question nor a recognised command.
    Statement,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question => f.write_str("question"),
            Self::Command => f.write_str("command"),
            Self::Statement => f.write_str("statement"),
        }
    }
}
