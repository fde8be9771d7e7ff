//! Text normalization and whole-token phrase matching.
//!
//! Both the command interpreter and the reconciler's prose scan work on
//! lowercase, diacritic-free tokens so that "Enciende las LUCES" and
//! "enciende las luces" match the same vocabulary.

use std::ops::Range;

/// Lowercase `text` and fold accented Latin letters to their base letter.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Normalized text split into alphanumeric tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    tokens: Vec<String>,
}

impl Tokens {
    /// Normalize and tokenize `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let tokens = normalize(text)
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();
        Self { tokens }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens in `range`, clamped to the available tokens.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        Self {
            tokens: self.tokens[start..end].to_vec(),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Token index of the first occurrence of `phrase` (space-separated words).
    #[must_use]
    pub fn find(&self, phrase: &str) -> Option<usize> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() || words.len() > self.tokens.len() {
            return None;
        }
        self.tokens
            .windows(words.len())
            .position(|window| window.iter().zip(&words).all(|(token, word)| token == word))
    }

    /// Whether `phrase` occurs anywhere.
    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        self.find(phrase).is_some()
    }

    /// Whether any of `phrases` occurs.
    #[must_use]
    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.contains(phrase))
    }

    /// Smallest first-occurrence index over all of `phrases`.
    #[must_use]
    pub fn first_of(&self, phrases: &[&str]) -> Option<usize> {
        phrases.iter().filter_map(|phrase| self.find(phrase)).min()
    }

    /// Every index at which a single-word entry of `words` occurs.
    #[must_use]
    pub fn positions_of(&self, words: &[&str]) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| words.contains(&token.as_str()))
            .map(|(index, _)| index)
            .collect()
    }
}
