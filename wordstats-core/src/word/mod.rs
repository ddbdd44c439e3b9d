//! Word normalization.
//!
//! Every statistic must see byte-identical forms of the same token, so the
//! normalizer is the single place where raw input becomes a [`Word`].


use serde::Serialize;
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// A normalized token: lowercase, letters and digits only.
///
/// The empty word is valid. It is what a token made only of punctuation
/// normalizes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Strip every character that is not a letter or digit, then lowercase.
    pub fn normalize(raw: &str) -> Self {
        // Lowercasing may expand into combining marks (`İ` -> `i` + U+0307),
        // so the filter runs on the lowercased characters.
        let word = raw
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric())
            .collect();

        Self(word)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Each character of this word as a single-character word.
    pub fn letters(&self) -> impl Iterator<Item = Word> + '_ {
        self.0.chars().map(Word::from)
    }
}

impl From<char> for Word {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a chunk of text on whitespace and normalize every token.
///
/// Tokens that normalize to the empty word are kept so that counts match the
/// number of whitespace-delimited tokens.
pub fn words(text: &str) -> impl Iterator<Item = Word> + '_ {
    text.split_whitespace().map(Word::normalize)
}
