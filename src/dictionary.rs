//! Dictionary lookups used for the final validation stage.
//!
//! The game only needs a yes/no answer for a single word in a given
//! language, so any backend (word list, embedded dictionary, remote spell
//! checker) can sit behind [`Dictionary`].

use crate::wordbank::WordList;
use std::collections::HashSet;

/// Language code every built-in list is written in.
pub const ENGLISH: &str = "en";

pub trait Dictionary {
    /// Returns `true` when `word` is a recognized word in `language`.
    fn is_word(&self, word: &str, language: &str) -> bool;
}

impl<D: Dictionary + ?Sized> Dictionary for &D {
    fn is_word(&self, word: &str, language: &str) -> bool {
        (**self).is_word(word, language)
    }
}

impl<D: Dictionary + ?Sized> Dictionary for Box<D> {
    fn is_word(&self, word: &str, language: &str) -> bool {
        (**self).is_word(word, language)
    }
}

/// Membership test against a fixed set of words in one language.
#[derive(Debug, Clone)]
pub struct WordListDictionary {
    language: String,
    words: HashSet<String>,
}

impl WordListDictionary {
    #[must_use]
    pub fn new(language: impl Into<String>, words: &WordList) -> Self {
        Self {
            language: language.into(),
            words: words.words().iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn english(words: &WordList) -> Self {
        Self::new(ENGLISH, words)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn is_word(&self, word: &str, language: &str) -> bool {
        language == self.language && self.words.contains(word)
    }
}
