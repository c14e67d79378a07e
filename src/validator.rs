use crate::dictionary::{Dictionary, ENGLISH};
use crate::game_state::GameState;
use thiserror::Error;

/// Hard mode only accepts words longer than this.
pub const HARD_MODE_MIN_EXCLUSIVE: usize = 3;

/// Why a candidate word was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Type a word first.")]
    Empty,
    #[error("Hard mode needs words longer than {} letters.", HARD_MODE_MIN_EXCLUSIVE)]
    TooShort,
    #[error("Be more original!")]
    NotOriginal,
    #[error("You can't spell that word from '{root}'!")]
    NotPossible { root: String },
    #[error("You can't just make them up, you know!")]
    NotReal,
}

impl Rejection {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Empty | Self::TooShort => "Word too short",
            Self::NotOriginal => "Word used already",
            Self::NotPossible { .. } => "Word not possible",
            Self::NotReal => "Word not recognized",
        }
    }

    /// The body text shown under [`Rejection::title`].
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Lowercases and trims surrounding whitespace and newlines.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

#[must_use]
pub fn is_long_enough(word: &str, hard_mode: bool) -> bool {
    let len = word.chars().count();
    len > 0 && (!hard_mode || len > HARD_MODE_MIN_EXCLUSIVE)
}

#[must_use]
pub fn is_original(word: &str, used_words: &[String]) -> bool {
    !used_words.iter().any(|used| used == word)
}

/// Multiset check: every letter of `word` must be drawn from a distinct
/// letter of `root`.
#[must_use]
pub fn is_possible(word: &str, root: &str) -> bool {
    let mut remaining: Vec<char> = root.chars().collect();
    for letter in word.chars() {
        match remaining.iter().position(|&c| c == letter) {
            Some(pos) => {
                remaining.swap_remove(pos);
            }
            None => return false,
        }
    }
    true
}

#[must_use]
pub fn is_real<D: Dictionary + ?Sized>(word: &str, dictionary: &D) -> bool {
    dictionary.is_word(word, ENGLISH)
}

/// Runs every check in order and stops at the first failure.
///
/// `word` must already be normalized.
pub fn check<D: Dictionary + ?Sized>(
    word: &str,
    state: &GameState,
    dictionary: &D,
) -> Result<(), Rejection> {
    if !is_long_enough(word, state.hard_mode()) {
        return Err(if word.is_empty() {
            Rejection::Empty
        } else {
            Rejection::TooShort
        });
    }
    if !is_original(word, state.used_words()) {
        return Err(Rejection::NotOriginal);
    }
    if !is_possible(word, state.root_word()) {
        return Err(Rejection::NotPossible {
            root: state.root_word().to_string(),
        });
    }
    if !is_real(word, dictionary) {
        return Err(Rejection::NotReal);
    }
    Ok(())
}
