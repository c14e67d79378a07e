// Library interface for word-scramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod dictionary;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod validator;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use dictionary::{Dictionary, ENGLISH, WordListDictionary};
pub use game_state::{GameInterface, GameState, Session, SnapshotError, UserAction, game_loop};
pub use validator::{Rejection, check, is_long_enough, is_original, is_possible, is_real, normalize};
pub use wordbank::{
    FALLBACK_ROOT_WORD, WordList, WordListError, load_words_from_file, load_words_from_str,
};
