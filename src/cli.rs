use crate::game_state::{GameInterface, GameState, UserAction};
use crate::validator::Rejection;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Word Scramble: build as many words as you can from the letters of a root word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of root words
    #[arg(short = 's', long = "start-words")]
    pub start_words_path: Option<PathBuf>,

    /// Path to a newline-delimited English dictionary
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<PathBuf>,

    /// Start with hard mode on (words must be longer than 3 letters)
    #[arg(long)]
    pub hard: bool,

    /// Use the plain line-based interface instead of the TUI
    #[arg(long)]
    pub plain: bool,

    /// Seed for choosing root words, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

const HARD_COMMAND: &str = ":hard";
const RESET_COMMAND: &str = ":reset";
const QUIT_COMMAND: &str = ":quit";

/// Maps one input line to an action. Anything that is not a command is a candidate word.
#[must_use]
pub fn parse_action(line: &str) -> UserAction {
    match line.trim().to_lowercase().as_str() {
        HARD_COMMAND => UserAction::ToggleHardMode,
        RESET_COMMAND => UserAction::Reset,
        QUIT_COMMAND => UserAction::Exit,
        _ => UserAction::Submit(line.to_string()),
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> UserAction {
    println!("\nEnter a word ({HARD_COMMAND} toggles hard mode, {RESET_COMMAND} new game, {QUIT_COMMAND} exits):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => UserAction::Exit,
        Ok(_) => parse_action(&input),
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            UserAction::Exit
        }
    }
}

#[must_use]
pub fn format_used_word(word: &str) -> String {
    format!("({}) {word}", word.chars().count())
}

pub fn display_game(state: &GameState) {
    let mode = if state.hard_mode() { "hard" } else { "normal" };
    println!(
        "Root word: {} | Score: {} | Mode: {mode}",
        state.root_word().to_uppercase(),
        state.score()
    );
    for word in state.used_words() {
        println!("  {}", format_used_word(word));
    }
}

pub fn display_accepted(word: &str, score: usize) {
    println!("Accepted '{word}' (+{}). Score: {score}", word.chars().count());
}

pub fn display_rejection(rejection: &Rejection) {
    println!("{}: {}", rejection.title(), rejection.message());
}

pub fn display_new_game_message(root_word: &str) {
    println!("New game started. Root word: {}", root_word.to_uppercase());
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and plays the game one line at a time
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_game(&mut self, state: &GameState) {
        display_game(state);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        Some(read_action(&mut self.reader))
    }

    fn display_accepted(&mut self, word: &str, state: &GameState) {
        display_accepted(word, state.score());
    }

    fn display_rejection(&mut self, rejection: &Rejection) {
        display_rejection(rejection);
    }

    fn display_new_game(&mut self, state: &GameState) {
        display_new_game_message(state.root_word());
        display_game(state);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["word-scramble"]).unwrap();
        assert_eq!(cli.start_words_path, None);
        assert_eq!(cli.dictionary_path, None);
        assert!(!cli.hard);
        assert!(!cli.plain);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "word-scramble",
            "-s",
            "start.txt",
            "--dictionary",
            "/usr/share/dict/words",
            "--hard",
            "--plain",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(cli.start_words_path, Some(PathBuf::from("start.txt")));
        assert_eq!(
            cli.dictionary_path,
            Some(PathBuf::from("/usr/share/dict/words"))
        );
        assert!(cli.hard);
        assert!(cli.plain);
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_parse_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["word-scramble", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_parse_action_commands() {
        assert_eq!(parse_action(":hard\n"), UserAction::ToggleHardMode);
        assert_eq!(parse_action("  :RESET "), UserAction::Reset);
        assert_eq!(parse_action(":quit"), UserAction::Exit);
    }

    #[test]
    fn test_parse_action_keeps_raw_word() {
        // Normalization is the session's job
        assert_eq!(
            parse_action("  Silk\n"),
            UserAction::Submit("  Silk\n".to_string())
        );
    }

    #[test]
    fn test_read_action_word() {
        let mut reader = Cursor::new("silk\n");
        assert_eq!(
            read_action(&mut reader),
            UserAction::Submit("silk\n".to_string())
        );
    }

    #[test]
    fn test_read_action_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), UserAction::Exit);
    }

    #[test]
    fn test_read_action_blank_line_is_a_submission() {
        let mut reader = Cursor::new("\n");
        assert!(matches!(read_action(&mut reader), UserAction::Submit(_)));
    }

    #[test]
    fn test_format_used_word() {
        assert_eq!(format_used_word("silk"), "(4) silk");
    }
}
