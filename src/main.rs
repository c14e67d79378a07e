use std::io;
use std::process::ExitCode;

use word_scramble::cli::{CliInterface, parse_cli};
use word_scramble::logging::init_logging;
use word_scramble::tui::TuiInterface;
use word_scramble::wordbank::{EMBEDDED_DICTIONARY, EMBEDDED_START_WORDS, load_words_or_embedded};
use word_scramble::{Session, WordListDictionary, game_loop};

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Some(path) = init_logging() {
        log::info!("Logging to {}", path.display());
    }

    let start_words =
        match load_words_or_embedded(cli.start_words_path.as_deref(), EMBEDDED_START_WORDS) {
            Ok(words) => words,
            Err(e) => {
                log::error!("{e}");
                eprintln!("Couldn't load start words: {e}");
                return ExitCode::FAILURE;
            }
        };
    let dictionary_words =
        match load_words_or_embedded(cli.dictionary_path.as_deref(), EMBEDDED_DICTIONARY) {
            Ok(words) => words,
            Err(e) => {
                log::error!("{e}");
                eprintln!("Couldn't load dictionary: {e}");
                return ExitCode::FAILURE;
            }
        };
    log::info!(
        "Loaded {} start words and {} dictionary words",
        start_words.len(),
        dictionary_words.len()
    );

    let dictionary = WordListDictionary::english(&dictionary_words);
    if dictionary.is_empty() {
        log::warn!("Dictionary is empty, every word will be rejected");
        eprintln!("Warning: the dictionary has no words, every submission will be rejected.");
    }
    let mut session = Session::with_seed(start_words, dictionary, cli.seed);
    session.set_hard_mode(cli.hard);

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut session, &mut interface);
        return ExitCode::SUCCESS;
    }

    let mut interface = match TuiInterface::new() {
        Ok(interface) => interface,
        Err(e) => {
            log::error!("Failed to initialize terminal: {e}");
            eprintln!("Failed to initialize terminal: {e}");
            return ExitCode::FAILURE;
        }
    };
    game_loop(&mut session, &mut interface);
    if let Err(e) = interface.cleanup() {
        eprintln!("Failed to restore terminal: {e}");
        return ExitCode::FAILURE;
    }

    let state = session.state();
    println!(
        "Final score: {} ({} words from {})",
        state.score(),
        state.used_words().len(),
        state.root_word().to_uppercase()
    );
    ExitCode::SUCCESS
}
