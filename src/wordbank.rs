use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_START_WORDS: &str = include_str!("resources/start.txt");
pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// Root word used when the start-word list turns out to be empty.
pub const FALLBACK_ROOT_WORD: &str = "silkworm";

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read word list from '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A newline-delimited list of lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniform random pick, or [`FALLBACK_ROOT_WORD`] for an empty list.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.words
            .choose(rng)
            .map_or(FALLBACK_ROOT_WORD, String::as_str)
    }
}

impl FromIterator<String> for WordList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

#[must_use]
pub fn load_words_from_str(data: &str) -> WordList {
    data.lines().filter_map(normalize_line).collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<WordList, WordListError> {
    let path = path.as_ref();
    let io_error = |source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_line(&line.map_err(io_error)?) {
            words.push(word);
        }
    }
    Ok(WordList::new(words))
}

/// Loads `path` when given, otherwise the embedded list.
pub fn load_words_or_embedded(
    path: Option<&Path>,
    embedded: &str,
) -> Result<WordList, WordListError> {
    match path {
        Some(path) => load_words_from_file(path),
        None => Ok(load_words_from_str(embedded)),
    }
}
