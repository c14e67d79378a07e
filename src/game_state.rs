use crate::dictionary::Dictionary;
use crate::validator::{self, Rejection};
use crate::wordbank::WordList;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything one game needs to remember.
///
/// Mutation only happens through [`GameState::accept`] and the reset
/// methods, which keeps `score` equal to the summed length of
/// `used_words`. Deserialized snapshots are checked against the same
/// invariants before they become a `GameState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Snapshot")]
pub struct GameState {
    root_word: String,
    used_words: Vec<String>,
    score: usize,
    hard_mode: bool,
}

impl GameState {
    #[must_use]
    pub fn with_root_word(root_word: impl Into<String>) -> Self {
        Self {
            root_word: root_word.into(),
            used_words: Vec::new(),
            score: 0,
            hard_mode: false,
        }
    }

    #[must_use]
    pub fn root_word(&self) -> &str {
        &self.root_word
    }

    /// Accepted words, most recent first.
    #[must_use]
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn set_hard_mode(&mut self, hard_mode: bool) {
        self.hard_mode = hard_mode;
    }

    pub fn toggle_hard_mode(&mut self) -> bool {
        self.hard_mode = !self.hard_mode;
        self.hard_mode
    }

    /// Records a word that already passed [`validator::check`].
    pub fn accept(&mut self, word: &str) {
        self.used_words.insert(0, word.to_string());
        self.score += word.chars().count();
    }

    /// Starts a new game on `root_word`. Hard mode carries over.
    pub fn reset_to(&mut self, root_word: impl Into<String>) {
        *self = Self {
            root_word: root_word.into(),
            used_words: Vec::new(),
            score: 0,
            hard_mode: self.hard_mode,
        };
    }

    /// Draws a fresh root word from `start_words` and clears progress.
    pub fn reset<R: rand::Rng + ?Sized>(&mut self, start_words: &WordList, rng: &mut R) {
        let root_word = start_words.choose(rng).to_string();
        self.reset_to(root_word);
    }
}

/// Why a deserialized snapshot was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("score {score} does not match the {expected} letters of the used words")]
    ScoreMismatch { score: usize, expected: usize },
    #[error("used word '{0}' is empty or not spelled from the root word")]
    ImpossibleWord(String),
    #[error("used word '{0}' appears more than once")]
    DuplicateWord(String),
}

/// Unchecked wire form of [`GameState`].
#[derive(Deserialize)]
struct Snapshot {
    root_word: String,
    used_words: Vec<String>,
    score: usize,
    hard_mode: bool,
}

impl TryFrom<Snapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        for (i, word) in snapshot.used_words.iter().enumerate() {
            if word.is_empty() || !validator::is_possible(word, &snapshot.root_word) {
                return Err(SnapshotError::ImpossibleWord(word.clone()));
            }
            if !validator::is_original(word, &snapshot.used_words[i + 1..]) {
                return Err(SnapshotError::DuplicateWord(word.clone()));
            }
        }
        let expected = snapshot.used_words.iter().map(|w| w.chars().count()).sum();
        if snapshot.score != expected {
            return Err(SnapshotError::ScoreMismatch {
                score: snapshot.score,
                expected,
            });
        }
        Ok(Self {
            root_word: snapshot.root_word,
            used_words: snapshot.used_words,
            score: snapshot.score,
            hard_mode: snapshot.hard_mode,
        })
    }
}

/// Owns the game state together with what it needs to validate and
/// restart: start words, dictionary and the random source.
pub struct Session<D: Dictionary> {
    state: GameState,
    start_words: WordList,
    dictionary: D,
    rng: StdRng,
}

impl<D: Dictionary> Session<D> {
    pub fn new(start_words: WordList, dictionary: D, mut rng: StdRng) -> Self {
        let root_word = start_words.choose(&mut rng).to_string();
        info_log!(
            "Session::new() - {} start words, root word '{}'",
            start_words.len(),
            root_word
        );
        Self {
            state: GameState::with_root_word(root_word),
            start_words,
            dictionary,
            rng,
        }
    }

    /// Seeded sessions always pick the same sequence of root words.
    pub fn with_seed(start_words: WordList, dictionary: D, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(start_words, dictionary, rng)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Normalizes `input`, validates it and records it on success.
    ///
    /// A rejected word leaves the state untouched.
    pub fn submit(&mut self, input: &str) -> Result<String, Rejection> {
        let word = validator::normalize(input);
        if let Err(rejection) = validator::check(&word, &self.state, &self.dictionary) {
            debug_log!("Session::submit() - '{}' rejected: {:?}", word, rejection);
            return Err(rejection);
        }
        self.state.accept(&word);
        info_log!(
            "Session::submit() - '{}' accepted, score now {}",
            word,
            self.state.score()
        );
        Ok(word)
    }

    pub fn reset(&mut self) {
        self.state.reset(&self.start_words, &mut self.rng);
        info_log!("Session::reset() - new root word '{}'", self.state.root_word());
    }

    pub fn set_hard_mode(&mut self, hard_mode: bool) {
        self.state.set_hard_mode(hard_mode);
    }

    pub fn toggle_hard_mode(&mut self) -> bool {
        let hard_mode = self.state.toggle_hard_mode();
        info_log!("Session::toggle_hard_mode() - hard mode {}", hard_mode);
        hard_mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(String),
    ToggleHardMode,
    Reset,
    Exit,
}

/// Front end the game loop talks to. Implemented by the line-based CLI and
/// the terminal UI.
pub trait GameInterface {
    /// Show the whole board: root word, score, mode and accepted words.
    fn display_game(&mut self, state: &GameState);

    /// `None` means nothing actionable happened yet; the loop asks again.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_accepted(&mut self, word: &str, state: &GameState);

    fn display_rejection(&mut self, rejection: &Rejection);

    fn display_new_game(&mut self, state: &GameState);

    fn display_exit_message(&mut self);
}

pub fn game_loop<D, I>(session: &mut Session<D>, interface: &mut I)
where
    D: Dictionary,
    I: GameInterface + ?Sized,
{
    interface.display_game(session.state());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Submit(input) => match session.submit(&input) {
                Ok(word) => interface.display_accepted(&word, session.state()),
                Err(rejection) => interface.display_rejection(&rejection),
            },
            UserAction::ToggleHardMode => {
                session.toggle_hard_mode();
                interface.display_game(session.state());
            }
            UserAction::Reset => {
                session.reset();
                interface.display_new_game(session.state());
            }
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordListDictionary;
    use crate::wordbank::{FALLBACK_ROOT_WORD, load_words_from_str};

    fn session(start: &str) -> Session<WordListDictionary> {
        let dictionary = WordListDictionary::english(&load_words_from_str(
            "silk\nsilkworm\nmilk\nworm\nowl\nslim\nsoil\nmain\nmount",
        ));
        Session::with_seed(load_words_from_str(start), dictionary, Some(1))
    }

    fn assert_score_matches(state: &GameState) {
        let total: usize = state.used_words().iter().map(|w| w.chars().count()).sum();
        assert_eq!(state.score(), total);
    }

    /// Scripted front end that records what the loop showed it.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        accepted: Vec<String>,
        rejections: Vec<Rejection>,
        new_games: usize,
        exited: bool,
    }

    impl GameInterface for ScriptedInterface {
        fn display_game(&mut self, _state: &GameState) {}

        fn read_action(&mut self) -> Option<UserAction> {
            if self.actions.is_empty() {
                Some(UserAction::Exit)
            } else {
                Some(self.actions.remove(0))
            }
        }

        fn display_accepted(&mut self, word: &str, _state: &GameState) {
            self.accepted.push(word.to_string());
        }

        fn display_rejection(&mut self, rejection: &Rejection) {
            self.rejections.push(rejection.clone());
        }

        fn display_new_game(&mut self, _state: &GameState) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_accept_prepends_and_scores() {
        let mut state = GameState::with_root_word("silkworm");
        state.accept("silk");
        state.accept("worm");
        assert_eq!(state.used_words(), ["worm", "silk"]);
        assert_eq!(state.score(), 8);
    }

    #[test]
    fn test_reset_to_clears_progress_and_keeps_mode() {
        let mut state = GameState::with_root_word("silkworm");
        state.set_hard_mode(true);
        state.accept("silk");
        state.reset_to("mountain");
        assert_eq!(state.root_word(), "mountain");
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
        assert!(state.hard_mode());
    }

    #[test]
    fn test_reset_with_empty_list_uses_fallback() {
        let mut state = GameState::with_root_word("mountain");
        state.accept("main");
        let mut rng = StdRng::seed_from_u64(9);
        state.reset(&WordList::default(), &mut rng);
        assert_eq!(state.root_word(), FALLBACK_ROOT_WORD);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_toggle_hard_mode() {
        let mut state = GameState::with_root_word("silkworm");
        assert!(state.toggle_hard_mode());
        assert!(!state.toggle_hard_mode());
    }

    #[test]
    fn test_session_submit_silk() {
        let mut session = session("silkworm");
        assert_eq!(session.submit("silk"), Ok("silk".to_string()));
        assert_eq!(session.state().score(), 4);
        assert_eq!(session.state().used_words(), ["silk"]);
    }

    #[test]
    fn test_session_submit_normalizes() {
        let mut session = session("silkworm");
        assert_eq!(session.submit("  SILK\n"), Ok("silk".to_string()));
        assert_eq!(session.submit("Silk"), Err(Rejection::NotOriginal));
    }

    #[test]
    fn test_session_rejection_leaves_state_untouched() {
        let mut session = session("silkworm");
        session.submit("silk").unwrap();
        let before = session.state().clone();
        assert!(matches!(
            session.submit("silkworms"),
            Err(Rejection::NotPossible { .. })
        ));
        assert_eq!(session.submit("wilk"), Err(Rejection::NotReal));
        assert_eq!(session.submit("   "), Err(Rejection::Empty));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_session_hard_mode() {
        let mut session = session("silkworm");
        session.toggle_hard_mode();
        assert_eq!(session.submit("owl"), Err(Rejection::TooShort));
        assert_eq!(session.submit("silk"), Ok("silk".to_string()));
        session.toggle_hard_mode();
        assert_eq!(session.submit("owl"), Ok("owl".to_string()));
        assert_score_matches(session.state());
    }

    #[test]
    fn test_session_reset_draws_from_list() {
        let mut session = session("silkworm\nmountain");
        let _ = session.submit("main");
        let _ = session.submit("silk");
        session.reset();
        let state = session.state();
        assert!(["silkworm", "mountain"].contains(&state.root_word()));
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_session_with_empty_start_words() {
        let session = session("");
        assert_eq!(session.state().root_word(), FALLBACK_ROOT_WORD);
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let a = session("silkworm\nmountain\ntriangle\npainters");
        let b = session("silkworm\nmountain\ntriangle\npainters");
        assert_eq!(a.state().root_word(), b.state().root_word());
    }

    #[test]
    fn test_score_invariant_over_many_submissions() {
        let mut session = session("silkworm");
        for input in ["silk", "milk", "worm", "silk", "owl", "slim", "soil", "xyz", ""] {
            let _ = session.submit(input);
            assert_score_matches(session.state());
            for word in session.state().used_words() {
                assert!(validator::is_possible(word, session.state().root_word()));
            }
        }
        assert_eq!(session.state().used_words().len(), 6);
    }

    #[test]
    fn test_state_serializes() {
        let mut state = GameState::with_root_word("silkworm");
        state.accept("silk");
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(json.contains("\"root_word\":\"silkworm\""));
    }

    #[test]
    fn test_snapshot_with_wrong_score_is_refused() {
        let json = r#"{"root_word":"silkworm","used_words":["silk"],"score":9,"hard_mode":false}"#;
        let err = serde_json::from_str::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("score 9 does not match"));
    }

    #[test]
    fn test_snapshot_with_impossible_word_is_refused() {
        let json = r#"{"root_word":"silkworm","used_words":["silks"],"score":5,"hard_mode":false}"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());
    }

    #[test]
    fn test_snapshot_with_duplicate_word_is_refused() {
        let json =
            r#"{"root_word":"silkworm","used_words":["silk","silk"],"score":8,"hard_mode":true}"#;
        let err = serde_json::from_str::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_snapshot_error_messages() {
        assert_eq!(
            SnapshotError::ScoreMismatch {
                score: 3,
                expected: 4
            }
            .to_string(),
            "score 3 does not match the 4 letters of the used words"
        );
    }

    #[test]
    fn test_game_loop_dispatches_actions() {
        let mut session = session("silkworm");
        let mut interface = ScriptedInterface {
            actions: vec![
                UserAction::Submit("silk".to_string()),
                UserAction::Submit("silk".to_string()),
                UserAction::ToggleHardMode,
                UserAction::Submit("owl".to_string()),
                UserAction::Reset,
            ],
            ..ScriptedInterface::default()
        };

        game_loop(&mut session, &mut interface);

        assert_eq!(interface.accepted, ["silk"]);
        assert_eq!(
            interface.rejections,
            [Rejection::NotOriginal, Rejection::TooShort]
        );
        assert_eq!(interface.new_games, 1);
        assert!(interface.exited);
        assert_eq!(session.state().score(), 0);
        assert!(session.state().hard_mode());
    }
}
