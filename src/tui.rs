//! TUI (Terminal User Interface) module for Word Scramble
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiModel`: everything shown on screen plus key handling, no terminal
//! - `TuiInterface`: owns the terminal and plugs the model into the game loop
//!
//! # State Machine
//! - `EnteringWord` → (rejected submission) → `ShowingAlert` → back to `EnteringWord`

use crate::game_state::{GameInterface, GameState, UserAction};
use crate::validator::Rejection;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;

const MAX_INPUT_LENGTH: usize = 24;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const ALERT_WIDTH_PERCENT: u16 = 60;
const ALERT_HEIGHT: u16 = 7;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const COUNT_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

#[derive(Debug, Clone, PartialEq, Eq)]
enum TuiState {
    EnteringWord,
    /// A rejected submission waiting to be dismissed
    ShowingAlert { title: String, message: String },
}

/// Screen contents and input handling, independent of the terminal.
#[derive(Debug)]
pub struct TuiModel {
    game: Option<GameState>,
    current_input: String,
    state: TuiState,
    error_message: String,
    status: String,
}

impl Default for TuiModel {
    fn default() -> Self {
        Self {
            game: None,
            current_input: String::new(),
            state: TuiState::EnteringWord,
            error_message: String::new(),
            status: "Ready".to_string(),
        }
    }
}

impl TuiModel {
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn is_showing_alert(&self) -> bool {
        matches!(self.state, TuiState::ShowingAlert { .. })
    }

    /// Applies one key press. Returns an action once the player asks for one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match self.state {
            TuiState::EnteringWord => self.handle_word_input(key),
            TuiState::ShowingAlert { .. } => {
                self.handle_alert_input(key);
                None
            }
        }
    }

    fn handle_word_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        debug_log!(
            "handle_word_input() - Processing key: {:?}, current_input: '{}'",
            key.code,
            self.current_input
        );

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r' | 'R') => {
                    info_log!("handle_word_input() - Ctrl-R pressed, returning Reset");
                    Some(UserAction::Reset)
                }
                KeyCode::Char('c' | 'C') => Some(UserAction::Exit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) if c.is_alphabetic() => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    debug_log!("handle_word_input() - Ignoring character with Alt");
                } else if self.current_input.chars().count() < MAX_INPUT_LENGTH {
                    self.current_input.extend(c.to_lowercase());
                } else {
                    self.error_message =
                        format!("Words are at most {MAX_INPUT_LENGTH} letters long!");
                }
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter => {
                let word = std::mem::take(&mut self.current_input);
                info_log!("handle_word_input() - Enter pressed, submitting '{}'", word);
                return Some(UserAction::Submit(word));
            }
            KeyCode::Tab => return Some(UserAction::ToggleHardMode),
            KeyCode::Esc => {
                info_log!("handle_word_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            _ => {
                debug_log!("handle_word_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_alert_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.state = TuiState::EnteringWord;
            self.status = "Try another word".to_string();
        }
    }

    fn show_game(&mut self, state: &GameState) {
        self.game = Some(state.clone());
    }

    fn show_accepted(&mut self, word: &str, state: &GameState) {
        self.show_game(state);
        self.status = format!("Accepted '{word}' (+{})", word.chars().count());
    }

    fn show_rejection(&mut self, rejection: &Rejection) {
        self.state = TuiState::ShowingAlert {
            title: rejection.title().to_string(),
            message: rejection.message(),
        };
        self.status = rejection.title().to_string();
    }

    fn show_new_game(&mut self, state: &GameState) {
        self.show_game(state);
        self.current_input.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringWord;
        self.status = format!("New game - root word {}", state.root_word().to_uppercase());
    }

    /// Render the complete UI layout.
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Root word
                Constraint::Length(3), // Score and mode
                Constraint::Length(3), // Input field
                Constraint::Min(5),    // Accepted words
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        self.render_score(f, chunks[1]);
        self.render_input(f, chunks[2]);
        self.render_used_words(f, chunks[3]);
        self.render_status(f, chunks[4]);
        self.render_instructions(f, chunks[5]);

        if let TuiState::ShowingAlert { title, message } = &self.state {
            Self::render_alert(f, title, message);
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let root = self
            .game
            .as_ref()
            .map_or_else(String::new, |g| g.root_word().to_uppercase());
        let title = Paragraph::new(root)
            .style(HEADER_STYLE)
            .block(Block::default().title("Word Scramble").borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_score(&self, f: &mut Frame, area: Rect) {
        let (score, hard_mode) = self
            .game
            .as_ref()
            .map_or((0, false), |g| (g.score(), g.hard_mode()));
        let mode = if hard_mode {
            Span::styled("HARD", ERROR_STYLE.add_modifier(Modifier::BOLD))
        } else {
            Span::raw("normal")
        };
        let line = Line::from(vec![
            Span::styled(format!("Score: {score}"), SUCCESS_STYLE),
            Span::raw("  |  Mode: "),
            mode,
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::raw("> "),
            Span::styled(self.current_input.as_str(), INFO_STYLE),
        ];
        if matches!(self.state, TuiState::EnteringWord) {
            spans.push(Span::styled("_", Style::default().fg(Color::Gray)));
        }
        if !self.error_message.is_empty() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(self.error_message.as_str(), ERROR_STYLE));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Enter your word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_used_words(&self, f: &mut Frame, area: Rect) {
        let words = self.game.as_ref().map_or(&[][..], GameState::used_words);
        let lines: Vec<Line> = words
            .iter()
            .map(|word| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", word.chars().count()), COUNT_STYLE),
                    Span::raw(" "),
                    Span::raw(word.as_str()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(format!("Words ({})", words.len()))
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status_text = if self.status.is_empty() {
            "Ready"
        } else {
            self.status.as_str()
        };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(&self, f: &mut Frame, area: Rect) {
        let text = match self.state {
            TuiState::EnteringWord => {
                "ENTER: Submit | TAB: Toggle hard mode | CTRL-R: New game | ESC: Quit"
            }
            TuiState::ShowingAlert { .. } => "ENTER/ESC: Dismiss",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_alert(f: &mut Frame, title: &str, message: &str) {
        let area = centered_rect(ALERT_WIDTH_PERCENT, ALERT_HEIGHT, f.area());
        let lines = vec![
            Line::from(Span::styled(message, ERROR_STYLE)),
            Line::from(""),
            Line::from(Span::styled("Press ENTER to continue", Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(title).borders(Borders::ALL).style(INFO_STYLE));
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

/// A rectangle `percent_x` wide and `height` tall, centered in `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = u32::from(area.width) * u32::from(percent_x.min(100)) / 100;
    let width = u16::try_from(width).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn is_garbage_char(c: char) -> bool {
    c == '\u{FFFD}' || ((c as u32) < ASCII_CONTROL_CHAR_THRESHOLD && c != '\t')
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input, and feeds key presses through a
/// [`TuiModel`].
pub struct TuiInterface<B: Backend = CrosstermBackend<io::Stdout>> {
    terminal: Terminal<B>,
    model: TuiModel,
    owns_terminal: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            model: TuiModel::default(),
            owns_terminal: true,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if !self.owns_terminal {
            return Ok(());
        }
        self.owns_terminal = false;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                if let KeyCode::Char(c) = key.code
                    && is_garbage_char(c)
                {
                    debug_log!("read_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(self.model.handle_key(key))
            }
            other => {
                debug_log!("read_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl<B: Backend> TuiInterface<B> {
    /// Wraps an already configured terminal, e.g. a `TestBackend`.
    pub fn with_terminal(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            model: TuiModel::default(),
            owns_terminal: false,
        }
    }

    #[must_use]
    pub fn model(&self) -> &TuiModel {
        &self.model
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Draw the current UI state to the terminal.
    pub fn draw(&mut self) -> io::Result<()> {
        let model = &self.model;
        self.terminal.draw(|f| model.render(f))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_game(&mut self, state: &GameState) {
        self.model.show_game(state);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.read_key() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input ({}), returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_accepted(&mut self, word: &str, state: &GameState) {
        self.model.show_accepted(word, state);
        self.draw_or_log();
    }

    fn display_rejection(&mut self, rejection: &Rejection) {
        self.model.show_rejection(rejection);
        self.draw_or_log();
    }

    fn display_new_game(&mut self, state: &GameState) {
        self.model.show_new_game(state);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.model.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl<B: Backend> Drop for TuiInterface<B> {
    fn drop(&mut self) {
        if self.owns_terminal {
            self.owns_terminal = false;
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}
