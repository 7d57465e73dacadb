use std::time::Instant;

use crossterm::event::KeyCode;

use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::RenderState;
use crate::engine::{Reader, ReaderEvent};
use crate::ingest::{self, LoadedDocument};
use crate::session::{SessionStore, THEME_KEY};
use crate::ui::command::{command_to_app_event, parse_command};
use crate::ui::theme::{Theme, ThemeKind};

/// Speed change per keypress, in words per minute.
const WPM_STEP: i32 = 10;

/// Seek distance per arrow keypress, in percent of the sequence.
const SEEK_STEP_PERCENT: f64 = 5.0;

const READER_HELP: &str =
    "Space play/pause | Left/Right seek | Up/Down speed | [/] group | 0-9 jump | t theme | Esc back | q quit";
const COMMAND_HELP: &str = "@file.txt/.pdf/.epub load | @@ clipboard | Enter resume | :q quit";

/// Central coordinator: owns the engine and the session store, turns key
/// presses into engine operations and engine notifications into display
/// state.
pub struct App {
    pub mode: AppMode,
    engine: Reader,
    store: Box<dyn SessionStore>,
    theme: ThemeKind,
    command_input: String,
    status: Option<String>,
    // Display cache fed by drained engine notifications.
    group: Vec<String>,
    percent: f64,
    index: usize,
    total: usize,
    completed: bool,
}

impl App {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let theme = ThemeKind::from_stored(store.get(THEME_KEY).as_deref());
        Self {
            mode: AppMode::Command,
            engine: Reader::new(),
            store,
            theme,
            command_input: String::new(),
            status: None,
            group: Vec::new(),
            percent: 0.0,
            index: 0,
            total: 0,
            completed: false,
        }
    }

    /// Restore the previous session from the store. Leaves the app on the
    /// command deck; Enter resumes from the restored position.
    pub fn restore_session(&mut self) -> bool {
        if self.engine.load_state(self.store.as_ref()) {
            self.drain_engine_events();
            self.status = Some(format!(
                "Restored {} words at {:.0}% - press Enter to resume",
                self.total, self.percent
            ));
            true
        } else {
            false
        }
    }

    /// Swap in a freshly loaded document and start flashing it.
    pub fn start_reading(&mut self, doc: LoadedDocument, now: Instant) {
        self.completed = false;
        self.engine.set_words(doc.tokens);
        self.engine.play(now);
        self.mode = AppMode::Reading;
        self.status = Some(format!("Reading {}", doc.source));
        self.drain_engine_events();
    }

    pub fn set_wpm(&mut self, wpm: u32) {
        self.engine.set_wpm(wpm);
    }

    pub fn set_words_per_group(&mut self, count: usize) {
        self.engine.set_words_per_group(count);
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn theme(&self) -> Theme {
        self.theme.palette()
    }

    /// Save whatever is loaded and leave at the next loop iteration.
    pub fn quit(&mut self) {
        self.save_session();
        self.mode = AppMode::Quit;
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::LoadFile(path) => match ingest::load_path(&path) {
                Ok(doc) => self.start_reading(doc, now),
                Err(err) => self.status = Some(err.to_string()),
            },
            AppEvent::LoadClipboard => match ingest::clipboard::load() {
                Ok(doc) => self.start_reading(doc, now),
                Err(err) => self.status = Some(err.to_string()),
            },
            AppEvent::Resume => self.resume(now),
            AppEvent::Quit => self.quit(),
            AppEvent::Help => {
                self.status = Some(match self.mode {
                    AppMode::Command => COMMAND_HELP.to_string(),
                    _ => READER_HELP.to_string(),
                })
            }
            AppEvent::InvalidCommand(input) => {
                self.status = Some(format!("Unknown command: {} (:h for help)", input))
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        match self.mode {
            AppMode::Command => self.handle_command_key(key, now),
            AppMode::Reading | AppMode::Paused => self.handle_reading_key(key, now),
            AppMode::Quit => {}
        }
    }

    /// Advance the engine at display refresh cadence. Answers true when
    /// anything changed that needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.tick(now);
        self.drain_engine_events()
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            mode: self.mode,
            group: self.group.clone(),
            percent: self.percent,
            index: self.index,
            total: self.total,
            wpm: self.engine.wpm(),
            words_per_group: self.engine.words_per_group(),
            completed: self.completed,
            command_input: self.command_input.clone(),
            status: self.status.clone(),
        }
    }

    fn handle_command_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char(c) => self.command_input.push(c),
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Enter => {
                let command = parse_command(&self.command_input);
                self.command_input.clear();
                self.handle_event(command_to_app_event(command), now);
            }
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_reading_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Char(' ') => self.toggle_playback(now),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.engine.adjust_wpm(WPM_STEP);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.engine.adjust_wpm(-WPM_STEP);
            }
            KeyCode::Char(']') => self.engine.adjust_words_per_group(1),
            KeyCode::Char('[') => self.engine.adjust_words_per_group(-1),
            KeyCode::Right => self.seek_relative(SEEK_STEP_PERCENT),
            KeyCode::Left => self.seek_relative(-SEEK_STEP_PERCENT),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.leave_reader(),
            KeyCode::Char(c @ '0'..='9') => {
                let percent = f64::from(c as u8 - b'0') * 10.0;
                self.seek_absolute(percent);
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self, now: Instant) {
        if self.engine.is_playing() {
            self.engine.pause();
            self.drain_engine_events();
            self.save_session();
        } else {
            if self.engine.is_finished() {
                // Space after the end starts over.
                self.engine.jump_to_progress(0.0);
                self.completed = false;
            }
            self.engine.play(now);
            self.drain_engine_events();
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.engine.is_empty() {
            self.status = Some("Nothing to resume - load a file first".to_string());
            return;
        }
        if self.engine.is_finished() {
            self.engine.jump_to_progress(0.0);
            self.completed = false;
        }
        self.mode = AppMode::Reading;
        self.status = None;
        self.engine.play(now);
        self.drain_engine_events();
    }

    fn seek_relative(&mut self, delta_percent: f64) {
        if self.total == 0 {
            return;
        }
        // A percent step can floor to zero words on a short document.
        // Step whole words instead, at least one, and aim at the middle
        // of the target word so the engine's floor lands on it.
        let share = delta_percent.abs() / 100.0;
        let step = ((share * self.total as f64).ceil() as usize).max(1);
        let target = if delta_percent < 0.0 {
            self.index.saturating_sub(step)
        } else {
            (self.index + step).min(self.total - 1)
        };
        let percent = ((target as f64 + 0.5) / self.total as f64) * 100.0;
        self.seek_absolute(percent);
    }

    fn seek_absolute(&mut self, percent: f64) {
        self.completed = false;
        self.engine.jump_to_progress(percent);
        self.drain_engine_events();
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.store.set(THEME_KEY, self.theme.as_stored()) {
            self.status = Some(format!("Could not save theme: {}", err));
        }
    }

    /// Back to the command deck, saving first.
    fn leave_reader(&mut self) {
        self.engine.pause();
        self.drain_engine_events();
        self.save_session();
        self.mode = AppMode::Command;
        self.status = Some("Session saved - Enter resumes".to_string());
    }

    fn save_session(&mut self) {
        if self.engine.is_empty() {
            return;
        }
        if let Err(err) = self.engine.save_state(self.store.as_ref()) {
            self.status = Some(format!("Could not save session: {}", err));
        }
    }

    fn drain_engine_events(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.engine.poll_event() {
            changed = true;
            match event {
                ReaderEvent::WordChanged(words) => self.group = words,
                ReaderEvent::ProgressChanged { percent, index, total } => {
                    self.percent = percent;
                    self.index = index;
                    self.total = total;
                }
                ReaderEvent::PlayStateChanged(playing) => {
                    if self.mode == AppMode::Reading || self.mode == AppMode::Paused {
                        self.mode = if playing { AppMode::Reading } else { AppMode::Paused };
                    }
                }
                ReaderEvent::Completed => {
                    self.completed = true;
                    self.percent = 100.0;
                    self.index = self.total;
                    self.save_session();
                }
            }
        }
        changed
    }
}
