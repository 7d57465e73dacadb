use std::io::{self, Stdout};
use std::sync::Once;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Terminal;

use crate::app::{App, AppMode};
use crate::ui::view;

/// Poll timeout while words are flashing: display refresh cadence, far
/// finer than any word interval.
const ACTIVE_POLL: Duration = Duration::from_millis(1000 / 60);

/// Poll timeout while nothing is moving on screen.
const IDLE_POLL: Duration = Duration::from_millis(250);

static PANIC_HOOK_SET: Once = Once::new();

/// Owns the terminal for the lifetime of the program: raw mode and the
/// alternate screen are entered on construction and restored on drop,
/// panics included.
pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        set_panic_hook();

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager { terminal })
    }

    /// Drive the app until it asks to quit. Each iteration waits for one
    /// key press or the poll timeout, ticks the engine with the current
    /// time and redraws only when something changed.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        self.render_frame(app)?;

        loop {
            if app.mode == AppMode::Quit {
                return Ok(());
            }

            let timeout = if app.is_playing() { ACTIVE_POLL } else { IDLE_POLL };
            let mut dirty = false;

            match event::poll(timeout) {
                Ok(true) => match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == event::KeyCode::Char('c')
                        {
                            app.quit();
                        } else {
                            app.handle_key(key.code, Instant::now());
                        }
                        dirty = true;
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                },
                Ok(false) => {}
                Err(e) => return Err(e),
            }

            if app.tick(Instant::now()) {
                dirty = true;
            }

            if dirty {
                self.render_frame(app)?;
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let state = app.render_state();
        let theme = app.theme();

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(theme.background)),
                area,
            );

            match state.mode {
                AppMode::Command | AppMode::Quit => {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Min(1),
                            Constraint::Length(1),
                            Constraint::Length(2),
                        ])
                        .split(area);

                    frame.render_widget(view::render_landing(&state, &theme), chunks[0]);
                    frame.render_widget(view::render_status_line(&state, &theme), chunks[1]);
                    frame.render_widget(
                        view::render_command_deck(&state.command_input, &theme),
                        chunks[2],
                    );
                }
                AppMode::Reading | AppMode::Paused => {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Min(3),
                            Constraint::Length(1),
                            Constraint::Length(1),
                        ])
                        .split(area);

                    // Flash line vertically centered in the top region.
                    let flash_area = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Percentage(45),
                            Constraint::Length(1),
                            Constraint::Min(0),
                        ])
                        .split(chunks[0])[1];

                    frame.render_widget(
                        view::render_flash(&state, flash_area.width, &theme),
                        flash_area,
                    );
                    frame.render_widget(
                        view::render_progress_bar(state.percent, chunks[1].width, &theme),
                        chunks[1],
                    );
                    frame.render_widget(view::render_status_line(&state, &theme), chunks[2]);
                }
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiManager {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn set_panic_hook() {
    PANIC_HOOK_SET.call_once(|| {
        std::panic::set_hook(Box::new(|panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            eprintln!("Panic: {}", panic_info);
            std::process::exit(1);
        }));
    });
}
