//! Command-deck input parsing.
//!
//! - `:q` or `:quit` quits
//! - `:h` or `:help` shows the key reference
//! - `@filename.txt/.pdf/.epub` loads a file
//! - `@@` reads the clipboard
//! - empty input resumes the restored session

use crate::app::AppEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    LoadClipboard,
    Resume,
    Unknown(String),
}

/// Parse one line of command-deck input.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Resume;
    }

    if let Some(cmd) = input.strip_prefix(':') {
        match cmd {
            "q" | "quit" => Command::Quit,
            "h" | "help" => Command::Help,
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let filename = rest.trim();
        if filename.is_empty() || filename == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadFile(filename.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

/// Translate a parsed command into an event for the app core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::Resume => AppEvent::Resume,
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
