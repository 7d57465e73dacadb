use std::io::stdin;
use std::time::Instant;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;

use wordflash::app::{App, AppEvent};
use wordflash::session::FileSessionStore;
use wordflash::ui::TuiManager;

/// flash words one group at a time, straight from your files or clipboard
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// text, pdf or epub file to read
    file: Option<String>,

    /// words per minute (200-1000)
    #[clap(short, long)]
    wpm: Option<u32>,

    /// words shown per flash (1-5)
    #[clap(short, long)]
    group: Option<usize>,

    /// read text from the system clipboard
    #[clap(long)]
    clipboard: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(Box::new(FileSessionStore::new()));

    if cli.clipboard {
        app.handle_event(AppEvent::LoadClipboard, Instant::now());
    } else if let Some(path) = cli.file.clone() {
        app.handle_event(AppEvent::LoadFile(path), Instant::now());
    } else {
        app.restore_session();
    }

    // Explicit flags win over whatever a restored session carried.
    if let Some(wpm) = cli.wpm {
        app.set_wpm(wpm);
    }
    if let Some(group) = cli.group {
        app.set_words_per_group(group);
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}
