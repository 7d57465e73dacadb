// Widget builders for the two screens. Pure functions from display state
// to ratatui widgets; layout happens in the terminal loop.

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::mode::AppMode;
use crate::app::render_state::RenderState;
use crate::ui::theme::Theme;

/// Anchor letter index for a word of the given display length, counted
/// in graphemes. Sits left of center, where the eye lands first.
pub fn anchor_position(word: &str) -> usize {
    match word.graphemes(true).count() {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        _ => 3,
    }
}

/// The flash line: the current group joined with spaces, anchor letter
/// highlighted, padded so the anchor sits at the horizontal center of
/// the area.
pub fn render_flash(state: &RenderState, width: u16, theme: &Theme) -> Paragraph<'static> {
    let background = Style::default().bg(theme.background);

    if state.completed {
        let line = Line::from(vec![
            Span::styled(
                "Done",
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Space restarts, Esc loads another file",
                Style::default().fg(theme.dimmed),
            ),
        ]);
        return Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(background);
    }

    let word = state.group.join(" ");
    let graphemes: Vec<&str> = word.graphemes(true).collect();
    if graphemes.is_empty() {
        return Paragraph::new("").style(background);
    }

    let anchor = anchor_position(&word);
    let prefix: String = graphemes[..anchor].concat();
    let anchor_cell: String = graphemes[anchor].to_string();
    let suffix: String = graphemes[anchor + 1..].concat();

    let pad = (width as usize / 2).saturating_sub(UnicodeWidthStr::width(prefix.as_str()));

    let line = Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(prefix, Style::default().fg(theme.text)),
        Span::styled(
            anchor_cell,
            Style::default().fg(theme.anchor).add_modifier(Modifier::BOLD),
        ),
        Span::styled(suffix, Style::default().fg(theme.text)),
    ]);

    Paragraph::new(line).alignment(Alignment::Left).style(background)
}

/// Thin rule across the width of the area, filled up to the current
/// position.
pub fn render_progress_bar(percent: f64, width: u16, theme: &Theme) -> Line<'static> {
    let cells = width as usize;
    let filled = ((percent / 100.0) * cells as f64).round() as usize;
    let filled = filled.min(cells);

    let mut spans = Vec::with_capacity(cells);
    for _ in 0..filled {
        spans.push(Span::styled("─", Style::default().fg(theme.text)));
    }
    for _ in filled..cells {
        spans.push(Span::styled("─", Style::default().fg(theme.dimmed)));
    }

    Line::from(spans)
}

/// One-line footer: mode tag, playback numbers, then either the latest
/// status message or a key hint.
pub fn render_status_line(state: &RenderState, theme: &Theme) -> Line<'static> {
    let tag = if state.completed {
        " DONE "
    } else {
        match state.mode {
            AppMode::Reading => " READING ",
            AppMode::Paused => " PAUSED ",
            AppMode::Command | AppMode::Quit => " COMMAND ",
        }
    };

    let stats = format!(
        " {} wpm | x{} | {:.0}% ({}) ",
        state.wpm,
        state.words_per_group,
        state.percent,
        state.position_label()
    );

    let trailing = state.status.clone().unwrap_or_else(|| {
        match state.mode {
            AppMode::Command | AppMode::Quit => "Enter resume | :h help".to_string(),
            _ => "Space pause | arrows seek and speed | t theme | Esc back".to_string(),
        }
    });

    Line::from(vec![
        Span::styled(
            tag,
            Style::default().fg(theme.background).bg(theme.anchor),
        ),
        Span::styled(stats, Style::default().fg(theme.text)),
        Span::styled(trailing, Style::default().fg(theme.dimmed)),
    ])
}

/// Landing screen body shown before any document is flashing.
pub fn render_landing(state: &RenderState, theme: &Theme) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            "wordflash",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Type @file.txt, @file.pdf or @file.epub to load a document",
            Style::default().fg(theme.dimmed),
        )),
        Line::from(Span::styled(
            "@@ reads the clipboard",
            Style::default().fg(theme.dimmed),
        )),
        Line::from(Span::styled(
            ":q quits",
            Style::default().fg(theme.dimmed),
        )),
    ];

    if let Some(status) = &state.status {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(theme.text),
        )));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.background))
}

/// Input line at the bottom of the landing screen.
pub fn render_command_deck(input: &str, theme: &Theme) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled("› ", Style::default().fg(theme.anchor)),
        Span::styled(input.to_string(), Style::default().fg(theme.text)),
        Span::styled("▌", Style::default().fg(theme.dimmed)),
    ]);

    Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.dimmed)),
        )
        .style(Style::default().bg(theme.background))
}
