use crate::app::mode::AppMode;

/// Snapshot handed to the draw functions. Word and progress fields are
/// filled from engine notifications, not by reaching into the sequence.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub mode: AppMode,
    /// The group currently on screen.
    pub group: Vec<String>,
    pub percent: f64,
    pub index: usize,
    pub total: usize,
    pub wpm: u32,
    pub words_per_group: usize,
    pub completed: bool,
    pub command_input: String,
    pub status: Option<String>,
}

impl RenderState {
    /// Position label shown next to the progress bar, one-based and
    /// clamped so completion reads "n / n" rather than past the end.
    pub fn position_label(&self) -> String {
        if self.total == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", (self.index + 1).min(self.total), self.total)
    }
}
