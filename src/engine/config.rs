// Playback limits and defaults shared by the engine and the session layer.

use std::ops::RangeInclusive;

/// Reading speed used when nothing is configured or restored.
pub const DEFAULT_WPM: u32 = 300;

/// Group size used when nothing is configured or restored.
pub const DEFAULT_WORDS_PER_GROUP: usize = 1;

/// Bounds applied to every speed and grouping change.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Minimum and maximum allowed words per minute.
    pub wpm_range: RangeInclusive<u32>,

    /// Minimum and maximum words flashed together.
    pub group_range: RangeInclusive<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm_range: 200..=1000,
            group_range: 1..=5,
        }
    }
}
