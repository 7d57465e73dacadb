/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Landing screen with the command deck.
    Command,
    /// Words are flashing.
    Reading,
    /// Reader screen with playback stopped.
    Paused,
    /// Event loop exits at the next iteration.
    Quit,
}
