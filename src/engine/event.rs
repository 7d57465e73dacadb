/// Change notifications emitted by the playback engine.
///
/// These are the engine's only output; it never touches the terminal.
/// Callers drain them with [`Reader::poll_event`] after any operation or
/// tick and mirror the payloads into their own display state.
///
/// [`Reader::poll_event`]: crate::engine::Reader::poll_event
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderEvent {
    /// The visible group changed. Carries the words to show, clamped to
    /// the end of the sequence when fewer than a full group remain.
    WordChanged(Vec<String>),

    /// The cursor moved. `percent` is `index / total * 100`.
    ProgressChanged {
        percent: f64,
        index: usize,
        total: usize,
    },

    /// Playback started or stopped.
    PlayStateChanged(bool),

    /// Playback ran past the last word and stopped on its own.
    Completed,
}
