// Playback engine - owns the word sequence, cursor, speed and play state.
//
// The engine is driven from outside: the UI loop calls `tick` at display
// refresh cadence and the engine decides whether a full interval has
// elapsed since the last advance. All observable changes come out as
// `ReaderEvent`s; the engine knows nothing about rendering.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::engine::config::{ReaderConfig, DEFAULT_WORDS_PER_GROUP, DEFAULT_WPM};
use crate::engine::event::ReaderEvent;
use crate::session::{PersistedSession, SessionStore, SESSION_KEY};

/// Milliseconds each group stays on screen at the given speed.
pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    (60_000.0 / wpm.max(1) as f64).round() as u64
}

pub struct Reader {
    words: Vec<String>,
    current_index: usize,
    wpm: u32,
    words_per_group: usize,
    playing: bool,
    /// Reference timestamp of the last advance. `None` forces the next
    /// tick to re-anchor without advancing (fresh play, seek, resume).
    last_advance: Option<Instant>,
    config: ReaderConfig,
    events: VecDeque<ReaderEvent>,
}

impl Reader {
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            words: Vec::new(),
            current_index: 0,
            wpm: DEFAULT_WPM,
            words_per_group: DEFAULT_WORDS_PER_GROUP,
            playing: false,
            last_advance: None,
            config,
            events: VecDeque::new(),
        }
    }

    /// Replace the word sequence and rewind to the start. Stops playback
    /// if it was running, then announces the new first group.
    pub fn set_words(&mut self, tokens: Vec<String>) {
        self.words = tokens;
        self.current_index = 0;
        self.stop_playback();
        self.notify_word();
        self.notify_progress();
    }

    /// Clamp and apply a new speed. Takes effect from the next advance.
    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = wpm.clamp(*self.config.wpm_range.start(), *self.config.wpm_range.end());
    }

    pub fn adjust_wpm(&mut self, delta: i32) {
        let target = self.wpm as i32 + delta;
        self.set_wpm(target.max(0) as u32);
    }

    /// Clamp and apply a new group size. Takes effect from the next advance.
    pub fn set_words_per_group(&mut self, count: usize) {
        self.words_per_group =
            count.clamp(*self.config.group_range.start(), *self.config.group_range.end());
    }

    pub fn adjust_words_per_group(&mut self, delta: i32) {
        let target = self.words_per_group as i32 + delta;
        self.set_words_per_group(target.max(0) as usize);
    }

    /// Start playback anchored at `now`. The current group gets a full
    /// interval on screen before the first advance. No-op while already
    /// playing or when no words are loaded.
    pub fn play(&mut self, now: Instant) {
        if self.playing || self.words.is_empty() {
            return;
        }
        self.playing = true;
        self.last_advance = Some(now);
        self.events.push_back(ReaderEvent::PlayStateChanged(true));
        self.notify_word();
        self.notify_progress();
    }

    /// Stop playback, keeping the cursor where it is.
    pub fn pause(&mut self) {
        self.playing = false;
        self.last_advance = None;
        self.events.push_back(ReaderEvent::PlayStateChanged(false));
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Move the cursor to `percent` of the sequence and announce the group
    /// there immediately, playing or not. The sought group gets a full
    /// interval before the next advance.
    pub fn jump_to_progress(&mut self, percent: f64) {
        if self.words.is_empty() {
            return;
        }
        let target = ((percent / 100.0) * self.words.len() as f64).floor() as usize;
        self.current_index = target.min(self.words.len() - 1);
        self.last_advance = None;
        self.notify_word();
        self.notify_progress();
    }

    /// Advance at most one group if a full interval has elapsed. Called at
    /// display refresh cadence, which is far finer than any word interval.
    pub fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return;
        };
        let interval = Duration::from_millis(wpm_to_milliseconds(self.wpm));
        if now.duration_since(last) >= interval {
            self.advance(now, last, interval);
        }
    }

    fn advance(&mut self, now: Instant, last: Instant, interval: Duration) {
        let next = (self.current_index + self.words_per_group).min(self.words.len());
        if next >= self.words.len() {
            // The trailing group has had its time on screen.
            self.current_index = self.words.len();
            self.playing = false;
            self.last_advance = None;
            self.events.push_back(ReaderEvent::PlayStateChanged(false));
            self.events.push_back(ReaderEvent::Completed);
            return;
        }
        self.current_index = next;
        // Keep cadence drift-free by stepping the reference one interval
        // forward; after a stall, re-anchor instead of bursting through
        // the backlog.
        let mut reference = last + interval;
        if now.duration_since(reference) >= interval {
            reference = now;
        }
        self.last_advance = Some(reference);
        self.notify_word();
        self.notify_progress();
    }

    /// Serialize the session and hand it to the store.
    pub fn save_state(&self, store: &dyn SessionStore) -> std::io::Result<()> {
        let session = PersistedSession {
            text: self.words.clone(),
            position: self.current_index,
            wpm: self.wpm,
            words_per_group: self.words_per_group,
        };
        store.set(SESSION_KEY, &session.to_json())
    }

    /// Restore a session from the store. Returns false when nothing usable
    /// is stored; the engine is untouched in that case. Restored values
    /// pass through the same clamps as live changes, and the restored
    /// group is announced so callers can show it.
    pub fn load_state(&mut self, store: &dyn SessionStore) -> bool {
        let Some(raw) = store.get(SESSION_KEY) else {
            return false;
        };
        let Some(session) = PersistedSession::from_json(&raw) else {
            return false;
        };
        self.words = session.text;
        self.current_index = session.position.min(self.words.len());
        self.set_wpm(session.wpm);
        self.set_words_per_group(session.words_per_group);
        self.stop_playback();
        self.notify_word();
        self.notify_progress();
        true
    }

    /// Next queued notification, oldest first.
    pub fn poll_event(&mut self) -> Option<ReaderEvent> {
        self.events.pop_front()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True once playback has run past the last word.
    pub fn is_finished(&self) -> bool {
        !self.words.is_empty() && self.current_index >= self.words.len()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn words_per_group(&self) -> usize {
        self.words_per_group
    }

    /// The group under the cursor, clamped to the end of the sequence.
    pub fn current_group(&self) -> &[String] {
        let end = (self.current_index + self.words_per_group).min(self.words.len());
        &self.words[self.current_index.min(end)..end]
    }

    pub fn progress_percent(&self) -> f64 {
        if self.words.is_empty() {
            0.0
        } else {
            (self.current_index as f64 / self.words.len() as f64) * 100.0
        }
    }

    fn stop_playback(&mut self) {
        self.last_advance = None;
        if self.playing {
            self.playing = false;
            self.events.push_back(ReaderEvent::PlayStateChanged(false));
        }
    }

    fn notify_word(&mut self) {
        if self.current_index < self.words.len() {
            let end = (self.current_index + self.words_per_group).min(self.words.len());
            let words = self.words[self.current_index..end].to_vec();
            self.events.push_back(ReaderEvent::WordChanged(words));
        }
    }

    fn notify_progress(&mut self) {
        let total = self.words.len();
        let percent = self.progress_percent();
        self.events.push_back(ReaderEvent::ProgressChanged {
            percent,
            index: self.current_index,
            total,
        });
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::MemoryStore;

    fn sample_words(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("w{}", i)).collect()
    }

    fn drain(reader: &mut Reader) -> Vec<ReaderEvent> {
        let mut events = Vec::new();
        while let Some(event) = reader.poll_event() {
            events.push(event);
        }
        events
    }

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn test_wpm_to_milliseconds() {
        assert_eq!(wpm_to_milliseconds(300), 200);
        assert_eq!(wpm_to_milliseconds(200), 300);
        assert_eq!(wpm_to_milliseconds(1000), 60);
        assert_eq!(wpm_to_milliseconds(450), 133); // 133.33 rounds down
    }

    #[test]
    fn test_wpm_to_milliseconds_zero_guard() {
        assert_eq!(wpm_to_milliseconds(0), 60_000);
    }

    #[test]
    fn test_set_wpm_clamps_to_range() {
        let mut reader = Reader::new();
        reader.set_wpm(100);
        assert_eq!(reader.wpm(), 200);
        reader.set_wpm(5000);
        assert_eq!(reader.wpm(), 1000);
        reader.set_wpm(450);
        assert_eq!(reader.wpm(), 450);
    }

    #[test]
    fn test_adjust_wpm_steps_and_saturates() {
        let mut reader = Reader::new();
        reader.adjust_wpm(10);
        assert_eq!(reader.wpm(), 310);
        reader.adjust_wpm(-10000);
        assert_eq!(reader.wpm(), 200);
        reader.adjust_wpm(10000);
        assert_eq!(reader.wpm(), 1000);
    }

    #[test]
    fn test_set_words_per_group_clamps_to_range() {
        let mut reader = Reader::new();
        reader.set_words_per_group(0);
        assert_eq!(reader.words_per_group(), 1);
        reader.set_words_per_group(9);
        assert_eq!(reader.words_per_group(), 5);
        reader.set_words_per_group(3);
        assert_eq!(reader.words_per_group(), 3);
    }

    #[test]
    fn test_set_words_rewinds_and_announces() {
        let mut reader = Reader::new();
        reader.set_words(sample_words(4));
        let events = drain(&mut reader);
        assert_eq!(
            events[0],
            ReaderEvent::WordChanged(vec!["w0".to_string()])
        );
        assert!(matches!(
            events[1],
            ReaderEvent::ProgressChanged { index: 0, total: 4, .. }
        ));
        assert!(!reader.is_playing());
    }

    #[test]
    fn test_set_words_while_playing_stops() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(4));
        reader.play(start);
        drain(&mut reader);

        reader.set_words(sample_words(2));
        let events = drain(&mut reader);
        assert!(!reader.is_playing());
        assert!(events.contains(&ReaderEvent::PlayStateChanged(false)));
    }

    #[test]
    fn test_play_on_empty_sequence_is_noop() {
        let mut reader = Reader::new();
        reader.play(Instant::now());
        assert!(!reader.is_playing());
        assert!(drain(&mut reader).is_empty());
    }

    #[test]
    fn test_play_announces_current_group() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(3));
        drain(&mut reader);

        reader.play(start);
        let events = drain(&mut reader);
        assert_eq!(events[0], ReaderEvent::PlayStateChanged(true));
        assert_eq!(
            events[1],
            ReaderEvent::WordChanged(vec!["w0".to_string()])
        );
        assert!(reader.is_playing());
    }

    #[test]
    fn test_play_while_playing_is_noop() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(3));
        reader.play(start);
        drain(&mut reader);

        reader.play(ms(start, 50));
        assert!(drain(&mut reader).is_empty());
    }

    #[test]
    fn test_pause_announces_stop() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(3));
        reader.play(start);
        drain(&mut reader);

        reader.pause();
        assert!(!reader.is_playing());
        assert_eq!(drain(&mut reader), vec![ReaderEvent::PlayStateChanged(false)]);
    }

    #[test]
    fn test_toggle_flips_play_state() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(3));

        reader.toggle(start);
        assert!(reader.is_playing());
        reader.toggle(ms(start, 50));
        assert!(!reader.is_playing());
    }

    #[test]
    fn test_tick_advances_after_one_interval() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start); // 300 wpm -> 200ms interval
        drain(&mut reader);

        reader.tick(ms(start, 199));
        assert_eq!(reader.current_index(), 0);

        reader.tick(ms(start, 200));
        assert_eq!(reader.current_index(), 1);
        let events = drain(&mut reader);
        assert_eq!(
            events[0],
            ReaderEvent::WordChanged(vec!["w1".to_string()])
        );
        assert!(matches!(
            events[1],
            ReaderEvent::ProgressChanged { index: 1, total: 10, .. }
        ));
    }

    #[test]
    fn test_tick_advances_at_most_one_group() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start);
        drain(&mut reader);

        // A single late tick must not burn through the backlog.
        reader.tick(ms(start, 1000));
        assert_eq!(reader.current_index(), 1);
    }

    #[test]
    fn test_tick_while_paused_does_nothing() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        drain(&mut reader);

        reader.tick(ms(start, 10_000));
        assert_eq!(reader.current_index(), 0);
        assert!(drain(&mut reader).is_empty());
    }

    #[test]
    fn test_cadence_over_simulated_run() {
        // 300 wpm, 10 words, one word per group: 2000ms of 16ms ticks
        // must land the cursor exactly one past the last word.
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start);
        drain(&mut reader);

        for k in 1..=125u64 {
            reader.tick(ms(start, 16 * k));
        }
        assert_eq!(reader.current_index(), 10);
        assert!(!reader.is_playing());
        let completions = drain(&mut reader)
            .into_iter()
            .filter(|e| *e == ReaderEvent::Completed)
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_stall_reanchors_instead_of_bursting() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start);
        drain(&mut reader);

        reader.tick(ms(start, 200));
        assert_eq!(reader.current_index(), 1);

        // Long stall: one advance, then a fresh full interval from `now`.
        reader.tick(ms(start, 1000));
        assert_eq!(reader.current_index(), 2);
        reader.tick(ms(start, 1100));
        assert_eq!(reader.current_index(), 2);
        reader.tick(ms(start, 1200));
        assert_eq!(reader.current_index(), 3);
    }

    #[test]
    fn test_completion_stops_playback() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(2));
        reader.play(start);
        drain(&mut reader);

        reader.tick(ms(start, 200));
        assert_eq!(reader.current_index(), 1);
        reader.tick(ms(start, 400));
        assert_eq!(reader.current_index(), 2);
        assert!(!reader.is_playing());
        assert!(reader.is_finished());

        let events = drain(&mut reader);
        assert_eq!(
            events,
            vec![
                ReaderEvent::WordChanged(vec!["w1".to_string()]),
                ReaderEvent::ProgressChanged { percent: 50.0, index: 1, total: 2 },
                ReaderEvent::PlayStateChanged(false),
                ReaderEvent::Completed,
            ]
        );

        // Further ticks are inert.
        reader.tick(ms(start, 10_000));
        assert!(drain(&mut reader).is_empty());
    }

    #[test]
    fn test_trailing_partial_group_is_shown_before_completion() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.set_words_per_group(3);
        reader.play(start);
        drain(&mut reader);

        reader.tick(ms(start, 200));
        reader.tick(ms(start, 400));
        reader.tick(ms(start, 600));
        assert_eq!(reader.current_index(), 9);
        assert_eq!(reader.current_group(), ["w9".to_string()]);
        assert!(reader.is_playing());

        // The single-word remainder holds the screen for a full interval.
        reader.tick(ms(start, 800));
        assert!(reader.is_finished());
    }

    #[test]
    fn test_short_sequence_displays_before_completing() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(3));
        reader.set_words_per_group(5);
        reader.play(start);

        let events = drain(&mut reader);
        assert!(events.contains(&ReaderEvent::WordChanged(vec![
            "w0".to_string(),
            "w1".to_string(),
            "w2".to_string(),
        ])));

        reader.tick(ms(start, 200));
        assert!(reader.is_finished());
    }

    #[test]
    fn test_jump_to_progress_positions_cursor() {
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        drain(&mut reader);

        reader.jump_to_progress(50.0);
        assert_eq!(reader.current_index(), 5);
        let events = drain(&mut reader);
        assert_eq!(
            events[0],
            ReaderEvent::WordChanged(vec!["w5".to_string()])
        );
        assert!(matches!(
            events[1],
            ReaderEvent::ProgressChanged { index: 5, total: 10, .. }
        ));
    }

    #[test]
    fn test_jump_to_progress_clamps_both_ends() {
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        drain(&mut reader);

        reader.jump_to_progress(100.0);
        assert_eq!(reader.current_index(), 9);
        reader.jump_to_progress(-25.0);
        assert_eq!(reader.current_index(), 0);
        reader.jump_to_progress(250.0);
        assert_eq!(reader.current_index(), 9);
    }

    #[test]
    fn test_jump_on_empty_sequence_is_noop() {
        let mut reader = Reader::new();
        reader.jump_to_progress(50.0);
        assert!(drain(&mut reader).is_empty());
    }

    #[test]
    fn test_jump_while_playing_restarts_interval() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start);
        drain(&mut reader);

        reader.tick(ms(start, 150));
        reader.jump_to_progress(50.0);
        drain(&mut reader);

        // The sought group gets a fresh interval from the next tick on.
        reader.tick(ms(start, 199));
        assert_eq!(reader.current_index(), 5);
        reader.tick(ms(start, 398));
        assert_eq!(reader.current_index(), 5);
        reader.tick(ms(start, 399));
        assert_eq!(reader.current_index(), 6);
    }

    #[test]
    fn test_resume_after_pause_restarts_interval() {
        let start = Instant::now();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.play(start);
        reader.tick(ms(start, 200));
        reader.pause();
        drain(&mut reader);

        reader.play(ms(start, 5000));
        reader.tick(ms(start, 5100));
        assert_eq!(reader.current_index(), 1);
        reader.tick(ms(start, 5200));
        assert_eq!(reader.current_index(), 2);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = MemoryStore::default();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.set_wpm(450);
        reader.set_words_per_group(2);
        reader.jump_to_progress(40.0);
        reader.save_state(&store).unwrap();

        let mut restored = Reader::new();
        assert!(restored.load_state(&store));
        assert_eq!(restored.len(), 10);
        assert_eq!(restored.current_index(), 4);
        assert_eq!(restored.wpm(), 450);
        assert_eq!(restored.words_per_group(), 2);
        assert!(!restored.is_playing());
    }

    #[test]
    fn test_load_announces_restored_group() {
        let store = MemoryStore::default();
        let mut reader = Reader::new();
        reader.set_words(sample_words(10));
        reader.jump_to_progress(50.0);
        reader.save_state(&store).unwrap();

        let mut restored = Reader::new();
        restored.load_state(&store);
        let events = drain(&mut restored);
        assert_eq!(
            events[0],
            ReaderEvent::WordChanged(vec!["w5".to_string()])
        );
    }

    #[test]
    fn test_load_with_nothing_stored_returns_false() {
        let store = MemoryStore::default();
        let mut reader = Reader::new();
        assert!(!reader.load_state(&store));
    }

    #[test]
    fn test_load_rejects_malformed_payload() {
        let store = MemoryStore::default();
        store.set(SESSION_KEY, "not json at all").unwrap();
        let mut reader = Reader::new();
        assert!(!reader.load_state(&store));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_load_rejects_empty_text() {
        let store = MemoryStore::default();
        store
            .set(SESSION_KEY, r#"{"text":[],"position":0,"wpm":300,"wordsPerGroup":1}"#)
            .unwrap();
        let mut reader = Reader::new();
        assert!(!reader.load_state(&store));
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let store = MemoryStore::default();
        store
            .set(
                SESSION_KEY,
                r#"{"text":["a","b","c"],"position":99,"wpm":9000,"wordsPerGroup":50}"#,
            )
            .unwrap();
        let mut reader = Reader::new();
        assert!(reader.load_state(&store));
        assert_eq!(reader.current_index(), 3);
        assert_eq!(reader.wpm(), 1000);
        assert_eq!(reader.words_per_group(), 5);
    }

    #[test]
    fn test_load_defaults_missing_fields() {
        let store = MemoryStore::default();
        store.set(SESSION_KEY, r#"{"text":["a","b"]}"#).unwrap();
        let mut reader = Reader::new();
        assert!(reader.load_state(&store));
        assert_eq!(reader.current_index(), 0);
        assert_eq!(reader.wpm(), DEFAULT_WPM);
        assert_eq!(reader.words_per_group(), DEFAULT_WORDS_PER_GROUP);
    }

    #[test]
    fn test_current_group_clamps_at_end() {
        let mut reader = Reader::new();
        reader.set_words(sample_words(5));
        reader.set_words_per_group(3);
        reader.jump_to_progress(80.0);
        assert_eq!(reader.current_index(), 4);
        assert_eq!(reader.current_group(), ["w4".to_string()]);
    }
}
