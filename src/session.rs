// Session persistence - a small key/value store holding JSON payloads.
//
// Wire format: `{"text": [...], "position": 0, "wpm": 300,
// "wordsPerGroup": 1}` under the key "readingState", plus "dark"/"light"
// under "theme".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::engine::config::{DEFAULT_WORDS_PER_GROUP, DEFAULT_WPM};

/// Store key for the reading session payload.
pub const SESSION_KEY: &str = "readingState";

/// Store key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// String key/value persistence. `get` answers `None` for unknown keys;
/// `set` overwrites.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Snapshot of a reading session: the tokenized text plus cursor, speed
/// and grouping. Fields other than the text are optional on the way in;
/// a payload missing them restores with the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedSession {
    pub text: Vec<String>,
    #[serde(default)]
    pub position: usize,
    #[serde(default = "default_wpm")]
    pub wpm: u32,
    #[serde(rename = "wordsPerGroup", default = "default_words_per_group")]
    pub words_per_group: usize,
}

fn default_wpm() -> u32 {
    DEFAULT_WPM
}

fn default_words_per_group() -> usize {
    DEFAULT_WORDS_PER_GROUP
}

impl PersistedSession {
    /// Parse a stored payload. Answers `None` for malformed JSON or an
    /// empty token list, both treated as "no saved session".
    pub fn from_json(raw: &str) -> Option<Self> {
        let session: PersistedSession = serde_json::from_str(raw).ok()?;
        if session.text.is_empty() {
            return None;
        }
        Some(session)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// File-backed store: one file per key under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Self {
        let dir = if let Some(project_dirs) = ProjectDirs::from("", "", "wordflash") {
            project_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".wordflash")
        };
        Self { dir }
    }

    /// Store rooted at an explicit directory, for tests.
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::SessionStore;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::rc::Rc;

    /// In-memory store for tests. Clones share the same map, so a test
    /// can keep a handle to a store it has handed off.
    #[derive(Default, Clone)]
    pub(crate) struct MemoryStore {
        values: Rc<RefCell<HashMap<String, String>>>,
    }

    impl SessionStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> io::Result<()> {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Store whose writes always fail, for error-path tests.
    pub(crate) struct FailingStore;

    impl SessionStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "store write refused"))
        }
    }
}
