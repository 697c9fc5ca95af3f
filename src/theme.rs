use core::fmt;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Storage key holding the preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    /// Theme name understood by the embedded code viewer.
    pub fn editor_theme(&self) -> &'static str {
        match self {
            Theme::Light => "vs",
            Theme::Dark => "vs-dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::ThemeParsing(other.into())),
        }
    }
}

/// String key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, lost with the process.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    pub values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.into(), value.into());
        Ok(())
    }
}

/// Store backed by a JSON object of strings on disk.
/// A missing file reads as empty. Writes refuse to touch a file whose
/// content cannot be parsed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(map) => map.get(key).cloned(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "preferences unreadable");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.into(), value.into());
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

/// The active theme plus where it is persisted.
#[derive(Debug, Clone)]
pub struct ThemeSettings<S> {
    store: S,
    prefers_dark: bool,
    current: Theme,
}

impl<S: PreferenceStore> ThemeSettings<S> {
    /// Picks the initial theme: a stored `dark`/`light` wins, then the
    /// system hint, then light. An explicit choice is written back.
    pub fn init(store: S, prefers_dark: bool) -> Self {
        let mut settings = Self {
            store,
            prefers_dark,
            current: Theme::Light,
        };
        let saved = settings
            .store
            .get(THEME_KEY)
            .and_then(|v| v.parse::<Theme>().ok());
        match saved {
            Some(theme) => settings.set(theme),
            None if prefers_dark => settings.set(Theme::Dark),
            None => {}
        }
        debug!(theme = %settings.current, "theme initialized");
        settings
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    /// Switches to `theme` and persists it. A failing store keeps the
    /// theme for this session.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(err) = self.store.set(THEME_KEY, &theme.to_string()) {
            warn!(%err, "failed to persist theme");
        }
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled());
        self.current
    }

    pub fn editor_theme(&self) -> &'static str {
        self.current.editor_theme()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
