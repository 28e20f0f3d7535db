//! Configuration consumed by the tag resolution engine.
//! Built once from command-line arguments and passed explicitly to every
//! fill and fold call.

use log::LevelFilter;

/// How much the engine reports about each tag it handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Silent,
    /// Report which tags were translated and which were not.
    Translated,
    /// Also report the value each translated tag was replaced with.
    TranslatedWithValue,
}

impl Verbosity {
    /// Maps a `-v` occurrence count to a verbosity.
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Silent,
            1 => Verbosity::Translated,
            _ => Verbosity::TranslatedWithValue,
        }
    }

    /// Log level the logger must allow for this verbosity to be visible.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::Warn,
            Verbosity::Translated => LevelFilter::Info,
            Verbosity::TranslatedWithValue => LevelFilter::Debug,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Prepended to every tag path, joined with a `.`.
    pub path_prefix: String,
    pub verbosity: Verbosity,
}

impl Config {
    pub fn new(path_prefix: impl Into<String>, verbosity: Verbosity) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            verbosity,
        }
    }

    /// Applies the path prefix. The prefix is used as given; an empty prefix
    /// leaves the path untouched.
    pub fn effective_path(&self, path: &str) -> String {
        if self.path_prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}.{}", self.path_prefix, path)
        }
    }
}
