use core::fmt::Display;
use std::{num::ParseIntError, sync::Arc};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or loading typewriter configuration.
#[derive(Debug, Clone)]
pub enum Error {
    /// Deck contains zero snippets.
    VoidDeck,
    /// Snippet with the given id has no segments.
    VoidSnippet(String),
    /// Snippet id is empty or contains only whitespace.
    SnippetId(String),
    /// Snippet id defined multiple times in one deck.
    SnippetDup(String),
    /// Unknown segment style tag.
    StyleTag(String),
    /// Required snippet field missing or empty.
    MissingField(String, &'static str),

    /// Failed to parse color string.
    ColorParsing(String),

    /// Failed to parse timing line.
    TimingParsing(String),
    /// Failed to parse a timing value.
    TimingValue(String, ParseIntError),
    /// Timing key presented multiple times.
    TimingDup(String),

    /// Failed to parse theme name.
    ThemeParsing(String),

    /// Config file extension is not one of the supported formats.
    ConfigFormat(String),
    /// JSON configuration is malformed.
    Json(String),
    /// TOML configuration is malformed.
    Toml(String),

    /// I/O error occurred.
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::VoidDeck => write!(f, "0 snippets in deck"),
            Error::VoidSnippet(id) => write!(f, "snippet '{}' has no segments", id),
            Error::SnippetId(id) => write!(f, "'{}' cannot be used as snippet id", id),
            Error::SnippetDup(id) => write!(f, "snippet '{}' duplicates", id),
            Error::StyleTag(tag) => write!(f, "unknown style tag '{}'", tag),
            Error::MissingField(id, field) => {
                write!(f, "snippet '{}' have no value for '{}'", id, field)
            }
            Error::ColorParsing(s) => write!(f, "failed to parse color: {}", s),
            Error::TimingParsing(s) => write!(f, "failed to parse timing line: {}", s),
            Error::TimingValue(s, err) => {
                write!(f, "fail to parse timing value '{}' :{}", s, err)
            }
            Error::TimingDup(k) => write!(f, "timing key '{}' duplicates", k),
            Error::ThemeParsing(s) => {
                write!(f, "failed to parse theme '{}'; value must be 'light' or 'dark'", s)
            }
            Error::ConfigFormat(ext) => write!(f, "unsupported config format: '{}'", ext),
            Error::Json(err) => write!(f, "malformed json config: {}", err),
            Error::Toml(err) => write!(f, "malformed toml config: {}", err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
