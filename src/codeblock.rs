use tracing::warn;

pub use crate::helpers::decode_entities;

/// Height of one editor row, in pixels.
pub const LINE_HEIGHT: u32 = 22;
/// How long the copy button shows its result before resetting, in milliseconds.
pub const FEEDBACK_DURATION: u64 = 2000;

/// A code block as embedded in a lesson page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

impl CodeBlock {
    /// Builds a block from template attributes: entity-encoded code and an
    /// optional language (defaults to `plaintext`).
    pub fn from_attributes(language: Option<&str>, encoded_code: &str) -> Self {
        let language = match language.map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => "plaintext".into(),
        };
        Self {
            language,
            code: decode_entities(encoded_code),
        }
    }

    pub fn line_count(&self) -> usize {
        self.code.split('\n').count()
    }

    /// Container class list; short blocks get a compact modifier.
    pub fn container_class(&self) -> String {
        match self.line_count() {
            1 => "monaco-editor-container single-line".into(),
            2 => "monaco-editor-container two-lines".into(),
            _ => "monaco-editor-container".into(),
        }
    }

    /// Initial editor height in pixels before the viewer measures content.
    pub fn height(&self) -> u32 {
        match self.line_count() {
            1 => 55,
            2 => 75,
            n => (n as u32).saturating_mul(LINE_HEIGHT).saturating_add(60).max(100),
        }
    }
}

/// System clipboard access.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

impl<F: FnMut(&str) -> Result<(), String>> Clipboard for F {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self(text)
    }
}

/// What the copy button currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyState {
    Idle,
    Copied { until: u64 },
    Failed { until: u64 },
}

impl CopyState {
    pub fn icon(&self) -> &'static str {
        match self {
            CopyState::Idle => "fas fa-copy",
            CopyState::Copied { .. } => "fas fa-check",
            CopyState::Failed { .. } => "fas fa-times",
        }
    }
}

/// Copy button attached to one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    state: CopyState,
}

impl Default for CopyButton {
    fn default() -> Self {
        Self {
            state: CopyState::Idle,
        }
    }
}

impl CopyButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CopyState {
        self.state
    }

    /// Copies `block` at time `now` and shows the outcome for
    /// [`FEEDBACK_DURATION`]. A click during feedback copies again and
    /// restarts the timer.
    pub fn click<C: Clipboard>(&mut self, clipboard: &mut C, block: &CodeBlock, now: u64) -> CopyState {
        let until = now.saturating_add(FEEDBACK_DURATION);
        self.state = match clipboard.write_text(&block.code) {
            Ok(()) => CopyState::Copied { until },
            Err(err) => {
                warn!(%err, "failed to copy code block");
                CopyState::Failed { until }
            }
        };
        self.state
    }

    /// Resets the feedback once its deadline passed. Returns whether the
    /// state changed.
    pub fn tick(&mut self, now: u64) -> bool {
        match self.state {
            CopyState::Copied { until } | CopyState::Failed { until } if now >= until => {
                self.state = CopyState::Idle;
                true
            }
            _ => false,
        }
    }
}
