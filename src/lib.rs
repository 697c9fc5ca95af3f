mod builtin;
pub mod codeblock;
pub mod colors;
pub mod cycle;
pub mod deck;
pub mod error;
pub mod filter;
mod helpers;
pub mod host;
pub mod quiz;
pub mod render;
pub mod scroll;
pub mod segment;
pub mod slider;
pub mod style;
pub mod theme;
pub mod timing;

pub use codeblock::{decode_entities, Clipboard, CodeBlock, CopyButton, CopyState};
pub use colors::{Color, Color4};
pub use cycle::{CycleState, Phase, Step};
pub use deck::{Config, Deck};
pub use error::{Error, Result};
pub use filter::{Course, CourseFilter};
pub use host::{AnsiTerminal, ChromeSink, CodeSurface, FrameSource, Gutter, ThreadFrames, Typewriter};
pub use render::{render, render_html, Line, Run};
pub use scroll::{ElementBox, Menu, MenuEvent, Reveal, ScrollMarks};
pub use segment::{Chrome, Segment, Snippet};
pub use slider::{CardBox, Layout, Pager};
pub use style::{StyleMap, StyleTag};
pub use theme::{FileStore, MemoryStore, PreferenceStore, Theme, ThemeSettings};
pub use timing::Timing;
