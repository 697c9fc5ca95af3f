use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::{
    cycle::{CycleState, Step},
    deck::Config,
    render::{gutter, line_count, render, Line},
    segment::Chrome,
    style::StyleMap,
};

/// Receives the rendered code lines.
pub trait CodeSurface {
    fn show(&mut self, lines: &[Line]);
}

/// Receives the number of rendered lines.
pub trait Gutter {
    fn show_count(&mut self, count: usize);
}

/// Receives per-snippet decoration when the snippet changes.
pub trait ChromeSink {
    fn show_chrome(&mut self, chrome: &Chrome);
}

impl<F: FnMut(&[Line])> CodeSurface for F {
    fn show(&mut self, lines: &[Line]) {
        self(lines)
    }
}

impl<F: FnMut(usize)> Gutter for F {
    fn show_count(&mut self, count: usize) {
        self(count)
    }
}

impl<F: FnMut(&Chrome)> ChromeSink for F {
    fn show_chrome(&mut self, chrome: &Chrome) {
        self(chrome)
    }
}

/// Calls `frame` once per display refresh with a monotonic timestamp in
/// milliseconds, until `frame` returns false or the source runs dry.
pub trait FrameSource {
    fn run(&mut self, frame: &mut dyn FnMut(u64) -> bool);
}

/// A running typewriter: state machine, configuration and sinks.
pub struct Typewriter<S, G, C> {
    config: Config,
    state: CycleState,
    surface: S,
    gutter: G,
    chrome: Option<C>,
    origin: Option<u64>,
    last_lines: Vec<Line>,
}

impl<S: CodeSurface, G: Gutter, C: ChromeSink> Typewriter<S, G, C> {
    /// Starts a typewriter. Returns `None` without doing anything when the
    /// code surface or the gutter is missing. Chrome is optional.
    pub fn start(
        config: Config,
        surface: Option<S>,
        gutter: Option<G>,
        chrome: Option<C>,
    ) -> Option<Self> {
        let (surface, gutter) = match (surface, gutter) {
            (Some(s), Some(g)) => (s, g),
            (s, g) => {
                warn!(
                    surface = s.is_some(),
                    gutter = g.is_some(),
                    "display sinks not found, typewriter not started"
                );
                return None;
            }
        };
        let mut tw = Self {
            config,
            state: CycleState::new(),
            surface,
            gutter,
            chrome,
            origin: None,
            last_lines: Vec::new(),
        };
        tw.push_chrome();
        tw.redraw();
        info!(snippets = tw.config.deck.len(), timing = %tw.config.timing, "typewriter started");
        Some(tw)
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn styles(&self) -> &StyleMap {
        &self.config.styles
    }

    /// Lines pushed to the surface by the last redraw.
    pub fn lines(&self) -> &[Line] {
        &self.last_lines
    }

    /// Handles one display refresh.
    pub fn frame(&mut self, timestamp: u64) -> Step {
        let origin = *self.origin.get_or_insert(timestamp);
        let now = timestamp.saturating_sub(origin);
        let segments = match self.config.deck.get(self.state.index()) {
            Some(snippet) => snippet.len(),
            None => return Step::Idle,
        };
        let step = self.state.tick(
            now,
            segments,
            self.config.deck.len(),
            &self.config.timing,
        );
        if let Step::Switched { .. } = step {
            self.push_chrome();
        }
        if step.changed() {
            self.redraw();
        }
        step
    }

    /// Drives the typewriter from `frames` until the source stops.
    pub fn run<F: FrameSource>(&mut self, frames: &mut F) {
        frames.run(&mut |ts| {
            self.frame(ts);
            true
        });
    }

    /// Like [`Typewriter::run`], but stops as soon as `stop` returns true
    /// after a frame.
    pub fn run_until<F, P>(&mut self, frames: &mut F, mut stop: P)
    where
        F: FrameSource,
        P: FnMut(&Self, Step) -> bool,
    {
        frames.run(&mut |ts| {
            let step = self.frame(ts);
            !stop(&*self, step)
        });
    }

    fn push_chrome(&mut self) {
        let snippet = match self.config.deck.get(self.state.index()) {
            Some(s) => s,
            None => return,
        };
        debug!(snippet = snippet.id(), "chrome swap");
        if let Some(sink) = &mut self.chrome {
            sink.show_chrome(snippet.chrome());
        }
    }

    fn redraw(&mut self) {
        let snippet = match self.config.deck.get(self.state.index()) {
            Some(s) => s,
            None => return,
        };
        let lines = render(snippet, self.state.cursor(), self.state.phase());
        self.gutter.show_count(line_count(&lines));
        self.surface.show(&lines);
        self.last_lines = lines;
    }
}

/// Frame source pacing the callback with `thread::sleep`.
#[derive(Debug, Clone)]
pub struct ThreadFrames {
    /// Time between frames.
    pub period: Duration,
    /// Stop after this many frames; `None` runs until the callback stops.
    pub limit: Option<u64>,
}

impl Default for ThreadFrames {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(16),
            limit: None,
        }
    }
}

impl FrameSource for ThreadFrames {
    fn run(&mut self, frame: &mut dyn FnMut(u64) -> bool) {
        let start = Instant::now();
        let mut count = 0u64;
        loop {
            if let Some(limit) = self.limit {
                if count >= limit {
                    break;
                }
            }
            count += 1;
            let ts = start.elapsed().as_millis() as u64;
            if !frame(ts) {
                break;
            }
            thread::sleep(self.period);
        }
    }
}

#[derive(Debug)]
struct Screen<W> {
    out: W,
    styles: StyleMap,
    chrome: Option<Chrome>,
    count: usize,
}

impl<W: Write> Screen<W> {
    fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let mut frame = String::from("\x1b[H\x1b[2J");
        if let Some(chrome) = &self.chrome {
            frame += &chrome.icon_color.to_ansi(true);
            frame += &format!("\u{25cf} {}", chrome.label);
            frame += &crate::colors::reset_ansi();
            if !chrome.language.is_empty() {
                frame += &format!("  [{}]", chrome.language);
            }
            frame += "\n";
        }
        for n in gutter(self.count.max(lines.len())) {
            frame += &format!("\x1b[2m{:>3}\x1b[22m \u{2502} ", n);
            if let Some(line) = lines.get(n - 1) {
                frame += &line.to_ansi(&self.styles);
            }
            frame += "\n";
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

/// Terminal surface redrawing the whole editor on every change.
///
/// Clones share one screen, so the same value can be handed to the
/// typewriter as surface, gutter and chrome sink.
#[derive(Debug)]
pub struct AnsiTerminal<W> {
    screen: Rc<RefCell<Screen<W>>>,
}

impl<W> Clone for AnsiTerminal<W> {
    fn clone(&self) -> Self {
        Self {
            screen: Rc::clone(&self.screen),
        }
    }
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W, styles: StyleMap) -> Self {
        Self {
            screen: Rc::new(RefCell::new(Screen {
                out,
                styles,
                chrome: None,
                count: 0,
            })),
        }
    }
}

impl AnsiTerminal<io::Stdout> {
    pub fn stdout(styles: StyleMap) -> Self {
        Self::new(io::stdout(), styles)
    }
}

impl<W: Write> CodeSurface for AnsiTerminal<W> {
    fn show(&mut self, lines: &[Line]) {
        if let Err(err) = self.screen.borrow_mut().draw(lines) {
            warn!(%err, "terminal redraw failed");
        }
    }
}

impl<W: Write> Gutter for AnsiTerminal<W> {
    fn show_count(&mut self, count: usize) {
        self.screen.borrow_mut().count = count;
    }
}

impl<W: Write> ChromeSink for AnsiTerminal<W> {
    fn show_chrome(&mut self, chrome: &Chrome) {
        self.screen.borrow_mut().chrome = Some(chrome.clone());
    }
}
