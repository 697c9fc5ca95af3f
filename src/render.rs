use std::fmt::Write;

use crate::{
    colors::reset_ansi,
    cycle::Phase,
    helpers::{escape_html, strip_controls},
    segment::Snippet,
    style::{StyleMap, StyleTag},
};

/// Minimal number of rows shown in the line-number gutter.
pub const GUTTER_MIN_ROWS: usize = 10;

/// A piece of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Run {
    Text { style: StyleTag, text: String },
    /// Blinking cursor at the end of the typed text.
    Caret,
}

/// One display line made of runs. Text is kept raw here; escaping happens
/// in the output methods.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub runs: Vec<Run>,
}

impl Line {
    /// Plain text of the line without styling or caret.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            if let Run::Text { text, .. } = run {
                out.push_str(text);
            }
        }
        out
    }

    pub fn has_caret(&self) -> bool {
        self.runs.iter().any(|r| *r == Run::Caret)
    }

    /// Markup for the inner part of a code line. All text is escaped.
    pub fn to_html(&self, styles: &StyleMap) -> String {
        let mut html = String::new();
        for run in &self.runs {
            match run {
                Run::Text { style, text } => match styles.class(*style) {
                    Some(class) => {
                        let _ = write!(
                            html,
                            "<span class=\"{}\">{}</span>",
                            escape_html(&class),
                            escape_html(text)
                        );
                    }
                    None => html += &escape_html(text),
                },
                Run::Caret => html += "<span class=\"vscode-cursor\"></span>",
            }
        }
        html
    }

    /// Terminal rendering; control characters are dropped from the text.
    pub fn to_ansi(&self, styles: &StyleMap) -> String {
        let mut ansi = String::new();
        for run in &self.runs {
            match run {
                Run::Text { style, text } => {
                    ansi += &styles.color(*style).to_ansi(true);
                    ansi += &strip_controls(text);
                }
                Run::Caret => ansi += "\x1b[5m\u{258f}\x1b[25m",
            }
        }
        ansi += &reset_ansi();
        ansi
    }
}

/// Renders the first `cursor` segments of `snippet`.
///
/// `\n` inside segments starts a new line and empty pieces produce no
/// run. A trailing empty line is dropped, but the result always holds at
/// least one line. The caret is appended to the last line unless the
/// phase is [`Phase::Deleting`].
pub fn render(snippet: &Snippet, cursor: usize, phase: Phase) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();
    for segment in snippet.segments().take(cursor) {
        for (i, part) in segment.text().split('\n').enumerate() {
            if i > 0 {
                lines.push(std::mem::take(&mut current));
            }
            if !part.is_empty() {
                current.runs.push(Run::Text {
                    style: segment.style(),
                    text: part.to_string(),
                });
            }
        }
    }
    if !current.runs.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    if phase.shows_caret() {
        if let Some(last) = lines.last_mut() {
            last.runs.push(Run::Caret);
        }
    }
    lines
}

/// Number reported to the line-count indicator.
pub fn line_count(lines: &[Line]) -> usize {
    lines.len().max(1)
}

/// Full markup for the code surface, one `div` per line.
pub fn render_html(lines: &[Line], styles: &StyleMap) -> String {
    let mut html = String::new();
    for line in lines {
        let inner = line.to_html(styles);
        let inner = if inner.is_empty() { " ".into() } else { inner };
        let _ = write!(html, "<div class=\"vscode-code-line\">{}</div>", inner);
    }
    html
}

/// Row numbers for the gutter: `1..=max(count, GUTTER_MIN_ROWS)`.
pub fn gutter(count: usize) -> Vec<usize> {
    (1..=count.max(GUTTER_MIN_ROWS)).collect()
}

pub fn gutter_html(count: usize) -> String {
    let mut html = String::new();
    for n in gutter(count) {
        let _ = write!(html, "<div class=\"vscode-line-number\">{}</div>", n);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colors::Color,
        segment::{Chrome, Segment},
    };
    use pretty_assertions::assert_eq;

    fn snippet(segments: Vec<Segment>) -> Snippet {
        Snippet::new(
            "t",
            Chrome {
                label: "t.py".into(),
                language: "Python".into(),
                icon: String::new(),
                icon_color: Color::None,
            },
            segments,
        )
        .unwrap()
    }

    fn text(style: StyleTag, t: &str) -> Run {
        Run::Text {
            style,
            text: t.into(),
        }
    }

    fn sample() -> Snippet {
        snippet(vec![
            Segment::new("def", StyleTag::Keyword),
            Segment::new(" f", StyleTag::Function),
            Segment::new("():\n    ", StyleTag::Plain),
            Segment::new("return", StyleTag::Keyword),
            Segment::new(" 1", StyleTag::Number),
        ])
    }

    #[test]
    fn splits_lines_and_appends_caret() {
        let lines = render(&sample(), 5, Phase::Typing);
        assert_eq!(
            lines,
            vec![
                Line {
                    runs: vec![
                        text(StyleTag::Keyword, "def"),
                        text(StyleTag::Function, " f"),
                        text(StyleTag::Plain, "():"),
                    ]
                },
                Line {
                    runs: vec![
                        text(StyleTag::Plain, "    "),
                        text(StyleTag::Keyword, "return"),
                        text(StyleTag::Number, " 1"),
                        Run::Caret,
                    ]
                },
            ]
        );
    }

    #[test]
    fn trailing_break_keeps_caret_on_previous_line() {
        let s = snippet(vec![
            Segment::new("import", StyleTag::Keyword),
            Segment::new(" os\n", StyleTag::Plain),
            Segment::new("x", StyleTag::Plain),
        ]);
        let lines = render(&s, 2, Phase::Typing);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "import os");
        assert!(lines[0].has_caret());
    }

    #[test]
    fn blank_lines_in_the_middle_are_kept() {
        let s = snippet(vec![
            Segment::new("a\n\n", StyleTag::Plain),
            Segment::new("b", StyleTag::Plain),
        ]);
        let lines = render(&s, 2, Phase::Deleting);
        assert_eq!(
            lines.iter().map(|l| l.text()).collect::<Vec<_>>(),
            vec!["a", "", "b"]
        );
        assert_eq!(line_count(&lines), 3);
    }

    #[test]
    fn empty_prefix_is_one_line() {
        let lines = render(&sample(), 0, Phase::Typing);
        assert_eq!(lines, vec![Line { runs: vec![Run::Caret] }]);
        let lines = render(&sample(), 0, Phase::Deleting);
        assert_eq!(lines, vec![Line::default()]);
        assert_eq!(line_count(&lines), 1);
    }

    #[test]
    fn caret_iff_typing_or_pausing() {
        let s = sample();
        for cursor in 0..=s.len() {
            for (phase, expect) in [
                (Phase::Typing, true),
                (Phase::Pausing { until: 10 }, true),
                (Phase::Deleting, false),
            ] {
                let lines = render(&s, cursor, phase);
                let carets: usize = lines
                    .iter()
                    .map(|l| l.runs.iter().filter(|r| **r == Run::Caret).count())
                    .sum();
                assert_eq!(carets, if expect { 1 } else { 0 });
                if expect {
                    assert!(lines.last().unwrap().has_caret());
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let s = sample();
        for cursor in 0..=s.len() {
            assert_eq!(
                render(&s, cursor, Phase::Typing),
                render(&s, cursor, Phase::Typing)
            );
        }
    }

    #[test]
    fn cursor_beyond_len_renders_everything() {
        let s = sample();
        assert_eq!(render(&s, 99, Phase::Deleting), render(&s, s.len(), Phase::Deleting));
    }

    #[test]
    fn script_is_escaped() {
        let s = snippet(vec![
            Segment::new("<script>alert('x')</script>", StyleTag::String),
            Segment::new(" & <b>", StyleTag::Plain),
        ]);
        let lines = render(&s, 2, Phase::Pausing { until: 0 });
        let html = render_html(&lines, &StyleMap::default());
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert_eq!(
            html,
            concat!(
                "<div class=\"vscode-code-line\">",
                "<span class=\"vscode-string\">",
                "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;</span>",
                " &amp; &lt;b&gt;",
                "<span class=\"vscode-cursor\"></span></div>",
            )
        );
    }

    #[test]
    fn empty_line_html_gets_filler() {
        let html = render_html(&[Line::default()], &StyleMap::default());
        assert_eq!(html, "<div class=\"vscode-code-line\"> </div>");
    }

    #[test]
    fn ansi_strips_escape_sequences() {
        let s = snippet(vec![Segment::new("a\x1b[2Jb", StyleTag::Plain)]);
        let lines = render(&s, 1, Phase::Deleting);
        let ansi = lines[0].to_ansi(&StyleMap::default());
        assert_eq!(ansi, format!("\x1b[39ma[2Jb{}", reset_ansi()));
    }

    #[test]
    fn gutter_has_minimum_rows() {
        assert_eq!(gutter(3), (1..=10).collect::<Vec<_>>());
        assert_eq!(gutter(12).len(), 12);
        assert!(gutter_html(1).starts_with("<div class=\"vscode-line-number\">1</div>"));
    }
}
