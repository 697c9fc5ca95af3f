use std::convert::TryFrom;
use std::slice;

use serde::Deserialize;

use crate::{
    colors::Color,
    error::{Error, Result},
    style::StyleTag,
};

/// A chunk of snippet text drawn with a single style.
/// May contain `\n` to break the rendered output into several lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub(crate) text: String,
    pub(crate) style: StyleTag,
}

impl Segment {
    pub fn new(text: &str, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> StyleTag {
        self.style
    }
}

/// Per-snippet decoration shown around the code: file name, language, icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chrome {
    pub label: String,
    pub language: String,
    pub icon: String,
    pub icon_color: Color,
}

/// An immutable, non-empty sequence of segments with its chrome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snippet {
    pub(crate) id: String,
    pub(crate) chrome: Chrome,
    pub(crate) segments: Vec<Segment>,
}

impl Snippet {
    /// Creates a snippet, rejecting an empty id or segment list.
    pub fn new(id: &str, chrome: Chrome, segments: Vec<Segment>) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::SnippetId(id.into()));
        }
        if chrome.label.trim().is_empty() {
            return Err(Error::MissingField(id.into(), "label"));
        }
        if segments.is_empty() {
            return Err(Error::VoidSnippet(id.into()));
        }
        Ok(Self {
            id: id.into(),
            chrome,
            segments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Number of segments; the upper bound of the cycle cursor.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed snippet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates segments in order. The iterator is cheap to clone, so
    /// callers can restart it at any point.
    pub fn segments(&self) -> slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Full text of the snippet with all segments revealed.
    pub fn source(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Snippet as written in configuration files.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SnippetDef {
    pub id: Option<String>,
    #[serde(alias = "filename")]
    pub label: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "iconColor")]
    pub icon_color: Color,
    #[serde(alias = "lines")]
    pub segments: Vec<SegmentDef>,
}

/// Segment as written in configuration files. The tag stays a string
/// until validation so an unknown tag is reported by name.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SegmentDef {
    pub text: String,
    #[serde(rename = "type", alias = "style")]
    pub style: String,
}

impl TryFrom<SegmentDef> for Segment {
    type Error = Error;
    fn try_from(def: SegmentDef) -> Result<Self> {
        Ok(Segment {
            text: def.text,
            style: def.style.parse()?,
        })
    }
}

/// Validates a configuration entry. Id defaults to the label.
impl TryFrom<SnippetDef> for Snippet {
    type Error = Error;
    fn try_from(def: SnippetDef) -> Result<Self> {
        let label = def.label.unwrap_or_default();
        let id = def.id.unwrap_or_else(|| label.clone());
        let segments = def
            .segments
            .into_iter()
            .map(Segment::try_from)
            .collect::<Result<Vec<_>>>()?;
        Snippet::new(
            &id,
            Chrome {
                label,
                language: def.language,
                icon: def.icon,
                icon_color: def.icon_color,
            },
            segments,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chrome(label: &str) -> Chrome {
        Chrome {
            label: label.into(),
            language: "Python".into(),
            icon: "fab fa-python".into(),
            icon_color: Color::RGB(0x37, 0x76, 0xab),
        }
    }

    #[test]
    fn new_rejects_malformed() {
        let seg = vec![Segment::new("x", StyleTag::Plain)];
        assert!(matches!(
            Snippet::new("  ", chrome("a.py"), seg.clone()),
            Err(Error::SnippetId(_))
        ));
        assert!(matches!(
            Snippet::new("a", chrome("a.py"), vec![]),
            Err(Error::VoidSnippet(id)) if id == "a"
        ));
        assert!(matches!(
            Snippet::new("a", chrome(""), seg),
            Err(Error::MissingField(_, "label"))
        ));
    }

    #[test]
    fn segments_restart() {
        let s = Snippet::new(
            "a",
            chrome("a.py"),
            vec![
                Segment::new("def", StyleTag::Keyword),
                Segment::new(" f", StyleTag::Function),
            ],
        )
        .unwrap();
        let mut it = s.segments();
        it.next();
        let again = s.segments();
        assert_eq!(it.count(), 1);
        assert_eq!(again.count(), 2);
        assert_eq!(s.source(), "def f");
    }

    #[test]
    fn definition_from_json() {
        let def: SnippetDef = serde_json::from_str(
            r##"{
                "filename": "scraper.py",
                "language": "Python",
                "icon": "fab fa-python",
                "iconColor": "#3776ab",
                "lines": [
                    {"text": "import", "type": "keyword"},
                    {"text": " requests", "type": "text"}
                ]
            }"##,
        )
        .unwrap();
        let s = Snippet::try_from(def).unwrap();
        assert_eq!(s.id(), "scraper.py");
        assert_eq!(s.chrome(), &chrome("scraper.py"));
        assert_eq!(
            s.segments().cloned().collect::<Vec<_>>(),
            vec![
                Segment::new("import", StyleTag::Keyword),
                Segment::new(" requests", StyleTag::Plain),
            ]
        );
    }

    #[test]
    fn definition_with_unknown_tag_fails() {
        let def: SnippetDef = serde_json::from_str(
            r#"{"label": "x", "segments": [{"text": "a", "type": "Sparkle"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            Snippet::try_from(def),
            Err(Error::StyleTag(tag)) if tag == "sparkle"
        ));
    }
}
