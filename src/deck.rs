use core::fmt;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use ordermap::OrderMap;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use tracing::debug;

use crate::{
    error::{Error, Result},
    segment::{Snippet, SnippetDef},
    style::StyleMap,
    timing::Timing,
};

/// Ordered, non-empty collection of snippets keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub(crate) snippets: OrderMap<String, Snippet>,
}

impl Deck {
    /// Builds a deck, keeping the given order. Fails on an empty list
    /// or on duplicated ids.
    pub fn new<I: IntoIterator<Item = Snippet>>(snippets: I) -> Result<Self> {
        let mut map = OrderMap::new();
        for snippet in snippets {
            if map.contains_key(snippet.id()) {
                return Err(Error::SnippetDup(snippet.id().into()));
            }
            map.insert(snippet.id().to_string(), snippet);
        }
        if map.is_empty() {
            return Err(Error::VoidDeck);
        }
        Ok(Self { snippets: map })
    }

    /// Number of snippets, always at least one.
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Snippet at `index`, wrapping around the deck.
    pub fn get(&self, index: usize) -> Option<&Snippet> {
        if self.snippets.is_empty() {
            return None;
        }
        self.snippets
            .get_index(index % self.snippets.len())
            .map(|(_, s)| s)
    }

    /// Snippet with the given id.
    pub fn by_id(&self, id: &str) -> Option<&Snippet> {
        self.snippets.get(id)
    }

    /// Position of the snippet with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.snippets.get_index_of(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.snippets.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.values()
    }
}

impl Deck {
    /// Reads a deck from a `.json` or `.toml` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Config::from_file(path)?.deck)
    }

    /// Reads a JSON deck: either a bare array of snippets or a full
    /// configuration object.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(Config::from_json(s)?.deck)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(Config::from_toml(s)?.deck)
    }
}

/// JSON deck.
impl FromStr for Deck {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

/// Everything a typewriter needs: snippets, pace and style overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub deck: Deck,
    pub timing: Timing,
    pub styles: StyleMap,
}

/// Full configuration form. JSON additionally accepts a bare snippet array.
#[derive(Deserialize)]
struct RawConfig {
    snippets: Vec<SnippetDef>,
    #[serde(default)]
    timing: Option<TimingDef>,
    #[serde(default)]
    styles: StyleMap,
}

/// Timing may be written either as a table or as `"typing:100 pause:2000"`.
enum TimingDef {
    Line(String),
    Table(Timing),
}

impl<'de> Deserialize<'de> for TimingDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TimingVisitor;

        impl<'de> Visitor<'de> for TimingVisitor {
            type Value = TimingDef;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a timing line or a timing table")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TimingDef, E> {
                Ok(TimingDef::Line(v.into()))
            }

            fn visit_map<M: MapAccess<'de>>(self, map: M) -> std::result::Result<TimingDef, M::Error> {
                Timing::deserialize(de::value::MapAccessDeserializer::new(map)).map(TimingDef::Table)
            }
        }

        deserializer.deserialize_any(TimingVisitor)
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;
    fn try_from(raw: RawConfig) -> Result<Self> {
        let timing = match raw.timing {
            None => Timing::default(),
            Some(TimingDef::Table(t)) => t,
            Some(TimingDef::Line(line)) => line.parse()?,
        };
        let snippets = raw
            .snippets
            .into_iter()
            .map(Snippet::try_from)
            .collect::<Result<Vec<_>>>()?;
        let deck = Deck::new(snippets)?;
        debug!(snippets = deck.len(), %timing, "config loaded");
        Ok(Self {
            deck,
            timing,
            styles: raw.styles,
        })
    }
}

impl Config {
    /// Accepts either the full object form or a bare array of snippets.
    pub fn from_json(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        let raw = if value.is_array() {
            RawConfig {
                snippets: serde_json::from_value(value)?,
                timing: None,
                styles: StyleMap::default(),
            }
        } else {
            serde_json::from_value(value)?
        };
        Self::try_from(raw)
    }

    /// TOML has no top-level arrays, so only the full form is accepted.
    pub fn from_toml(s: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(s)?;
        Self::try_from(raw)
    }

    pub fn from_reader<R: Read>(r: R, format: &str) -> Result<Self> {
        let mut s = String::new();
        BufReader::new(r).read_to_string(&mut s)?;
        match format {
            "json" => Self::from_json(&s),
            "toml" => Self::from_toml(&s),
            other => Err(Error::ConfigFormat(other.into())),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "json" && ext != "toml" {
            return Err(Error::ConfigFormat(ext));
        }
        let file = File::open(path)?;
        Self::from_reader(file, &ext)
    }
}

impl From<Deck> for Config {
    fn from(deck: Deck) -> Self {
        Self {
            deck,
            timing: Timing::default(),
            styles: StyleMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colors::Color, segment::Chrome, segment::Segment, style::StyleTag};
    use pretty_assertions::assert_eq;

    fn snippet(id: &str, n: usize) -> Snippet {
        Snippet::new(
            id,
            Chrome {
                label: format!("{}.txt", id),
                language: "Text".into(),
                icon: "fas fa-code".into(),
                icon_color: Color::None,
            },
            (0..n).map(|i| Segment::new(&i.to_string(), StyleTag::Number)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn order_and_wrapping() {
        let deck = Deck::new(vec![snippet("b", 1), snippet("a", 2), snippet("c", 3)]).unwrap();
        assert_eq!(deck.ids(), vec!["b", "a", "c"]);
        assert_eq!(deck.get(1).unwrap().id(), "a");
        assert_eq!(deck.get(4).unwrap().id(), "a");
        assert_eq!(deck.position("c"), Some(2));
        assert_eq!(deck.by_id("c").unwrap().len(), 3);
    }

    #[test]
    fn empty_and_duplicate_rejected() {
        assert!(matches!(Deck::new(Vec::new()), Err(Error::VoidDeck)));
        assert!(matches!(
            Deck::new(vec![snippet("a", 1), snippet("a", 2)]),
            Err(Error::SnippetDup(id)) if id == "a"
        ));
    }

    #[test]
    fn bare_json_array() {
        let deck: Deck = r#"[
            {"id": "one", "label": "one.py", "segments": [{"text": "x", "type": "plain"}]},
            {"label": "two.js", "segments": [{"text": "y", "style": "keyword"}]}
        ]"#
        .parse()
        .unwrap();
        assert_eq!(deck.ids(), vec!["one", "two.js"]);
    }

    #[test]
    fn full_json_with_timing_line() {
        let config = Config::from_json(
            r#"{
                "timing": "typing:60 pause:500",
                "styles": {"classes": {"keyword": "kw"}},
                "snippets": [{"label": "a", "segments": [{"text": "fn", "type": "keyword"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.timing.typing_interval, 60);
        assert_eq!(config.timing.pause_duration, 500);
        assert_eq!(config.styles.class(StyleTag::Keyword).as_deref(), Some("kw"));
    }

    #[test]
    fn toml_config() {
        let config = Config::from_toml(
            r##"
            [timing]
            typing_interval = 40

            [[snippets]]
            id = "rs"
            label = "main.rs"
            language = "Rust"
            icon_color = "#dea584"
            segments = [
                { text = "fn", type = "keyword" },
                { text = " main", type = "function" },
            ]
            "##,
        )
        .unwrap();
        assert_eq!(config.timing.typing_interval, 40);
        assert_eq!(config.timing.pause_duration, 2000);
        let s = config.deck.by_id("rs").unwrap();
        assert_eq!(s.chrome().icon_color, Color::RGB(0xde, 0xa5, 0x84));
        assert_eq!(s.source(), "fn main");
    }

    #[test]
    fn unknown_style_tag_is_named() {
        let full = Config::from_json(
            r#"{"snippets": [{"label": "a", "segments": [{"text": "x", "type": "sparkle"}]}]}"#,
        );
        assert!(matches!(full, Err(Error::StyleTag(tag)) if tag == "sparkle"));

        let bare = Deck::from_json(r#"[{"label": "a", "segments": [{"text": "x", "type": "sparkle"}]}]"#);
        assert!(matches!(bare, Err(Error::StyleTag(tag)) if tag == "sparkle"));

        let toml = Config::from_toml(
            r#"
            [[snippets]]
            label = "a"
            segments = [{ text = "x", type = "sparkle" }]
            "#,
        );
        assert!(matches!(toml, Err(Error::StyleTag(tag)) if tag == "sparkle"));
    }

    #[test]
    fn timing_errors_keep_their_kind() {
        let line = Config::from_json(
            r#"{"timing": "typing:fast", "snippets": [{"label": "a", "segments": [{"text": "x", "type": "plain"}]}]}"#,
        );
        assert!(matches!(line, Err(Error::TimingValue(v, _)) if v == "typing:fast"));

        let table = Config::from_json(
            r#"{"timing": {"pause_duration": "long"}, "snippets": [{"label": "a", "segments": [{"text": "x", "type": "plain"}]}]}"#,
        );
        match table {
            Err(Error::Json(msg)) => assert!(!msg.contains("untagged"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_configs_fail_fast() {
        assert!(matches!(Deck::from_json("[]"), Err(Error::VoidDeck)));
        assert!(matches!(
            Deck::from_json(r#"[{"label": "a", "segments": []}]"#),
            Err(Error::VoidSnippet(_))
        ));
        assert!(matches!(Deck::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            Config::from_reader("[]".as_bytes(), "yaml"),
            Err(Error::ConfigFormat(_))
        ));
        assert!(matches!(
            Deck::from_file("snippets.yaml"),
            Err(Error::ConfigFormat(ext)) if ext == "yaml"
        ));
    }
}
