use core::fmt;
use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::{
    colors::{Color, Color4},
    error::Error,
};

/// Highlighting class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Keyword,
    Identifier,
    Function,
    Class,
    Param,
    String,
    Number,
    Operator,
    Punctuation,
    Comment,
    Plain,
}

impl StyleTag {
    pub const ALL: [StyleTag; 11] = [
        StyleTag::Keyword,
        StyleTag::Identifier,
        StyleTag::Function,
        StyleTag::Class,
        StyleTag::Param,
        StyleTag::String,
        StyleTag::Number,
        StyleTag::Operator,
        StyleTag::Punctuation,
        StyleTag::Comment,
        StyleTag::Plain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Keyword => "keyword",
            StyleTag::Identifier => "identifier",
            StyleTag::Function => "function",
            StyleTag::Class => "class",
            StyleTag::Param => "param",
            StyleTag::String => "string",
            StyleTag::Number => "number",
            StyleTag::Operator => "operator",
            StyleTag::Punctuation => "punctuation",
            StyleTag::Comment => "comment",
            StyleTag::Plain => "plain",
        }
    }
}

/// Parses a tag name; `text` is accepted as an alias of `plain`.
impl FromStr for StyleTag {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "text" {
            return Ok(StyleTag::Plain);
        }
        StyleTag::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or(Error::StyleTag(s))
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl<'de> Deserialize<'de> for StyleTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-tag overrides for CSS classes and terminal colors.
/// Tags without an override fall back to the built-in mapping.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleMap {
    pub classes: HashMap<StyleTag, String>,
    pub colors: HashMap<StyleTag, Color>,
}

impl StyleMap {
    /// Returns the CSS class for a tag; `None` means the run is emitted unwrapped.
    pub fn class(&self, tag: StyleTag) -> Option<String> {
        if let Some(class) = self.classes.get(&tag) {
            let class: String = class
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == ' ')
                .collect();
            let class = class.trim();
            if class.is_empty() {
                None
            } else {
                Some(class.to_string())
            }
        } else {
            match tag {
                StyleTag::Plain => None,
                tag => Some(format!("vscode-{}", tag.name())),
            }
        }
    }

    /// Returns the terminal color for a tag.
    pub fn color(&self, tag: StyleTag) -> Color {
        if let Some(color) = self.colors.get(&tag) {
            return *color;
        }
        match tag {
            StyleTag::Keyword => Color::Color4(Color4::Magenta, true),
            StyleTag::Identifier => Color::Color4(Color4::Cyan, true),
            StyleTag::Function => Color::Color4(Color4::Yellow, true),
            StyleTag::Class => Color::Color4(Color4::Green, false),
            StyleTag::Param => Color::Color4(Color4::Cyan, false),
            StyleTag::String => Color::Color4(Color4::Red, false),
            StyleTag::Number => Color::Color4(Color4::Green, true),
            StyleTag::Operator => Color::Color4(Color4::White, true),
            StyleTag::Punctuation => Color::None,
            StyleTag::Comment => Color::Color4(Color4::Black, true),
            StyleTag::Plain => Color::None,
        }
    }

    pub fn set_class(&mut self, tag: StyleTag, class: &str) {
        self.classes.insert(tag, class.into());
    }

    pub fn set_color(&mut self, tag: StyleTag, color: Color) {
        self.colors.insert(tag, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_and_aliases() {
        assert_eq!("keyword".parse::<StyleTag>().unwrap(), StyleTag::Keyword);
        assert_eq!(" Text ".parse::<StyleTag>().unwrap(), StyleTag::Plain);
        assert_eq!("param".parse::<StyleTag>().unwrap(), StyleTag::Param);
        match "bogus".parse::<StyleTag>() {
            Err(Error::StyleTag(tag)) => assert_eq!(tag, "bogus"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn every_tag_round_trips_through_name() {
        for tag in StyleTag::ALL {
            assert_eq!(tag.name().parse::<StyleTag>().unwrap(), tag);
        }
    }

    #[test]
    fn default_classes() {
        let map = StyleMap::default();
        assert_eq!(map.class(StyleTag::Keyword).as_deref(), Some("vscode-keyword"));
        assert_eq!(map.class(StyleTag::Plain), None);
    }

    #[test]
    fn overrides_are_sanitized() {
        let mut map = StyleMap::default();
        map.set_class(StyleTag::String, "tok-str\" onclick=\"x");
        map.set_class(StyleTag::Number, "  ");
        assert_eq!(map.class(StyleTag::String).as_deref(), Some("tok-str onclickx"));
        assert_eq!(map.class(StyleTag::Number), None);
        map.set_color(StyleTag::Plain, Color::RGB(1, 2, 3));
        assert_eq!(map.color(StyleTag::Plain), Color::RGB(1, 2, 3));
    }

    #[test]
    fn deserialize_overrides() {
        let map: StyleMap =
            serde_json::from_str(r##"{"classes": {"keyword": "kw"}, "colors": {"text": "#ffffff"}}"##)
                .unwrap();
        assert_eq!(map.class(StyleTag::Keyword).as_deref(), Some("kw"));
        assert_eq!(map.color(StyleTag::Plain), Color::RGB(255, 255, 255));
    }
}
