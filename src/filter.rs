use serde::Deserialize;

/// Filter value matching every course.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Space or comma separated tag list as rendered on the card.
    #[serde(default)]
    pub tags: String,
}

/// Current state of the search box and the active tag button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFilter {
    term: String,
    tag: String,
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            term: String::new(),
            tag: ALL.into(),
        }
    }
}

/// Result of applying a filter to a course list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visible {
    pub indices: Vec<usize>,
}

impl Visible {
    /// Whether the "no matching courses" message should be shown.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

impl CourseFilter {
    pub fn new(term: &str, tag: &str) -> Self {
        let mut f = Self::default();
        f.set_term(term);
        f.set_tag(tag);
        f
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = term.to_lowercase();
    }

    /// Empty tag means no tag filtering.
    pub fn set_tag(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        self.tag = if tag.is_empty() { ALL.into() } else { tag };
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn matches(&self, course: &Course) -> bool {
        let tags = course.tags.to_lowercase();
        let matches_term = course.title.to_lowercase().contains(&self.term)
            || course.description.to_lowercase().contains(&self.term)
            || tags.contains(&self.term);
        let matches_tag = self.tag == ALL || tags.contains(&self.tag);
        matches_term && matches_tag
    }

    pub fn apply(&self, courses: &[Course]) -> Visible {
        Visible {
            indices: courses
                .iter()
                .enumerate()
                .filter(|(_, c)| self.matches(c))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
