use serde::{Deserialize, Serialize};

/// Ordered tag list with set semantics.
///
/// Tags keep insertion order for display. Adding a tag that is already
/// present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a tag after trimming it.
    ///
    /// Returns `true` if the list changed. Blank input and duplicates are
    /// ignored.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove a tag. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Remove and return the most recently added tag.
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined form used by the admin API (`"rust, tui"`).
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    /// Parse the admin API's comma-joined form.
    pub fn parse_joined(joined: &str) -> Self {
        joined.split(',').collect()
    }
}

impl<'a> FromIterator<&'a str> for TagList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.add(tag);
        }
        tags
    }
}
