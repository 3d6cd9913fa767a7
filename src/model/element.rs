//! Structured elements produced by the upstream parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured element on a page, such as a detected table or a tagged
/// text region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier, unique within a document
    pub id: String,

    /// Element category
    #[serde(default)]
    pub kind: ElementKind,

    /// Element content
    #[serde(default)]
    pub content: String,

    /// Start byte offset into the owning page's raw content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_start_offset: Option<usize>,

    /// End byte offset into the owning page's raw content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_end_offset: Option<usize>,
}

impl Element {
    /// Create a new element without offsets.
    pub fn new(id: impl Into<String>, kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            content_start_offset: None,
            content_end_offset: None,
        }
    }

    /// Create a table element.
    pub fn table(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Table, content)
    }

    /// Create a header element.
    pub fn header(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Header, content)
    }

    /// Create a text element.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text, content)
    }

    /// Set the content offsets and return self.
    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.content_start_offset = Some(start);
        self.content_end_offset = Some(end);
        self
    }

    /// Both offsets, if the element has them.
    pub fn span(&self) -> Option<(usize, usize)> {
        Some((self.content_start_offset?, self.content_end_offset?))
    }

    /// Check if the element lies fully inside `[start, end]`.
    ///
    /// Elements without offsets are never inside a span.
    pub fn is_within(&self, start: usize, end: usize) -> bool {
        self.span()
            .is_some_and(|(s, e)| start <= s && e <= end)
    }
}

/// Element category.
///
/// Parsed case-insensitively; unknown tags are kept verbatim in
/// [`ElementKind::Other`] and chunked as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// A table
    Table,
    /// A section header
    Header,
    /// A text region
    #[default]
    Text,
    /// Any other tag
    Other(String),
}

impl ElementKind {
    /// Tag name as used on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Table => "table",
            ElementKind::Header => "header",
            ElementKind::Text => "text",
            ElementKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "table" => ElementKind::Table,
            "header" => ElementKind::Header,
            "text" => ElementKind::Text,
            _ => ElementKind::Other(tag.to_string()),
        }
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        ElementKind::from(tag.as_str())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_case_insensitive() {
        assert_eq!(ElementKind::from("TABLE"), ElementKind::Table);
        assert_eq!(ElementKind::from("Header"), ElementKind::Header);
        assert_eq!(ElementKind::from("text"), ElementKind::Text);
        assert_eq!(
            ElementKind::from("XbrlTextBlock"),
            ElementKind::Other("XbrlTextBlock".to_string())
        );
    }

    #[test]
    fn test_element_within() {
        let elem = Element::text("e1", "abc").with_offsets(10, 20);
        assert!(elem.is_within(10, 20));
        assert!(elem.is_within(0, 25));
        assert!(!elem.is_within(11, 25));
        assert!(!elem.is_within(0, 19));

        let no_offsets = Element::text("e2", "abc");
        assert!(!no_offsets.is_within(0, usize::MAX));
    }

    #[test]
    fn test_element_serde() {
        let json = r#"{"id": "t1", "kind": "Table", "content": "| a |", "content_start_offset": 4, "content_end_offset": 9}"#;
        let elem: Element = serde_json::from_str(json).unwrap();
        assert_eq!(elem.kind, ElementKind::Table);
        assert_eq!(elem.span(), Some((4, 9)));

        let out = serde_json::to_string(&elem).unwrap();
        assert!(out.contains(r#""kind":"table""#));
    }
}
