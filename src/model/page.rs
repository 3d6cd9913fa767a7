//! Page-level types.

use super::Element;
use serde::{Deserialize, Serialize};

/// A single parsed page of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (stable identity within the document)
    pub number: u32,

    /// Raw page content, the corpus for offset-based element matching
    #[serde(default)]
    pub content: String,

    /// Structured elements detected on the page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,

    /// Presentation-facing page label (e.g. "F-3")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_page: Option<String>,
}

impl Page {
    /// Create a new page with raw content and no elements.
    pub fn new(number: u32, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
            elements: Vec::new(),
            display_page: None,
        }
    }

    /// Add an element to the page.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Add an element and return self.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Replace the page elements.
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    /// Set the display label.
    pub fn with_display_page(mut self, label: impl Into<String>) -> Self {
        self.display_page = Some(label.into());
        self
    }

    /// Check if the page carries structured elements.
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Check if the page has neither content nor elements.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.elements.is_empty()
    }
}
