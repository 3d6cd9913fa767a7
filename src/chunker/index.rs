//! Per-document lookup tables used while chunking.

use crate::model::{Element, Page};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Lookups built once per document before packing.
#[derive(Debug, Default)]
pub struct DocumentIndex<'a> {
    elements_by_id: HashMap<&'a str, &'a Element>,
    page_elements: BTreeMap<u32, &'a [Element]>,
    page_contents: HashMap<u32, &'a str>,
    display_pages: BTreeMap<u32, &'a str>,
}

impl<'a> DocumentIndex<'a> {
    /// Index the given pages.
    pub fn new(pages: &'a [Page]) -> Self {
        let mut index = Self::default();
        for page in pages {
            if page.has_elements() {
                index.page_elements.insert(page.number, &page.elements);
                for elem in &page.elements {
                    index.elements_by_id.insert(&elem.id, elem);
                }
            }
            if !page.content.is_empty() {
                index.page_contents.insert(page.number, &page.content);
            }
            if let Some(label) = &page.display_page {
                index.display_pages.insert(page.number, label);
            }
        }
        index
    }

    /// Look up an element by id.
    pub fn element(&self, id: &str) -> Option<&'a Element> {
        self.elements_by_id.get(id).copied()
    }

    /// Elements on a page, in their original order.
    pub fn page_elements(&self, page: u32) -> &'a [Element] {
        self.page_elements.get(&page).copied().unwrap_or_default()
    }

    /// Raw content of a page.
    pub fn page_content(&self, page: u32) -> Option<&'a str> {
        self.page_contents.get(&page).copied()
    }

    /// Display labels for the given pages; `None` when no page has one.
    pub fn display_page_map(&self, pages: &BTreeSet<u32>) -> Option<BTreeMap<u32, String>> {
        let map: BTreeMap<u32, String> = self
            .display_pages
            .iter()
            .filter(|(page, _)| pages.contains(*page))
            .map(|(page, label)| (*page, label.to_string()))
            .collect();
        (!map.is_empty()).then_some(map)
    }

    /// Number of indexed elements.
    pub fn element_count(&self) -> usize {
        self.elements_by_id.len()
    }
}
