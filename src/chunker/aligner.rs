//! Maps chunk blocks back to the structured elements they came from.

use super::index::DocumentIndex;
use super::matcher::SpanLocator;
use crate::model::{Block, Element};
use std::collections::{BTreeSet, HashSet};

/// Resolves the elements a chunk corresponds to.
///
/// Blocks carrying element ids are resolved directly. When no block carries
/// an id, each spanned page's raw content is searched for the chunk text and
/// every element whose offsets fall inside the located span is selected.
pub struct ElementAligner<'i, 'a> {
    index: &'i DocumentIndex<'a>,
    locator: SpanLocator,
}

impl<'i, 'a> ElementAligner<'i, 'a> {
    /// Create an aligner over a document index.
    pub fn new(index: &'i DocumentIndex<'a>) -> Self {
        Self {
            index,
            locator: SpanLocator::new(),
        }
    }

    /// Elements for the given chunk blocks, de-duplicated, in order.
    pub fn resolve(&self, blocks: &[Block]) -> Vec<Element> {
        if blocks.iter().any(|b| !b.element_ids().is_empty()) {
            self.resolve_by_id(blocks)
        } else {
            self.resolve_by_offset(blocks)
        }
    }

    fn resolve_by_id(&self, blocks: &[Block]) -> Vec<Element> {
        let mut seen = HashSet::new();
        blocks
            .iter()
            .flat_map(Block::element_ids)
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| {
                let elem = self.index.element(id);
                if elem.is_none() {
                    log::trace!("Element {} not found in document", id);
                }
                elem.cloned()
            })
            .collect()
    }

    fn resolve_by_offset(&self, blocks: &[Block]) -> Vec<Element> {
        let pages: BTreeSet<u32> = blocks.iter().map(Block::page).collect();
        let mut selected = Vec::new();

        for page in pages {
            let elements = self.index.page_elements(page);
            if elements.is_empty() {
                continue;
            }
            let Some(page_text) = self.index.page_content(page) else {
                continue;
            };

            let on_page = blocks.iter().filter(|b| b.page() == page);
            let Some(span) = self.locator.locate_blocks(on_page, page_text) else {
                continue;
            };

            selected.extend(
                elements
                    .iter()
                    .filter(|e| e.is_within(span.start, span.end))
                    .cloned(),
            );
        }

        selected
    }
}
