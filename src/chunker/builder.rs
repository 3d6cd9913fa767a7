//! Block building from parsed pages.
//!
//! Pages with structured elements become one block per element, ordered by
//! content offset. Pages without elements fall back to a line-oriented
//! heuristic over the raw content.

use crate::model::{Block, ElementKind, Page};
use crate::tokens::TokenCounter;

/// Column separator marking a table line.
const TABLE_SEPARATOR: char = '|';

/// Marker starting a header line.
const HEADER_MARKER: char = '#';

/// Classification of a raw content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Header line (`# ...`)
    Header,
    /// Table row or alignment row
    Table,
    /// Anything else, including blank lines
    Text,
}

/// Check if a line belongs to a table.
///
/// Any non-blank line containing the column separator qualifies, alignment
/// rows (`|---|:---:|`) included. Pipes used in prose are classified as
/// tables too.
pub fn is_table_line(line: &str) -> bool {
    line.contains(TABLE_SEPARATOR) && !line.trim().is_empty()
}

/// Classify a raw content line. Header markers win over table separators.
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with(HEADER_MARKER) {
        LineKind::Header
    } else if is_table_line(line) {
        LineKind::Table
    } else {
        LineKind::Text
    }
}

/// Converts pages into an ordered sequence of blocks.
pub struct BlockBuilder<'a> {
    counter: &'a dyn TokenCounter,
    use_elements: bool,
}

impl<'a> BlockBuilder<'a> {
    /// Create a builder that prefers structured elements.
    pub fn new(counter: &'a dyn TokenCounter) -> Self {
        Self {
            counter,
            use_elements: true,
        }
    }

    /// Enable or disable element-based building.
    pub fn with_elements(mut self, use_elements: bool) -> Self {
        self.use_elements = use_elements;
        self
    }

    /// Build blocks for all pages, in page order.
    pub fn build(&self, pages: &[Page]) -> Vec<Block> {
        let from_elements = self.use_elements && pages.iter().any(Page::has_elements);
        log::debug!(
            "Building blocks for {} pages from {}",
            pages.len(),
            if from_elements { "elements" } else { "text" }
        );

        let mut blocks = Vec::new();
        for page in pages {
            if from_elements && page.has_elements() {
                self.build_from_elements(page, &mut blocks);
            } else {
                self.build_from_text(page, &mut blocks);
            }
        }
        blocks
    }

    /// One block per element, ordered by start offset. Elements without an
    /// offset sort last; ties keep their original order.
    fn build_from_elements(&self, page: &Page, blocks: &mut Vec<Block>) {
        let mut ordered: Vec<_> = page.elements.iter().enumerate().collect();
        ordered.sort_by_key(|(i, e)| (e.content_start_offset.unwrap_or(usize::MAX), *i));

        for (_, elem) in ordered {
            let ids = vec![elem.id.clone()];
            let block = match elem.kind {
                ElementKind::Table => Block::table(&elem.content, page.number, ids, self.counter),
                ElementKind::Header => {
                    Block::header(&elem.content, page.number, ids, self.counter)
                }
                ElementKind::Text | ElementKind::Other(_) => {
                    Block::text(&elem.content, page.number, ids, self.counter)
                }
            };
            blocks.push(block);
        }
    }

    /// Line heuristic: consecutive table lines form one table block, header
    /// lines and all other lines become standalone blocks.
    fn build_from_text(&self, page: &Page, blocks: &mut Vec<Block>) {
        let mut table = String::new();

        for line in page.content.split('\n') {
            let kind = classify_line(line);
            if kind != LineKind::Table && !table.is_empty() {
                blocks.push(self.table_block(&mut table, page.number));
            }

            match kind {
                LineKind::Header => {
                    blocks.push(Block::header(line, page.number, Vec::new(), self.counter))
                }
                LineKind::Table => {
                    table.push_str(line);
                    table.push('\n');
                }
                LineKind::Text => {
                    blocks.push(Block::text(line, page.number, Vec::new(), self.counter))
                }
            }
        }

        // Tables never continue across pages
        if !table.is_empty() {
            blocks.push(self.table_block(&mut table, page.number));
        }
    }

    fn table_block(&self, table: &mut String, page: u32) -> Block {
        Block::table(std::mem::take(table), page, Vec::new(), self.counter)
    }
}
