//! Chunk type, the output unit of the chunker.

use super::{Block, Element};
use std::collections::BTreeMap;

/// A size-bounded, ordered group of blocks.
///
/// Chunks are created once by the packer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Blocks in document order
    pub blocks: Vec<Block>,

    /// Caller-supplied header, excluded from token accounting
    pub header: Option<String>,

    /// Elements the chunk was derived from, de-duplicated
    pub elements: Vec<Element>,

    /// Page number to display label, restricted to pages this chunk spans
    pub display_page_map: Option<BTreeMap<u32, String>>,

    /// Zero-based position in the output sequence
    pub index: usize,
}

impl Chunk {
    /// Render the chunk content: non-blank blocks, trimmed, one per line.
    pub fn content(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.content().trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Content prefixed with the header, for embedding.
    pub fn embedding_text(&self) -> String {
        match self.header.as_deref().map(str::trim) {
            Some(header) if !header.is_empty() => format!("{}\n\n{}", header, self.content()),
            _ => self.content(),
        }
    }

    /// Total tokens of the blocks (the header is not counted).
    pub fn tokens(&self) -> usize {
        self.blocks.iter().map(Block::tokens).sum()
    }

    /// Sorted, unique page numbers spanned by the chunk.
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.blocks.iter().map(Block::page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    /// First page spanned.
    pub fn start_page(&self) -> Option<u32> {
        self.blocks.iter().map(Block::page).min()
    }

    /// Last page spanned.
    pub fn end_page(&self) -> Option<u32> {
        self.blocks.iter().map(Block::page).max()
    }

    /// Display labels of the spanned pages, in page order.
    pub fn display_pages(&self) -> Vec<&str> {
        self.display_page_map
            .as_ref()
            .map(|map| map.values().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Check if any block is a table.
    pub fn has_table(&self) -> bool {
        self.blocks.iter().any(Block::is_table)
    }

    /// Identifiers of the resolved elements.
    pub fn element_ids(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
