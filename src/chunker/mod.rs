//! Chunking engine.
//!
//! Pages flow through three stages:
//!
//! 1. [`BlockBuilder`] turns pages into typed blocks (text, table, header).
//! 2. The packer groups blocks into token-bounded chunks with overlap.
//! 3. [`ElementAligner`] links every chunk back to its source elements.
//!
//! # Example
//!
//! ```
//! use pagechunk::{Chunker, ChunkerOptions, Element, Page};
//!
//! let page = Page::new(1, "")
//!     .with_element(Element::header("h1", "## Revenue"))
//!     .with_element(Element::table("t1", "| Year | Total |\n| 2024 | 10 |"));
//!
//! let chunker = Chunker::with_options(ChunkerOptions::new().with_chunk_size(256));
//! let chunks = chunker.split(&[page], Some("ACME 10-K"));
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].element_ids(), vec!["h1", "t1"]);
//! ```

mod aligner;
mod builder;
mod index;
mod matcher;
mod options;
mod packer;
pub(crate) mod sentence;

pub use aligner::ElementAligner;
pub use builder::{classify_line, is_table_line, BlockBuilder, LineKind};
pub use index::DocumentIndex;
pub use matcher::{ExactMatcher, Span, SpanLocator, SpanMatcher, WhitespaceTolerantMatcher};
pub use options::{
    ChunkerOptions, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_CONTEXT_TOKEN_LIMIT,
    DEFAULT_MAX_CONTEXT_BLOCKS,
};
pub use sentence::{split_sentences, SentenceIter};

use crate::model::{Block, Chunk, Page};
use crate::tokens::{TokenCounter, WordTokenCounter};
use packer::Packer;
use rayon::prelude::*;
use std::sync::Arc;

/// Splits parsed pages into chunks.
///
/// Configuration is fixed at construction. A chunker holds no per-document
/// state and can be shared across threads.
#[derive(Clone)]
pub struct Chunker {
    options: ChunkerOptions,
    counter: Arc<dyn TokenCounter>,
}

impl Chunker {
    /// Create a chunker with default options and word token counting.
    pub fn new() -> Self {
        Self::with_options(ChunkerOptions::default())
    }

    /// Create a chunker with the given options.
    pub fn with_options(options: ChunkerOptions) -> Self {
        Self {
            options,
            counter: Arc::new(WordTokenCounter),
        }
    }

    /// Set the token counter.
    pub fn with_token_counter(mut self, counter: impl TokenCounter + 'static) -> Self {
        self.counter = Arc::new(counter);
        self
    }

    /// Set a shared token counter.
    pub fn with_shared_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.counter = counter;
        self
    }

    /// Get the options.
    pub fn options(&self) -> &ChunkerOptions {
        &self.options
    }

    /// Get the token counter.
    pub fn token_counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    /// Split pages into chunks.
    ///
    /// `header`, if given, is stored on every chunk and prefixed to its
    /// embedding text, but never counted against the token budget.
    pub fn split(&self, pages: &[Page], header: Option<&str>) -> Vec<Chunk> {
        let blocks = self.build_blocks(pages);
        let index = DocumentIndex::new(pages);
        Packer::new(&self.options, &index, header).pack(&blocks)
    }

    /// Chunk a single string and return the rendered chunk contents.
    ///
    /// The text is treated as one page without structured elements.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let pages = [Page::new(0, text)];
        self.split(&pages, None)
            .iter()
            .map(Chunk::content)
            .collect()
    }

    /// Build the block sequence for pages without packing it.
    pub fn build_blocks(&self, pages: &[Page]) -> Vec<Block> {
        BlockBuilder::new(self.counter.as_ref())
            .with_elements(self.options.use_elements)
            .build(pages)
    }

    /// Split several independent documents.
    ///
    /// Documents are packed on the rayon thread pool unless the options are
    /// sequential. Results are in input order.
    pub fn split_documents(&self, documents: &[Vec<Page>], header: Option<&str>) -> Vec<Vec<Chunk>> {
        if self.options.parallel && documents.len() > 1 {
            log::debug!("Splitting {} documents in parallel", documents.len());
            documents
                .par_iter()
                .map(|pages| self.split(pages, header))
                .collect()
        } else {
            documents
                .iter()
                .map(|pages| self.split(pages, header))
                .collect()
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
