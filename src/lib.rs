//! # pagechunk
//!
//! Token-aware chunking of parsed documents for retrieval pipelines.
//!
//! This library takes pages produced by an upstream document parser and
//! splits them into chunks that respect a token budget, keep tables together
//! with their captions, carry overlap between consecutive chunks and link
//! every chunk back to the structured elements it came from.
//!
//! ## Quick Start
//!
//! ```
//! use pagechunk::{Chunker, ChunkerOptions, Element, Page};
//!
//! let pages = vec![
//!     Page::new(1, "")
//!         .with_element(Element::header("h1", "## Results"))
//!         .with_element(Element::text("p1", "Revenue grew in every segment.")),
//! ];
//!
//! let chunker = Chunker::with_options(ChunkerOptions::new().with_chunk_size(256));
//! let chunks = chunker.split(&pages, Some("ACME Corp 2024"));
//!
//! assert_eq!(chunks.len(), 1);
//! assert!(chunks[0].embedding_text().starts_with("ACME Corp 2024\n\n"));
//! ```
//!
//! ## Features
//!
//! - **Token budgets**: pluggable [`TokenCounter`], whitespace words by default
//! - **Table handling**: tables are atomic and pull a short caption along
//! - **Overlap**: trailing sentences of each chunk seed the next one
//! - **Element alignment**: by id, or by locating chunk text in the page
//! - **Parallel processing**: uses Rayon for batches of documents

pub mod chunker;
pub mod error;
pub mod model;
pub mod render;
pub mod tokens;

// Re-export commonly used types
pub use chunker::{BlockBuilder, Chunker, ChunkerOptions, DocumentIndex, ElementAligner};
pub use error::{Error, Result};
pub use model::{Block, BlockKind, Chunk, Element, ElementKind, Page, Segment, Sentence, TextBlock};
pub use render::{ChunkRecord, ChunkStats, JsonFormat};
pub use tokens::{TokenCounter, WordTokenCounter};

use std::io::Read;

/// Split pages into chunks with default options.
///
/// # Example
///
/// ```
/// use pagechunk::{split_pages, Page};
///
/// let chunks = split_pages(&[Page::new(1, "A short page.")], None);
/// assert_eq!(chunks[0].content(), "A short page.");
/// ```
pub fn split_pages(pages: &[Page], header: Option<&str>) -> Vec<Chunk> {
    Chunker::new().split(pages, header)
}

/// Chunk plain text with default options.
///
/// # Example
///
/// ```
/// use pagechunk::chunk_text;
///
/// assert_eq!(chunk_text("Hello world."), vec!["Hello world.".to_string()]);
/// assert!(chunk_text("").is_empty());
/// ```
pub fn chunk_text(text: &str) -> Vec<String> {
    Chunker::new().chunk_text(text)
}

/// Parse pages from a JSON array.
///
/// # Example
///
/// ```
/// use pagechunk::{pages_from_json, ElementKind};
///
/// let json = r#"[{"number": 1, "content": "Text.", "elements": [
///     {"id": "e1", "kind": "table", "content": "| a |"}
/// ]}]"#;
/// let pages = pages_from_json(json)?;
/// assert_eq!(pages[0].elements[0].kind, ElementKind::Table);
/// # Ok::<(), pagechunk::Error>(())
/// ```
pub fn pages_from_json(json: &str) -> Result<Vec<Page>> {
    let pages: Vec<Page> = serde_json::from_str(json)?;
    log::debug!("Loaded {} pages from JSON", pages.len());
    Ok(pages)
}

/// Parse pages from a reader yielding a JSON array.
pub fn pages_from_reader<R: Read>(reader: R) -> Result<Vec<Page>> {
    let pages: Vec<Page> = serde_json::from_reader(reader)?;
    log::debug!("Loaded {} pages from reader", pages.len());
    Ok(pages)
}

/// Chunk a JSON page array and render the chunks as JSON.
///
/// # Example
///
/// ```
/// use pagechunk::{chunk_json, JsonFormat};
///
/// let out = chunk_json(r#"[{"number": 3, "content": "Only text."}]"#, None, JsonFormat::Compact)?;
/// assert!(out.contains("\"pages\":[3]"));
/// # Ok::<(), pagechunk::Error>(())
/// ```
pub fn chunk_json(json: &str, header: Option<&str>, format: JsonFormat) -> Result<String> {
    let pages = pages_from_json(json)?;
    let chunks = split_pages(&pages, header);
    render::to_json(&chunks, format)
}
