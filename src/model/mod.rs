//! Data model for chunking.
//!
//! Pages and elements come from the upstream document parser. Blocks are the
//! typed, page-located units the chunker packs, and chunks are the output.

mod block;
mod chunk;
mod element;
mod page;

pub use block::{Block, BlockKind, Segment, Sentence, TextBlock};
pub use chunk::Chunk;
pub use element::{Element, ElementKind};
pub use page::Page;
