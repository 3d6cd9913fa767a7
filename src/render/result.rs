//! Summary statistics over a chunk sequence.

use crate::model::Chunk;
use serde::{Deserialize, Serialize};

/// Statistics collected from a chunking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStats {
    /// Number of chunks
    pub chunk_count: u32,

    /// Sum of chunk tokens (overlap counted in every chunk it appears in)
    pub total_tokens: u64,

    /// Largest chunk token count
    pub max_tokens: u32,

    /// Chunks containing at least one table
    pub table_chunk_count: u32,

    /// Chunks above the token budget
    pub oversized_count: u32,

    /// Element links across all chunks
    pub element_links: u32,
}

impl ChunkStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for `chunks` against the given token budget.
    pub fn from_chunks(chunks: &[Chunk], chunk_size: usize) -> Self {
        let mut stats = Self::new();
        for chunk in chunks {
            stats.add_chunk(chunk, chunk_size);
        }
        stats
    }

    /// Account for one chunk.
    pub fn add_chunk(&mut self, chunk: &Chunk, chunk_size: usize) {
        let tokens = chunk.tokens();
        self.chunk_count += 1;
        self.total_tokens += tokens as u64;
        self.max_tokens = self.max_tokens.max(tokens as u32);
        self.element_links += chunk.elements.len() as u32;
        if chunk.has_table() {
            self.table_chunk_count += 1;
        }
        if tokens > chunk_size {
            self.oversized_count += 1;
        }
    }

    /// Mean tokens per chunk.
    pub fn average_tokens(&self) -> f64 {
        if self.chunk_count == 0 {
            0.0
        } else {
            self.total_tokens as f64 / self.chunk_count as f64
        }
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ChunkStats) {
        self.chunk_count += other.chunk_count;
        self.total_tokens += other.total_tokens;
        self.max_tokens = self.max_tokens.max(other.max_tokens);
        self.table_chunk_count += other.table_chunk_count;
        self.oversized_count += other.oversized_count;
        self.element_links += other.element_links;
    }
}
