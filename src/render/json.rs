//! JSON rendering for chunks.

use crate::error::{Error, Result};
use crate::model::Chunk;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Flat, serializable view of a chunk for downstream embedding pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Zero-based chunk index
    pub index: usize,

    /// Rendered chunk content
    pub content: String,

    /// Header-prefixed content to embed
    pub embedding_text: String,

    /// Token count of the content
    pub tokens: usize,

    /// Pages spanned, ascending
    pub pages: Vec<u32>,

    /// Page number to display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_page_map: Option<BTreeMap<u32, String>>,

    /// Ids of the source elements
    #[serde(default)]
    pub element_ids: Vec<String>,

    /// Whether the chunk contains a table
    pub has_table: bool,
}

impl From<&Chunk> for ChunkRecord {
    fn from(chunk: &Chunk) -> Self {
        Self {
            index: chunk.index,
            content: chunk.content(),
            embedding_text: chunk.embedding_text(),
            tokens: chunk.tokens(),
            pages: chunk.pages(),
            display_page_map: chunk.display_page_map.clone(),
            element_ids: chunk.elements.iter().map(|e| e.id.clone()).collect(),
            has_table: chunk.has_table(),
        }
    }
}

/// Convert chunks to a JSON array of [`ChunkRecord`]s.
pub fn to_json(chunks: &[Chunk], format: JsonFormat) -> Result<String> {
    let records: Vec<ChunkRecord> = chunks.iter().map(ChunkRecord::from).collect();
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&records),
        JsonFormat::Compact => serde_json::to_string(&records),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
