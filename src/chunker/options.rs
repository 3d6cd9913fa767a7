//! Chunking options and configuration.

/// Default token budget per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Default overlap budget carried between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 128;

/// Default token limit for context pulled in front of a table.
pub const DEFAULT_CONTEXT_TOKEN_LIMIT: usize = 128;

/// Default number of text blocks pulled in front of a table.
pub const DEFAULT_MAX_CONTEXT_BLOCKS: usize = 2;

/// Options for chunking documents.
///
/// Values are not validated: an overlap at or above the chunk size or a zero
/// chunk size degrades the output (oversized singleton chunks, no overlap)
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkerOptions {
    /// Token budget per chunk
    pub chunk_size: usize,

    /// Token budget for the overlap carried into the next chunk (0 = none)
    pub chunk_overlap: usize,

    /// Maximum tokens of header/caption context attached to a table
    pub context_token_limit: usize,

    /// Maximum number of non-empty text blocks attached to a table
    pub max_context_blocks: usize,

    /// Build blocks from structured elements when any page carries them
    pub use_elements: bool,

    /// Pack independent documents on the rayon thread pool
    pub parallel: bool,
}

impl ChunkerOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk token budget.
    pub fn with_chunk_size(mut self, tokens: usize) -> Self {
        self.chunk_size = tokens;
        self
    }

    /// Set the overlap token budget.
    pub fn with_overlap(mut self, tokens: usize) -> Self {
        self.chunk_overlap = tokens;
        self
    }

    /// Disable overlap between chunks.
    pub fn without_overlap(mut self) -> Self {
        self.chunk_overlap = 0;
        self
    }

    /// Set the table context limits.
    pub fn with_table_context(mut self, token_limit: usize, max_blocks: usize) -> Self {
        self.context_token_limit = token_limit;
        self.max_context_blocks = max_blocks;
        self
    }

    /// Enable or disable element-based block building.
    pub fn with_elements(mut self, use_elements: bool) -> Self {
        self.use_elements = use_elements;
        self
    }

    /// Enable or disable parallel processing of documents.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ChunkerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            context_token_limit: DEFAULT_CONTEXT_TOKEN_LIMIT,
            max_context_blocks: DEFAULT_MAX_CONTEXT_BLOCKS,
            use_elements: true,
            parallel: true,
        }
    }
}
