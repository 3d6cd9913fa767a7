//! Block-level types.

use crate::chunker::sentence::split_sentences;
use crate::tokens::TokenCounter;
use serde::Serialize;

/// A sentence inside a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Sentence text, including its trailing whitespace
    pub text: String,

    /// Token count of `text`
    pub tokens: usize,
}

impl Sentence {
    /// Create a sentence and count its tokens.
    pub fn new(text: impl Into<String>, counter: &dyn TokenCounter) -> Self {
        let text = text.into();
        let tokens = counter.count(&text);
        Self { text, tokens }
    }
}

/// Block discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Prose
    Text,
    /// A table, kept atomic
    Table,
    /// A section header, kept atomic
    Header,
}

/// A text block, split into sentences at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    /// Raw content
    pub content: String,

    /// Page the block came from
    pub page: u32,

    /// Sum of the sentence token counts
    pub tokens: usize,

    /// Source element identifiers
    pub element_ids: Vec<String>,

    /// Sentences in order; their texts concatenate to `content`
    #[serde(skip)]
    pub sentences: Vec<Sentence>,
}

impl TextBlock {
    /// Create a text block, splitting `content` into sentences.
    pub fn new(
        content: impl Into<String>,
        page: u32,
        element_ids: Vec<String>,
        counter: &dyn TokenCounter,
    ) -> Self {
        let content = content.into();
        let sentences = split_sentences(&content, counter);
        let tokens = sentences.iter().map(|s| s.tokens).sum();
        Self {
            content,
            page,
            tokens,
            element_ids,
            sentences,
        }
    }

    /// Build a block from a contiguous run of another block's sentences.
    pub fn from_sentences(sentences: Vec<Sentence>, page: u32, element_ids: Vec<String>) -> Self {
        let content = sentences.iter().map(|s| s.text.as_str()).collect();
        let tokens = sentences.iter().map(|s| s.tokens).sum();
        Self {
            content,
            page,
            tokens,
            element_ids,
            sentences,
        }
    }

    /// Re-slice this block to `sentences[range]`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        let sentences = self.sentences.get(range).unwrap_or_default().to_vec();
        Self::from_sentences(sentences, self.page, self.element_ids.clone())
    }
}

/// An atomic table or header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Raw content
    pub content: String,

    /// Page the block came from
    pub page: u32,

    /// Token count of `content`
    pub tokens: usize,

    /// Source element identifiers
    pub element_ids: Vec<String>,
}

impl Segment {
    /// Create a segment and count its tokens.
    pub fn new(
        content: impl Into<String>,
        page: u32,
        element_ids: Vec<String>,
        counter: &dyn TokenCounter,
    ) -> Self {
        let content = content.into();
        let tokens = counter.count(&content);
        Self {
            content,
            page,
            tokens,
            element_ids,
        }
    }
}

/// A typed, page-located unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Prose, splittable at sentence boundaries
    Text(TextBlock),

    /// A table
    Table(Segment),

    /// A header
    Header(Segment),
}

impl Block {
    /// Create a text block.
    pub fn text(
        content: impl Into<String>,
        page: u32,
        element_ids: Vec<String>,
        counter: &dyn TokenCounter,
    ) -> Self {
        Block::Text(TextBlock::new(content, page, element_ids, counter))
    }

    /// Create a table block.
    pub fn table(
        content: impl Into<String>,
        page: u32,
        element_ids: Vec<String>,
        counter: &dyn TokenCounter,
    ) -> Self {
        Block::Table(Segment::new(content, page, element_ids, counter))
    }

    /// Create a header block.
    pub fn header(
        content: impl Into<String>,
        page: u32,
        element_ids: Vec<String>,
        counter: &dyn TokenCounter,
    ) -> Self {
        Block::Header(Segment::new(content, page, element_ids, counter))
    }

    /// Block discriminant.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(_) => BlockKind::Text,
            Block::Table(_) => BlockKind::Table,
            Block::Header(_) => BlockKind::Header,
        }
    }

    /// Raw content.
    pub fn content(&self) -> &str {
        match self {
            Block::Text(t) => &t.content,
            Block::Table(s) | Block::Header(s) => &s.content,
        }
    }

    /// Page number the block came from.
    pub fn page(&self) -> u32 {
        match self {
            Block::Text(t) => t.page,
            Block::Table(s) | Block::Header(s) => s.page,
        }
    }

    /// Token count.
    pub fn tokens(&self) -> usize {
        match self {
            Block::Text(t) => t.tokens,
            Block::Table(s) | Block::Header(s) => s.tokens,
        }
    }

    /// Source element identifiers.
    pub fn element_ids(&self) -> &[String] {
        match self {
            Block::Text(t) => &t.element_ids,
            Block::Table(s) | Block::Header(s) => &s.element_ids,
        }
    }

    /// Check if this block is text.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a header.
    pub fn is_header(&self) -> bool {
        matches!(self, Block::Header(_))
    }

    /// Check if the block has no visible content.
    pub fn is_blank(&self) -> bool {
        self.content().trim().is_empty()
    }
}
