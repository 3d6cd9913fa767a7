//! Greedy packing of blocks into token-bounded chunks.
//!
//! The packer walks the block sequence once, with one block of lookahead,
//! and keeps its whole state (pending blocks, running token total, emitted
//! chunks) in a single owned struct.
//!
//! - Text blocks are split at sentence boundaries when they overflow.
//! - Tables pull a short preceding caption along so they are never emitted
//!   without it.
//! - Headers directly introducing a table are never left behind.
//! - Every flush seeds the next chunk with up to `chunk_overlap` trailing
//!   tokens of the chunk just emitted.

use super::aligner::ElementAligner;
use super::index::DocumentIndex;
use super::options::ChunkerOptions;
use crate::model::{Block, Chunk, Sentence, TextBlock};
use std::collections::BTreeSet;

/// Packing state for one document.
pub(crate) struct Packer<'p, 'a> {
    options: &'p ChunkerOptions,
    index: &'p DocumentIndex<'a>,
    aligner: ElementAligner<'p, 'a>,
    header: Option<&'p str>,
    /// Blocks of the chunk being assembled
    pending: Vec<Block>,
    /// Number of leading `pending` blocks carried over as overlap
    seed_len: usize,
    /// Tokens in `pending`
    tokens: usize,
    chunks: Vec<Chunk>,
}

impl<'p, 'a> Packer<'p, 'a> {
    pub(crate) fn new(
        options: &'p ChunkerOptions,
        index: &'p DocumentIndex<'a>,
        header: Option<&'p str>,
    ) -> Self {
        Self {
            options,
            index,
            aligner: ElementAligner::new(index),
            header,
            pending: Vec::new(),
            seed_len: 0,
            tokens: 0,
            chunks: Vec::new(),
        }
    }

    /// Pack all blocks and return the chunks in order.
    pub(crate) fn pack(mut self, blocks: &[Block]) -> Vec<Chunk> {
        for (i, block) in blocks.iter().enumerate() {
            match block {
                Block::Text(text) => self.push_text(text),
                Block::Table(_) => self.push_table(blocks, i),
                Block::Header(_) => self.push_header(block, blocks.get(i + 1)),
            }
        }

        if self.has_fresh_content() {
            let pending = std::mem::take(&mut self.pending);
            self.finalize(pending);
        }
        self.chunks
    }

    /// Check if `pending` holds anything beyond the overlap seed.
    fn has_fresh_content(&self) -> bool {
        self.pending.len() > self.seed_len
    }

    fn fits(&self, tokens: usize) -> bool {
        self.tokens + tokens <= self.options.chunk_size
    }

    fn push_fresh(&mut self, block: Block) {
        self.tokens += block.tokens();
        self.pending.push(block);
    }

    /// Add sentences greedily; on overflow close the chunk and continue with
    /// the overflowing sentence.
    fn push_text(&mut self, block: &TextBlock) {
        let mut buffer: Vec<Sentence> = Vec::new();
        let mut buffer_tokens = 0;

        for sentence in &block.sentences {
            if self.fits(buffer_tokens + sentence.tokens) {
                buffer_tokens += sentence.tokens;
                buffer.push(sentence.clone());
                continue;
            }

            if !buffer.is_empty() {
                let part = TextBlock::from_sentences(
                    std::mem::take(&mut buffer),
                    block.page,
                    block.element_ids.clone(),
                );
                self.push_fresh(Block::Text(part));
            }
            if self.has_fresh_content() {
                self.flush();
            }
            self.make_room(sentence.tokens);

            buffer.push(sentence.clone());
            buffer_tokens = sentence.tokens;
        }

        if !buffer.is_empty() {
            let part = TextBlock::from_sentences(buffer, block.page, block.element_ids.clone());
            self.push_fresh(Block::Text(part));
        }
    }

    /// Tables travel with their caption. If table and caption do not fit,
    /// the pending chunk is closed and a new one starts with both.
    fn push_table(&mut self, blocks: &[Block], i: usize) {
        let Some(table) = blocks.get(i) else {
            return;
        };
        let (context, context_tokens) = self.table_context(blocks, i);

        if self.fits(context_tokens + table.tokens()) {
            // The caption directly precedes the table, so it is already pending
            self.push_fresh(table.clone());
            return;
        }

        if self.has_fresh_content() {
            self.flush();
        }

        // A chunk made of nothing but the caption is re-attached to the table
        if !context.is_empty()
            && self
                .chunks
                .last()
                .is_some_and(|last| last.blocks == context)
        {
            if let Some(orphan) = self.chunks.pop() {
                log::debug!("Discarding caption-only chunk {}", orphan.index);
            }
        }

        self.pending = context;
        self.pending.push(table.clone());
        self.seed_len = 0;
        self.tokens = context_tokens + table.tokens();
    }

    /// Walk back from the table on its page, collecting a header or up to
    /// `max_context_blocks` non-empty text blocks within the token limit.
    fn table_context(&self, blocks: &[Block], i: usize) -> (Vec<Block>, usize) {
        let Some(table) = blocks.get(i) else {
            return (Vec::new(), 0);
        };
        let limit = self.options.context_token_limit;
        let mut context = Vec::new();
        let mut tokens = 0;
        let mut texts = 0;

        for prev in blocks[..i].iter().rev() {
            if prev.page() != table.page() {
                break;
            }
            match prev {
                Block::Header(_) => {
                    if tokens + prev.tokens() <= limit {
                        context.push(prev.clone());
                        tokens += prev.tokens();
                    }
                    break;
                }
                Block::Text(_) if prev.is_blank() => continue,
                Block::Text(_) => {
                    texts += 1;
                    if texts > self.options.max_context_blocks
                        || tokens + prev.tokens() > limit
                    {
                        break;
                    }
                    context.push(prev.clone());
                    tokens += prev.tokens();
                }
                Block::Table(_) => break,
            }
        }

        context.reverse();
        (context, tokens)
    }

    /// Headers start chunks rather than end them, and stay with the table
    /// they introduce.
    fn push_header(&mut self, block: &Block, next: Option<&Block>) {
        if self.pending.is_empty() {
            self.push_fresh(block.clone());
            return;
        }

        let introduces_table = next.is_some_and(Block::is_table);
        if introduces_table && self.tokens < self.options.chunk_overlap {
            self.push_fresh(block.clone());
            return;
        }

        if !self.fits(block.tokens()) {
            if self.has_fresh_content() {
                self.flush();
            }
            self.make_room(block.tokens());
        }
        self.push_fresh(block.clone());
    }

    /// Emit the pending blocks as a chunk and seed the next one with overlap.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let (seed, seed_tokens) = overlap_seed(&pending, self.options.chunk_overlap);
        self.finalize(pending);

        if !seed.is_empty() {
            log::trace!("Seeding next chunk with {} overlap tokens", seed_tokens);
        }
        self.seed_len = seed.len();
        self.pending = seed;
        self.tokens = seed_tokens;
    }

    fn finalize(&mut self, blocks: Vec<Block>) {
        let pages: BTreeSet<u32> = blocks.iter().map(Block::page).collect();
        let chunk = Chunk {
            elements: self.aligner.resolve(&blocks),
            display_page_map: self.index.display_page_map(&pages),
            header: self.header.map(str::to_string),
            index: self.chunks.len(),
            blocks,
        };
        log::debug!(
            "Created chunk {} with {} blocks ({} tokens)",
            chunk.index,
            chunk.blocks.len(),
            chunk.tokens()
        );
        self.chunks.push(chunk);
        self.seed_len = 0;
        self.tokens = 0;
    }

    /// Drop overlap from the front of `pending`, a sentence at a time, until
    /// `incoming` tokens fit. Fresh content is never dropped.
    fn make_room(&mut self, incoming: usize) {
        while self.seed_len > 0 && !self.fits(incoming) {
            let first = self.pending.remove(0);
            self.tokens = self.tokens.saturating_sub(first.tokens());
            self.seed_len -= 1;

            if let Block::Text(text) = first {
                if text.sentences.len() > 1 {
                    let rest = text.slice(1..text.sentences.len());
                    self.tokens += rest.tokens;
                    self.pending.insert(0, Block::Text(rest));
                    self.seed_len += 1;
                }
            }
        }
    }
}

/// Trailing blocks of a finished chunk, at most `overlap` tokens.
///
/// Text blocks contribute their trailing sentences; tables and headers are
/// carried whole or not at all. A chunk that fits entirely in the overlap
/// budget seeds nothing.
pub(crate) fn overlap_seed(blocks: &[Block], overlap: usize) -> (Vec<Block>, usize) {
    if overlap == 0 {
        return (Vec::new(), 0);
    }

    let mut seed = Vec::new();
    let mut tokens = 0;

    for block in blocks.iter().rev() {
        match block {
            Block::Text(text) => {
                let mut first = text.sentences.len();
                while first > 0 && tokens + text.sentences[first - 1].tokens <= overlap {
                    first -= 1;
                    tokens += text.sentences[first].tokens;
                }
                if first < text.sentences.len() {
                    seed.push(Block::Text(text.slice(first..text.sentences.len())));
                }
                if first > 0 {
                    seed.reverse();
                    return (seed, tokens);
                }
            }
            Block::Table(_) | Block::Header(_) => {
                if tokens + block.tokens() > overlap {
                    seed.reverse();
                    return (seed, tokens);
                }
                seed.push(block.clone());
                tokens += block.tokens();
            }
        }
    }

    (Vec::new(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::WordTokenCounter;

    fn words(n: usize) -> String {
        let mut s = vec!["Word"; n].join(" ");
        s.push_str(". ");
        s
    }

    fn text(sentence_sizes: &[usize]) -> Block {
        let content: String = sentence_sizes.iter().map(|n| words(*n)).collect();
        Block::text(content, 1, vec![], &WordTokenCounter)
    }

    #[test]
    fn test_overlap_seed_trailing_sentences() {
        let blocks = vec![text(&[50, 50, 50, 50])];
        let (seed, tokens) = overlap_seed(&blocks, 128);

        assert_eq!(tokens, 100);
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].tokens(), 100);
    }

    #[test]
    fn test_overlap_seed_zero_overlap() {
        let blocks = vec![text(&[50, 50, 50])];
        assert_eq!(overlap_seed(&blocks, 0), (Vec::new(), 0));
    }

    #[test]
    fn test_overlap_seed_whole_chunk_fits_seeds_nothing() {
        let blocks = vec![text(&[10, 10])];
        assert_eq!(overlap_seed(&blocks, 128).1, 0);
    }

    #[test]
    fn test_overlap_seed_spans_blocks_in_order() {
        let counter = WordTokenCounter;
        let blocks = vec![
            text(&[120, 120]),
            Block::header("## Costs", 1, vec![], &counter),
            text(&[20]),
        ];
        let (seed, tokens) = overlap_seed(&blocks, 128);

        // 20 + 2 fit, the next 120-token sentence does not
        assert_eq!(tokens, 22);
        assert!(seed[0].is_header());
        assert!(seed[1].is_text());
    }

    #[test]
    fn test_overlap_seed_stops_at_large_table() {
        let counter = WordTokenCounter;
        let table = Block::table(vec!["|"; 200].join(" "), 1, vec![], &counter);
        let blocks = vec![table, text(&[30])];
        let (seed, tokens) = overlap_seed(&blocks, 128);

        assert_eq!(tokens, 30);
        assert_eq!(seed.len(), 1);
        assert!(seed[0].is_text());
    }
}
