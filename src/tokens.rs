//! Token counting.
//!
//! Every size comparison in the chunker goes through a [`TokenCounter`]. The
//! default [`WordTokenCounter`] counts whitespace-separated words; plug in a
//! model tokenizer by implementing the trait or passing a closure.
//!
//! ```
//! use pagechunk::{Chunker, TokenCounter};
//!
//! // Rough estimate of four characters per token
//! let chunker = Chunker::new().with_token_counter(|text: &str| text.len().div_ceil(4));
//! assert_eq!(chunker.token_counter().count("abcdefgh"), 2);
//! ```

/// Counts tokens in a piece of text.
///
/// Implementations must be pure: the same text always yields the same count.
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

/// Counts whitespace-separated words as tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenCounter;

impl TokenCounter for WordTokenCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}
