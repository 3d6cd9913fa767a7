//! Approximate location of block text inside raw page content.
//!
//! Matchers never fail loudly: a miss is `None`, and the caller moves on to
//! the next matcher or skips the block.

use crate::model::Block;
use regex::Regex;

/// A byte range `[start, end)` in page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both.
    pub fn union(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Finds a needle in a haystack starting at a byte offset.
pub trait SpanMatcher: Send + Sync {
    /// Locate `needle` in `haystack` at or after `from`.
    fn find(&self, needle: &str, haystack: &str, from: usize) -> Option<Span>;
}

/// Exact substring search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl SpanMatcher for ExactMatcher {
    fn find(&self, needle: &str, haystack: &str, from: usize) -> Option<Span> {
        if needle.is_empty() {
            return None;
        }
        let offset = haystack.get(from..)?.find(needle)?;
        let start = from + offset;
        Some(Span::new(start, start + needle.len()))
    }
}

/// Search where every whitespace run in the needle matches any whitespace
/// run in the haystack, so line wraps and re-spaced table cells still match.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTolerantMatcher;

impl WhitespaceTolerantMatcher {
    /// Pattern for `needle`, or `None` if it has no visible text.
    pub fn pattern(needle: &str) -> Option<String> {
        let words: Vec<String> = needle.split_whitespace().map(regex::escape).collect();
        (!words.is_empty()).then(|| words.join(r"\s+"))
    }
}

impl SpanMatcher for WhitespaceTolerantMatcher {
    fn find(&self, needle: &str, haystack: &str, from: usize) -> Option<Span> {
        if !haystack.is_char_boundary(from) {
            return None;
        }
        let re = Regex::new(&Self::pattern(needle)?).ok()?;
        let m = re.find_at(haystack, from)?;
        Some(Span::new(m.start(), m.end()))
    }
}

/// Locates the span a sequence of blocks covers in a page.
///
/// Each block is searched exactly, anchored after the previous match; on a
/// miss the whitespace-tolerant matcher searches from the start of the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanLocator {
    exact: ExactMatcher,
    tolerant: WhitespaceTolerantMatcher,
}

impl SpanLocator {
    /// Create a locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate a single piece of text.
    pub fn locate(&self, text: &str, page_text: &str, cursor: usize) -> Option<Span> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.exact
            .find(text, page_text, cursor)
            .or_else(|| self.tolerant.find(text, page_text, 0))
    }

    /// Union of the spans of all locatable blocks; blocks that cannot be
    /// found contribute nothing.
    pub fn locate_blocks<'b>(
        &self,
        blocks: impl IntoIterator<Item = &'b Block>,
        page_text: &str,
    ) -> Option<Span> {
        let mut cursor = 0;
        let mut covered: Option<Span> = None;

        for block in blocks {
            let Some(span) = self.locate(block.content(), page_text, cursor) else {
                if !block.is_blank() {
                    log::trace!("Could not locate block on page {}", block.page());
                }
                continue;
            };
            covered = Some(covered.map_or(span, |c| c.union(span)));
            cursor = span.end;
        }

        covered
    }
}
