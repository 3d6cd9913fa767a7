//! Sentence splitting for text blocks.
//!
//! Boundaries are sentence-ending punctuation followed by whitespace, CJK
//! full stops, and line breaks. Each sentence keeps its trailing whitespace so
//! the pieces concatenate back to the original text.

use crate::model::Sentence;
use crate::tokens::TokenCounter;
use regex::{Match, Regex};
use std::sync::LazyLock;

static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*\s+|[。！？]+\s*|\n\s*"#)
        .expect("sentence boundary pattern is valid")
});

/// Iterator over the sentences of a text, as borrowed slices.
///
/// A clone continues from the same position; call [`SentenceIter::new`] again
/// to walk the text from the beginning.
#[derive(Debug, Clone)]
pub struct SentenceIter<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> SentenceIter<'a> {
    /// Iterate the sentences of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, start: 0 }
    }
}

impl<'a> Iterator for SentenceIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.text.get(self.start..)?;
        if rest.trim().is_empty() {
            self.start = self.text.len();
            return None;
        }

        let mut search = self.start;
        let mut end = loop {
            match BOUNDARY.find_at(self.text, search) {
                Some(m) if is_abbreviation(self.text, &m) => search = m.end(),
                // Leading whitespace belongs to the sentence that follows it
                Some(m) if self.text[self.start..m.end()].trim().is_empty() => search = m.end(),
                Some(m) => break m.end(),
                None => break self.text.len(),
            }
        };

        if self.text[end..].trim().is_empty() {
            end = self.text.len();
        }

        let sentence = &self.text[self.start..end];
        self.start = end;
        Some(sentence)
    }
}

/// A period followed by a lowercase word ("e.g. the") does not end a sentence.
fn is_abbreviation(text: &str, m: &Match<'_>) -> bool {
    m.as_str().starts_with('.')
        && text[m.end()..]
            .chars()
            .next()
            .is_some_and(char::is_lowercase)
}

/// Split `text` into sentences and count their tokens.
///
/// Whitespace-only text has no sentences.
pub fn split_sentences(text: &str, counter: &dyn TokenCounter) -> Vec<Sentence> {
    SentenceIter::new(text)
        .map(|s| Sentence::new(s, counter))
        .collect()
}
