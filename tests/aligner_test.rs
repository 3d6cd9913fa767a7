//! Integration tests for element alignment.

use pagechunk::chunker::{SpanLocator, WhitespaceTolerantMatcher};
use pagechunk::{
    Block, Chunker, ChunkerOptions, DocumentIndex, Element, ElementAligner, Page, WordTokenCounter,
};

/// Element covering the first occurrence of `text` in `content`.
fn located(id: &str, content: &str, text: &str) -> Element {
    let start = content.find(text).unwrap();
    Element::text(id, text).with_offsets(start, start + text.len())
}

fn resolve_ids(pages: &[Page], blocks: &[Block]) -> Vec<String> {
    let index = DocumentIndex::new(pages);
    ElementAligner::new(&index)
        .resolve(blocks)
        .into_iter()
        .map(|e| e.id)
        .collect()
}

#[test]
fn test_offset_fallback_links_all_elements() {
    let content = "Revenue grew 10%.\n| Year | Total |\n|------|-------|\n| 2024 | 10 |\nCosts fell.";
    let table = "| Year | Total |\n|------|-------|\n| 2024 | 10 |";
    let page = Page::new(1, content).with_elements(vec![
        located("e1", content, "Revenue grew 10%."),
        located("t1", content, table),
        located("e2", content, "Costs fell."),
    ]);

    let options = ChunkerOptions::new().with_elements(false);
    let chunks = Chunker::with_options(options).split(&[page], None);

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].has_table());
    assert_eq!(chunks[0].element_ids(), vec!["e1", "t1", "e2"]);
}

#[test]
fn test_offset_fallback_per_chunk_span() {
    let content = "Alpha beta gamma.\nDelta epsilon zeta.";
    let page = Page::new(1, content).with_elements(vec![
        located("first", content, "Alpha beta gamma."),
        located("second", content, "Delta epsilon zeta."),
        Element::text("whole", content).with_offsets(0, content.len()),
    ]);

    let options = ChunkerOptions::new()
        .with_chunk_size(3)
        .without_overlap()
        .with_elements(false);
    let chunks = Chunker::with_options(options).split(&[page], None);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].element_ids(), vec!["first"]);
    assert_eq!(chunks[1].element_ids(), vec!["second"]);
}

#[test]
fn test_exact_search_anchored_after_previous_match() {
    let content = "Total. Other. Total.";
    let page = Page::new(1, content).with_elements(vec![
        Element::text("t_first", "Total.").with_offsets(0, 6),
        Element::text("other", "Other.").with_offsets(7, 13),
        Element::text("t_last", "Total.").with_offsets(14, 20),
    ]);
    let counter = WordTokenCounter;
    let blocks = vec![
        Block::text("Other.", 1, vec![], &counter),
        Block::text("Total.", 1, vec![], &counter),
    ];

    assert_eq!(resolve_ids(&[page], &blocks), vec!["other", "t_last"]);
}

#[test]
fn test_whitespace_tolerant_table_match() {
    let content = "Intro.\n| Year |   Total |\n\n| 2024 |  10 |\nOutro.";
    let table = "| Year |   Total |\n\n| 2024 |  10 |";
    let page = Page::new(1, content).with_elements(vec![
        located("intro", content, "Intro."),
        located("tbl", content, table),
        located("outro", content, "Outro."),
    ]);
    let counter = WordTokenCounter;
    let blocks = vec![Block::table("| Year | Total |\n| 2024 | 10 |", 1, vec![], &counter)];

    assert_eq!(resolve_ids(&[page], &blocks), vec!["tbl"]);
}

#[test]
fn test_whitespace_tolerant_line_wrap() {
    let content = "Net revenue\nincreased  sharply in 2024.";
    let page = Page::new(1, content)
        .with_element(Element::text("p", content).with_offsets(0, content.len()));
    let counter = WordTokenCounter;
    let blocks = vec![Block::text("Net revenue increased sharply in 2024.", 1, vec![], &counter)];

    assert_eq!(resolve_ids(&[page], &blocks), vec!["p"]);
}

#[test]
fn test_minified_table_without_whitespace_is_not_matched() {
    let content = "|Year|Total|\n|2024|10|";
    let page = Page::new(1, content)
        .with_element(Element::table("tbl", content).with_offsets(0, content.len()));
    let counter = WordTokenCounter;
    let blocks = vec![Block::table("| Year | Total |\n| 2024 | 10 |", 1, vec![], &counter)];

    assert!(resolve_ids(&[page], &blocks).is_empty());
}

#[test]
fn test_tolerant_search_restarts_from_page_start() {
    let page_text = "Alpha  beta. Gamma.";
    let locator = SpanLocator::new();

    // The tolerant search ignores the cursor
    let span = locator.locate("Alpha beta.", page_text, 10).unwrap();
    assert_eq!(span.start, 0);
    assert_eq!(span.end, 12);
}

#[test]
fn test_tolerant_pattern_escapes_table_syntax() {
    let pattern = WhitespaceTolerantMatcher::pattern("| $1.5 | (net) |").unwrap();
    assert_eq!(pattern, r"\|\s+\$1\.5\s+\|\s+\(net\)\s+\|");
}

#[test]
fn test_unresolvable_ids_are_skipped() {
    let page = Page::new(1, "").with_element(Element::text("kept", "Kept."));
    let counter = WordTokenCounter;
    let blocks = vec![
        Block::text("Kept.", 1, vec!["kept".to_string()], &counter),
        Block::text("Gone.", 1, vec!["deleted".to_string()], &counter),
    ];

    assert_eq!(resolve_ids(&[page], &blocks), vec!["kept"]);
}

#[test]
fn test_pages_without_content_link_nothing() {
    let page = Page::new(1, "").with_element(Element::text("e", "Text.").with_offsets(0, 5));
    let counter = WordTokenCounter;
    let blocks = vec![Block::text("Text.", 1, vec![], &counter)];

    assert!(resolve_ids(&[page], &blocks).is_empty());
}
