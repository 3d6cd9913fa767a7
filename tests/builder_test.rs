//! Integration tests for block building.

use pagechunk::chunker::{classify_line, LineKind};
use pagechunk::{pages_from_json, BlockKind, Chunker, ChunkerOptions, Element, Page};

fn kinds(pages: &[Page]) -> Vec<BlockKind> {
    Chunker::new()
        .build_blocks(pages)
        .iter()
        .map(|b| b.kind())
        .collect()
}

#[test]
fn test_pipe_in_prose_becomes_table() {
    let pages = [Page::new(1, "Choose red | blue for the theme.\nNext line.")];

    assert_eq!(kinds(&pages), vec![BlockKind::Table, BlockKind::Text]);

    let chunks = Chunker::new().split(&pages, None);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].has_table());
}

#[test]
fn test_table_without_alignment_row() {
    assert_eq!(classify_line("a | b"), LineKind::Table);
    assert_eq!(classify_line("| only one cell |"), LineKind::Table);
    assert_eq!(classify_line("#Heading"), LineKind::Header);
    assert_eq!(classify_line("  | indented |"), LineKind::Table);
    assert_eq!(classify_line("   "), LineKind::Text);
}

#[test]
fn test_fallback_groups_consecutive_table_lines() {
    let content = "# Balance Sheet\nAs of December 31.\n| Item | 2024 |\n|---|---|\n| Cash | 10 |\n\n| Debt | 5 |";
    let blocks = Chunker::new().build_blocks(&[Page::new(4, content)]);

    let summary: Vec<(BlockKind, &str)> = blocks.iter().map(|b| (b.kind(), b.content())).collect();
    assert_eq!(
        summary,
        vec![
            (BlockKind::Header, "# Balance Sheet"),
            (BlockKind::Text, "As of December 31."),
            (BlockKind::Table, "| Item | 2024 |\n|---|---|\n| Cash | 10 |\n"),
            (BlockKind::Text, ""),
            (BlockKind::Table, "| Debt | 5 |\n"),
        ]
    );
    assert!(blocks.iter().all(|b| b.page() == 4));
}

#[test]
fn test_mixed_pages_fall_back_per_page() {
    let pages = [
        Page::new(1, "raw text ignored").with_elements(vec![
            Element::header("h", "## Overview"),
            Element::text("p", "Structured paragraph."),
        ]),
        Page::new(2, "# Notes\n| a | b |"),
    ];
    let blocks = Chunker::new().build_blocks(&pages);

    assert_eq!(
        blocks.iter().map(|b| b.kind()).collect::<Vec<_>>(),
        vec![BlockKind::Header, BlockKind::Text, BlockKind::Header, BlockKind::Table]
    );
    assert_eq!(blocks[1].element_ids(), ["p".to_string()]);
    assert!(blocks[2].element_ids().is_empty());
}

#[test]
fn test_elements_ignored_when_disabled() {
    let pages = [Page::new(1, "| x | y |").with_element(Element::text("e", "Element text."))];
    let chunker = Chunker::with_options(ChunkerOptions::new().with_elements(false));
    let blocks = chunker.build_blocks(&pages);

    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_table());
    assert!(blocks[0].element_ids().is_empty());
}

#[test]
fn test_element_kind_from_json_is_case_insensitive() {
    let json = r#"[{
        "number": 1,
        "content": "",
        "elements": [
            {"id": "b", "kind": "TABLE", "content": "| 1 |", "content_start_offset": 20, "content_end_offset": 25},
            {"id": "a", "kind": "Header", "content": "Results", "content_start_offset": 0, "content_end_offset": 7},
            {"id": "c", "kind": "xbrl:TextBlock", "content": "Tagged text."}
        ]
    }]"#;
    let pages = pages_from_json(json).unwrap();

    assert_eq!(
        kinds(&pages),
        vec![BlockKind::Header, BlockKind::Table, BlockKind::Text]
    );
    assert_eq!(pages[0].elements[2].kind.as_str(), "xbrl:TextBlock");
}

#[test]
fn test_text_block_tokens_are_sentence_sums() {
    let blocks = Chunker::new().build_blocks(&[Page::new(1, "One two. Three four five.")]);

    let block = &blocks[0];
    assert_eq!(block.tokens(), 5);
    if let pagechunk::Block::Text(text) = block {
        let sum: usize = text.sentences.iter().map(|s| s.tokens).sum();
        assert_eq!(sum, block.tokens());
        assert_eq!(text.sentences.len(), 2);
    } else {
        panic!("expected a text block");
    }
}
