use knowbase_core::chunker::{chunk_document, split, ChunkingConfig};
use knowbase_core::types::Document;

fn cfg(max: usize, overlap: usize) -> ChunkingConfig {
    ChunkingConfig::new(max, overlap).expect("valid config")
}

#[test]
fn short_document_yields_single_whole_chunk() {
    let text = "A single short paragraph.";
    let spans = split(text, cfg(100, 10));
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, text.len()));
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(split("", cfg(100, 10)).is_empty());
}

#[test]
fn spans_cover_text_without_gaps() {
    let text = "This is a sentence. ".repeat(60);
    let spans = split(&text, cfg(200, 50));
    assert!(spans.len() > 1);
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans.last().expect("nonempty").end, text.len());
    for pair in spans.windows(2) {
        assert!(pair[1].start <= pair[0].end, "gap between adjacent chunks");
        assert!(pair[1].start > pair[0].start, "walk must advance");
    }
}

#[test]
fn chunks_prefer_sentence_boundaries() {
    let text = "First sentence here. Second sentence follows and is longer. Third one.";
    let spans = split(text, cfg(40, 5));
    let first = &text[spans[0].start..spans[0].end];
    assert!(first.ends_with(". "), "expected a sentence cut, got {first:?}");
}

#[test]
fn paragraph_boundary_wins_over_sentence() {
    let text = "Intro line one. More intro.\n\nSecond paragraph starts here and \
                continues with enough text to overflow the first window.";
    let spans = split(text, cfg(60, 10));
    let first = &text[spans[0].start..spans[0].end];
    assert!(first.ends_with("\n\n"), "expected a paragraph cut, got {first:?}");
}

#[test]
fn adjacent_chunks_share_at_most_the_configured_overlap() {
    let text = "word ".repeat(100);
    let spans = split(&text, cfg(50, 10));
    assert!(spans.len() > 1);
    for pair in spans.windows(2) {
        assert!(pair[1].start <= pair[0].end, "no gaps");
        assert!(pair[0].end - pair[1].start <= 10, "overlap bounded by config");
    }
}

#[test]
fn hard_cut_when_no_boundary_exists() {
    let text = "x".repeat(1000);
    let spans = split(&text, cfg(100, 20));
    assert!(spans.len() > 1);
    assert_eq!(spans[0].end - spans[0].start, 100);
    for pair in spans.windows(2) {
        assert_eq!(pair[1].start, pair[0].end - 20);
    }
    assert_eq!(spans.last().expect("nonempty").end, text.len());
}

#[test]
fn multibyte_text_never_splits_a_char() {
    let text = "äöü ßéñ ".repeat(40);
    let spans = split(&text, cfg(25, 5));
    assert!(spans.len() > 1);
    for s in &spans {
        assert!(text.is_char_boundary(s.start));
        assert!(text.is_char_boundary(s.end));
    }
    assert_eq!(spans.last().expect("nonempty").end, text.len());
}

#[test]
fn invalid_overlap_rejected() {
    assert!(ChunkingConfig::new(10, 10).is_err());
    assert!(ChunkingConfig::new(0, 0).is_err());
    assert!(ChunkingConfig::new(10, 9).is_ok());
}

#[test]
fn chunk_document_attaches_positional_metadata() {
    let doc = Document::new("doc-1", "alpha beta gamma. ".repeat(30));
    let chunks = chunk_document(&doc, cfg(100, 10));
    let total = chunks.len();
    assert!(total > 1);
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.doc_id, "doc-1");
        assert_eq!(c.chunk_index, i);
        assert_eq!(c.total_chunks, total);
        assert_eq!(c.content, &doc.body[c.start_offset..c.end_offset]);
    }
}
