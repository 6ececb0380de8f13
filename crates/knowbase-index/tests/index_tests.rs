use knowbase_core::error::IndexError;
use knowbase_core::types::Chunk;
use knowbase_index::{cosine_similarity, FlatIndex};

fn chunk(doc_id: &str, content: &str) -> Chunk {
    Chunk {
        doc_id: doc_id.to_string(),
        content: content.to_string(),
        start_offset: 0,
        end_offset: content.len(),
        chunk_index: 0,
        total_chunks: 1,
    }
}

#[test]
fn insert_assigns_sequential_handles() {
    let mut index = FlatIndex::new(3);
    let h0 = index.insert(vec![1.0, 0.0, 0.0], chunk("a", "first")).expect("insert");
    let h1 = index.insert(vec![0.0, 1.0, 0.0], chunk("b", "second")).expect("insert");
    assert!(h0 < h1);
    assert_eq!(index.len(), 2);
}

#[test]
fn insert_rejects_mismatched_dimension() {
    let mut index = FlatIndex::new(3);
    index.insert(vec![1.0, 0.0, 0.0], chunk("a", "ok")).expect("insert");
    let err = index.insert(vec![1.0, 0.0], chunk("b", "bad")).expect_err("must reject");
    assert!(matches!(err, IndexError::DimensionMismatch { expected: 3, actual: 2 }));
    assert_eq!(index.len(), 1, "rejected vector is not stored");
}

#[test]
fn query_rejects_mismatched_dimension_and_zero_k() {
    let mut index = FlatIndex::new(2);
    index.insert(vec![1.0, 0.0], chunk("a", "entry")).expect("insert");

    let err = index.query(&[1.0, 0.0, 0.0], 1).expect_err("bad dim");
    assert!(matches!(err, IndexError::DimensionMismatch { .. }));

    let err = index.query(&[1.0, 0.0], 0).expect_err("bad k");
    assert!(matches!(err, IndexError::InvalidK));
}

#[test]
fn empty_index_query_returns_empty_result() {
    let index = FlatIndex::new(4);
    let hits = index.query(&[1.0, 0.0, 0.0, 0.0], 5).expect("query");
    assert!(hits.is_empty());
}

#[test]
fn query_ranks_by_descending_similarity() {
    let mut index = FlatIndex::new(2);
    index.insert(vec![0.0, 1.0], chunk("far", "orthogonal")).expect("insert");
    index.insert(vec![1.0, 0.0], chunk("near", "aligned")).expect("insert");
    index.insert(vec![0.7, 0.7], chunk("mid", "diagonal")).expect("insert");

    let hits = index.query(&[1.0, 0.0], 3).expect("query");
    let ids: Vec<&str> = hits.iter().map(|h| h.chunk.doc_id.as_str()).collect();
    assert_eq!(ids, vec!["near", "mid", "far"]);
    assert!(hits[0].score > hits[1].score && hits[1].score > hits[2].score);
}

#[test]
fn equal_scores_break_ties_by_insertion_order() {
    let mut index = FlatIndex::new(2);
    index.insert(vec![1.0, 0.0], chunk("first", "same direction")).expect("insert");
    index.insert(vec![2.0, 0.0], chunk("second", "same direction, scaled")).expect("insert");
    index.insert(vec![0.0, 1.0], chunk("other", "orthogonal")).expect("insert");

    // Cosine is scale-invariant, so both aligned entries score identically.
    let hits = index.query(&[3.0, 0.0], 2).expect("query");
    assert_eq!(hits[0].chunk.doc_id, "first");
    assert_eq!(hits[1].chunk.doc_id, "second");
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn identical_queries_return_identical_results() {
    let mut index = FlatIndex::new(3);
    for (i, v) in [[0.2, 0.5, 0.1], [0.9, 0.1, 0.3], [0.4, 0.4, 0.4], [0.0, 0.0, 1.0]]
        .iter()
        .enumerate()
    {
        index.insert(v.to_vec(), chunk(&format!("d{i}"), "entry")).expect("insert");
    }
    let q = [0.3, 0.3, 0.5];
    let a = index.query(&q, 3).expect("query");
    let b = index.query(&q, 3).expect("query");
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.chunk, y.chunk);
        assert_eq!(x.score, y.score);
    }
}

#[test]
fn query_truncates_to_k() {
    let mut index = FlatIndex::new(2);
    for i in 0..10 {
        index
            .insert(vec![1.0, i as f32 * 0.1], chunk(&format!("d{i}"), "entry"))
            .expect("insert");
    }
    assert_eq!(index.query(&[1.0, 0.0], 4).expect("query").len(), 4);
    assert_eq!(index.query(&[1.0, 0.0], 100).expect("query").len(), 10);
}

#[test]
fn cosine_similarity_basics() {
    let a = vec![1.0, 0.0, 0.0];
    assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-4);
    assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 1e-4);
    assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 1e-4);
    assert_eq!(cosine_similarity(&a, &[0.0, 0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
}
