use knowbase_core::traits::Embedder;
use knowbase_embed::{default_embedder, HashEmbedder, DEFAULT_HASH_DIM};

#[test]
fn hash_embedder_shapes_and_determinism() {
    let embedder = HashEmbedder::default();
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), DEFAULT_HASH_DIM);

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn batch_matches_per_item_embedding() {
    let embedder = HashEmbedder::new(128);
    let texts = vec!["refund my order".to_string(), "track a parcel".to_string()];
    let batch = embedder.embed_batch(&texts).expect("embed_batch");
    for (text, from_batch) in texts.iter().zip(&batch) {
        let single = embedder.embed(text).expect("embed");
        assert_eq!(&single, from_batch);
    }
}

#[test]
fn punctuation_variants_embed_identically() {
    let embedder = HashEmbedder::default();
    let a = embedder.embed("water.").expect("embed");
    let b = embedder.embed("water?").expect("embed");
    assert_eq!(a, b, "normalized tokens collapse punctuation variants");
}

#[test]
fn unrelated_texts_are_not_identical() {
    let embedder = HashEmbedder::default();
    let a = embedder.embed("voucher codes expire").expect("embed");
    let b = embedder.embed("parcels ship overnight").expect("embed");
    assert_ne!(a, b);
}

#[test]
fn default_embedder_respects_env_flag() {
    std::env::set_var("APP_USE_HASH_EMBEDDINGS", "1");
    let embedder = default_embedder().expect("embedder");
    assert_eq!(embedder.dim(), DEFAULT_HASH_DIM);
}
