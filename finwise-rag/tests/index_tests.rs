//! Unit and property tests for the in-memory vector index.

use std::collections::HashMap;

use chrono::Utc;
use finwise_rag::document::{DocumentChunk, SearchFilter};
use finwise_rag::error::RagError;
use finwise_rag::index::VectorIndex;
use finwise_rag::memory::InMemoryVectorIndex;
use proptest::prelude::*;

const DIM: usize = 4;

fn make_chunk(id: &str, embedding: Vec<f32>) -> DocumentChunk {
    DocumentChunk {
        id: id.to_string(),
        text: format!("text for {id}"),
        file_name: "guide.txt".to_string(),
        file_type: "txt".to_string(),
        uploader_id: "user-1".to_string(),
        chunk_index: 0,
        total_chunks: 1,
        category: "financial_literacy".to_string(),
        upload_timestamp: Utc::now(),
        embedding,
    }
}

#[tokio::test]
async fn search_orders_by_descending_similarity() {
    let index = InMemoryVectorIndex::new(DIM);
    let chunks = vec![
        make_chunk("exact", vec![1.0, 0.0, 0.0, 0.0]),
        make_chunk("orthogonal", vec![0.0, 1.0, 0.0, 0.0]),
        make_chunk("near", vec![1.0, 0.01, 0.0, 0.0]),
    ];
    index.upsert("docs", &chunks).await.unwrap();

    let results = index.search("docs", &[1.0, 0.0, 0.0, 0.0], 3, None).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["exact", "near", "orthogonal"]);
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!(results[1].score < 1.0 && results[1].score > 0.99);
    assert!(results[2].score.abs() < 1e-6);
}

#[tokio::test]
async fn equal_scores_keep_insertion_order() {
    let index = InMemoryVectorIndex::new(DIM);
    let shared = vec![0.5, 0.5, 0.0, 0.0];
    index.upsert("docs", &[make_chunk("first", shared.clone())]).await.unwrap();
    index.upsert("docs", &[make_chunk("second", shared.clone())]).await.unwrap();
    index.upsert("docs", &[make_chunk("third", shared)]).await.unwrap();

    let results = index.search("docs", &[1.0, 1.0, 0.0, 0.0], 3, None).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn k_zero_returns_empty() {
    let index = InMemoryVectorIndex::new(DIM);
    index.upsert("docs", &[make_chunk("a", vec![1.0, 0.0, 0.0, 0.0])]).await.unwrap();
    let results = index.search("docs", &[1.0, 0.0, 0.0, 0.0], 0, None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn k_beyond_collection_size_returns_all() {
    let index = InMemoryVectorIndex::new(DIM);
    index
        .upsert(
            "docs",
            &[
                make_chunk("a", vec![1.0, 0.0, 0.0, 0.0]),
                make_chunk("b", vec![0.0, 1.0, 0.0, 0.0]),
            ],
        )
        .await
        .unwrap();
    let results = index.search("docs", &[1.0, 0.0, 0.0, 0.0], 50, None).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn unknown_collection_searches_empty() {
    let index = InMemoryVectorIndex::new(DIM);
    let results = index.search("nowhere", &[1.0, 0.0, 0.0, 0.0], 3, None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn clear_empties_the_collection_and_is_idempotent() {
    let index = InMemoryVectorIndex::new(DIM);
    index
        .upsert(
            "docs",
            &[
                make_chunk("a", vec![1.0, 0.0, 0.0, 0.0]),
                make_chunk("b", vec![0.0, 1.0, 0.0, 0.0]),
            ],
        )
        .await
        .unwrap();
    assert_eq!(index.count("docs").await.unwrap(), 2);

    index.clear("docs").await.unwrap();
    assert_eq!(index.count("docs").await.unwrap(), 0);
    let results = index.search("docs", &[1.0, 0.0, 0.0, 0.0], 3, None).await.unwrap();
    assert!(results.is_empty());

    // Clearing again, or clearing a collection that never existed, is fine.
    index.clear("docs").await.unwrap();
    index.clear("nowhere").await.unwrap();
}

#[tokio::test]
async fn upsert_rejects_wrong_dimension_without_partial_writes() {
    let index = InMemoryVectorIndex::new(DIM);
    let err = index
        .upsert(
            "docs",
            &[
                make_chunk("good", vec![1.0, 0.0, 0.0, 0.0]),
                make_chunk("bad", vec![1.0, 0.0]),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RagError::DimensionMismatch { expected: DIM, actual: 2 }
    ));
    // The valid chunk in the same batch must not have been written.
    assert_eq!(index.count("docs").await.unwrap(), 0);
}

#[tokio::test]
async fn search_rejects_wrong_dimension_query() {
    let index = InMemoryVectorIndex::new(DIM);
    let err = index.search("docs", &[1.0, 0.0], 3, None).await.unwrap_err();
    assert!(matches!(
        err,
        RagError::DimensionMismatch { expected: DIM, actual: 2 }
    ));
}

#[tokio::test]
async fn upsert_replaces_existing_id_in_place() {
    let index = InMemoryVectorIndex::new(DIM);
    let shared = vec![0.0, 0.0, 1.0, 0.0];
    index.upsert("docs", &[make_chunk("a", shared.clone())]).await.unwrap();
    index.upsert("docs", &[make_chunk("b", shared.clone())]).await.unwrap();

    // Re-upserting "a" keeps its original slot, so it still wins the tie.
    let mut replacement = make_chunk("a", shared);
    replacement.text = "updated".to_string();
    index.upsert("docs", &[replacement]).await.unwrap();

    assert_eq!(index.count("docs").await.unwrap(), 2);
    let results = index.search("docs", &[0.0, 0.0, 1.0, 0.0], 2, None).await.unwrap();
    assert_eq!(results[0].chunk.id, "a");
    assert_eq!(results[0].chunk.text, "updated");
    assert_eq!(results[1].chunk.id, "b");
}

#[tokio::test]
async fn category_filter_narrows_candidates() {
    let index = InMemoryVectorIndex::new(DIM);
    let mut savings = make_chunk("savings", vec![1.0, 0.0, 0.0, 0.0]);
    savings.category = "savings".to_string();
    let mut credit = make_chunk("credit", vec![1.0, 0.0, 0.0, 0.0]);
    credit.category = "credit".to_string();
    index.upsert("docs", &[savings, credit]).await.unwrap();

    let filter = SearchFilter::default().category("credit");
    let results = index
        .search("docs", &[1.0, 0.0, 0.0, 0.0], 10, Some(&filter))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "credit");
}

#[tokio::test]
async fn uploader_filter_narrows_candidates() {
    let index = InMemoryVectorIndex::new(DIM);
    let mut alice = make_chunk("alice-doc", vec![1.0, 0.0, 0.0, 0.0]);
    alice.uploader_id = "alice".to_string();
    let mut bob = make_chunk("bob-doc", vec![1.0, 0.0, 0.0, 0.0]);
    bob.uploader_id = "bob".to_string();
    index.upsert("docs", &[alice, bob]).await.unwrap();

    let filter = SearchFilter::default().uploader("bob");
    let results = index
        .search("docs", &[1.0, 0.0, 0.0, 0.0], 10, Some(&filter))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "bob-doc");
}

#[tokio::test]
async fn collections_are_independent() {
    let index = InMemoryVectorIndex::new(DIM);
    index.upsert("left", &[make_chunk("a", vec![1.0, 0.0, 0.0, 0.0])]).await.unwrap();
    index.upsert("right", &[make_chunk("b", vec![1.0, 0.0, 0.0, 0.0])]).await.unwrap();

    index.clear("left").await.unwrap();
    assert_eq!(index.count("left").await.unwrap(), 0);
    assert_eq!(index.count("right").await.unwrap(), 1);
}

// ── Property tests ─────────────────────────────────────────────────

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a random id and normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = DocumentChunk> {
    ("[a-z]{3,8}", arb_normalized_embedding(dim))
        .prop_map(|(id, embedding)| make_chunk(&id, embedding))
}

/// **Property: search ordering**
/// *For any* set of stored chunks, searching returns at most `k` results
/// ordered by descending cosine similarity.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_k(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            k in 0usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, unique_count) = rt.block_on(async {
                let index = InMemoryVectorIndex::new(DIM);

                // Deduplicate by id so re-upserts do not shrink the count
                let mut deduped: HashMap<String, DocumentChunk> = HashMap::new();
                for chunk in &chunks {
                    deduped.entry(chunk.id.clone()).or_insert_with(|| chunk.clone());
                }
                let unique: Vec<DocumentChunk> = deduped.into_values().collect();
                let count = unique.len();

                index.upsert("docs", &unique).await.unwrap();
                let results = index.search("docs", &query, k, None).await.unwrap();
                (results, count)
            });

            prop_assert!(results.len() <= k);
            prop_assert!(results.len() <= unique_count);
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
