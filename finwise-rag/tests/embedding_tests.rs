//! Tests for the embedding provider contract, exercised through the mock.

use finwise_rag::embedding::EmbeddingProvider;
use finwise_rag::error::RagError;
use finwise_rag::mock::MockEmbeddingProvider;

const DIM: usize = 16;

#[tokio::test]
async fn equal_texts_embed_to_equal_vectors() {
    let provider = MockEmbeddingProvider::new(DIM);

    let first = provider.embed("How do emergency funds work?").await.unwrap();
    let second = provider.embed("How do emergency funds work?").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn distinct_texts_embed_to_distinct_vectors() {
    let provider = MockEmbeddingProvider::new(DIM);

    let budgeting = provider.embed("budgeting").await.unwrap();
    let investing = provider.embed("investing").await.unwrap();

    assert_ne!(budgeting, investing);
}

#[tokio::test]
async fn embeddings_have_the_configured_dimension_and_unit_norm() {
    let provider = MockEmbeddingProvider::new(DIM);

    let embedding = provider.embed("compound interest").await.unwrap();
    assert_eq!(embedding.len(), DIM);
    assert_eq!(provider.dimensions(), DIM);

    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
}

#[tokio::test]
async fn batch_embeddings_preserve_input_order() {
    let provider = MockEmbeddingProvider::new(DIM);
    let texts = ["savings", "credit scores", "retirement accounts"];

    let batch = provider.embed_batch(&texts).await.unwrap();

    assert_eq!(batch.len(), texts.len());
    for (text, embedding) in texts.iter().zip(&batch) {
        let single = provider.embed(text).await.unwrap();
        assert_eq!(*embedding, single);
    }
}

#[tokio::test]
async fn empty_batch_embeds_to_nothing() {
    let provider = MockEmbeddingProvider::new(DIM);

    let batch = provider.embed_batch(&[]).await.unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn failure_injection_trips_after_the_configured_calls() {
    let mock = MockEmbeddingProvider::new(DIM).fail_after(2);

    assert!(mock.embed("first").await.is_ok());
    assert!(mock.embed("second").await.is_ok());

    let err = mock.embed("third").await.unwrap_err();
    assert!(matches!(
        err,
        RagError::EmbeddingUnavailable { ref provider, .. } if provider == "Mock"
    ));
    assert!(err.is_retryable());
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn mock_provider_reports_healthy() {
    let provider = MockEmbeddingProvider::new(DIM);
    assert!(provider.health_check().await);
}
