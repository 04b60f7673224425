//! End-to-end pipeline tests against the in-process store.

use std::sync::Arc;

use webrag_core::AppError;
use webrag_rag::{
    create_embedder, extract::extract_from_html, Answerer, Embedder, Extractor, Ingestor,
    MemoryStore, MockEmbedder, VectorStore,
};

const PAGE: &str = "<html>\
    <head><title>Ownership</title></head>\
    <body><p>Rust enforces ownership rules at compile time so that \
    memory errors are caught before the program ever runs.</p>\
    <a href=\"https://doc.rust-lang.org\">book</a>\
    <a href=\"/reference\">reference</a>\
    </body></html>";

fn pipeline(chunk_size: usize) -> (Ingestor, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let ingestor = Ingestor::new(
        Extractor::new(),
        Arc::new(MockEmbedder::default()),
        store.clone(),
        chunk_size,
    );
    (ingestor, store)
}

#[tokio::test]
async fn short_page_yields_head_record_and_one_chunk() {
    let (ingestor, store) = pipeline(1000);
    let page = extract_from_html("http://site.test/ownership", PAGE).unwrap();

    let report = ingestor.ingest_page(page).await.unwrap();

    assert_eq!(report.chunks_total, 1);
    assert_eq!(report.chunks_stored, 1);
    assert_eq!(report.external_links, 1);
    assert_eq!(report.internal_links, 1);

    let mut ids = store.ids().await;
    ids.sort();
    assert_eq!(
        ids,
        vec![
            "http://site.test/ownership".to_string(),
            "http://site.test/ownership#chunk-0".to_string(),
        ]
    );

    // The head record carries the whole body text
    let head = store.get("http://site.test/ownership").await.unwrap();
    assert!(head.metadata.body.contains("ownership rules"));
}

#[tokio::test]
async fn long_body_splits_into_bounded_chunks() {
    let (ingestor, store) = pipeline(50);
    let words: Vec<String> = (0..60).map(|i| format!("word{}", i)).collect();
    let body = words.join(" ");
    let html = format!("<html><head></head><body>{}</body></html>", body);
    let page = extract_from_html("http://site.test/long", &html).unwrap();

    let report = ingestor.ingest_page(page).await.unwrap();

    assert!(report.chunks_total > 1);
    assert_eq!(report.chunks_stored, report.chunks_total);
    // Head record plus one record per chunk
    assert_eq!(store.len().await, report.chunks_total + 1);

    for id in store.ids().await {
        let record = store.get(&id).await.unwrap();
        if id.contains("#chunk-") {
            assert!(record.metadata.body.chars().count() <= 50);
        }
    }
}

#[tokio::test]
async fn body_of_twice_chunk_size_plus_one_yields_three_chunks() {
    let (ingestor, store) = pipeline(10);
    // 21 characters, one more than two full chunks
    let body = "aaaa bbbb cccc dddd a";
    assert_eq!(body.len(), 21);
    let html = format!("<html><head></head><body>{}</body></html>", body);
    let page = extract_from_html("http://site.test/exact", &html).unwrap();

    let report = ingestor.ingest_page(page).await.unwrap();

    assert_eq!(report.chunks_total, 3);
    assert_eq!(report.chunks_stored, 3);
    for id in store.ids().await {
        if id.contains("#chunk-") {
            let record = store.get(&id).await.unwrap();
            assert!(record.metadata.body.chars().count() <= 10);
        }
    }
}

#[tokio::test]
async fn head_embedding_query_returns_ingested_document() {
    let (ingestor, store) = pipeline(1000);
    let page = extract_from_html("http://site.test/ownership", PAGE).unwrap();
    let head = page.head.clone();
    let body = page.body.clone();
    ingestor.ingest_page(page).await.unwrap();

    let embedder = MockEmbedder::default();
    let query = embedder.embed(&head).await.unwrap();
    let results = store.query(&query, 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "http://site.test/ownership");
    assert_eq!(results[0].body, body);
}

#[tokio::test]
async fn answer_comes_back_with_ingested_source() {
    let (ingestor, store) = pipeline(1000);
    let page = extract_from_html("http://site.test/ownership", PAGE).unwrap();
    ingestor.ingest_page(page).await.unwrap();

    #[derive(Debug)]
    struct EchoLlm;

    #[async_trait::async_trait]
    impl webrag_llm::LlmClient for EchoLlm {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: &webrag_llm::LlmRequest,
        ) -> webrag_core::AppResult<webrag_llm::LlmResponse> {
            Ok(webrag_llm::LlmResponse {
                content: request.prompt.clone(),
                model: request.model.clone(),
            })
        }
    }

    let answerer = Answerer::new(
        Arc::new(MockEmbedder::default()),
        store,
        Arc::new(EchoLlm),
        "echo-model",
    );

    let answer = answerer
        .answer("How does Rust catch memory errors?")
        .await
        .unwrap();

    // The echoed prompt must contain the ingested context and source
    assert!(answer.text.contains("ownership rules"));
    assert!(answer.text.contains("http://site.test/ownership"));
    assert_eq!(
        answer.sources,
        vec!["http://site.test/ownership".to_string()]
    );
}

#[tokio::test]
async fn mock_embedder_is_deterministic_across_calls() {
    let embedder = MockEmbedder::default();
    let a = embedder.embed("the same sentence").await.unwrap();
    let b = embedder.embed("the same sentence").await.unwrap();
    assert_eq!(a, b);
}

#[test]
fn openai_embedder_without_key_fails_before_any_network() {
    let err = create_embedder("openai", None, "text-embedding-3-small", None).unwrap_err();
    assert!(matches!(err, AppError::MissingCredential(_)));
}
