// tests/ingest_tests.rs

use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use TweetPulse::data_model::SearchResults;
use TweetPulse::error::{AnalysisError, Result};
use TweetPulse::ingest::load_dataset;
use TweetPulse::store::DocumentStore;

/// Store stub that only supports indexing; optionally rejects every
/// tweet whose id matches `reject_id`.
struct IndexOnlyStore {
    index_calls: AtomicUsize,
    reject_id: Option<String>,
}

impl IndexOnlyStore {
    fn new(reject_id: Option<&str>) -> Self {
        IndexOnlyStore {
            index_calls: AtomicUsize::new(0),
            reject_id: reject_id.map(str::to_string),
        }
    }
}

#[async_trait]
impl DocumentStore for IndexOnlyStore {
    async fn search(&self, _: &Value, _: &[&str], _: usize) -> Result<SearchResults> {
        unimplemented!("not used by ingestion")
    }

    async fn update(&self, _: &str, _: &Value) -> Result<()> {
        unimplemented!("not used by ingestion")
    }

    async fn index(&self, doc: &Value) -> Result<String> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        let id = doc["id"].as_str().unwrap_or("generated").to_string();
        if self.reject_id.as_deref() == Some(id.as_str()) {
            return Err(AnalysisError::Store("mapping conflict".to_string()));
        }
        Ok(id)
    }

    async fn ensure_index(&self) -> Result<bool> {
        Ok(false)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn dataset_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "{}", content).expect("Failed to write dataset");
    file
}

#[tokio::test]
async fn loads_every_tweet_from_the_dataset() {
    let file = dataset_file(r#"[{"id": "a"}, {"id": "b"}, {"id": "c"}]"#);
    let store = IndexOnlyStore::new(None);

    let count = load_dataset(&store, file.path()).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(store.index_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn per_tweet_index_failures_do_not_stop_the_load() {
    let file = dataset_file(r#"[{"id": "a"}, {"id": "broken"}, {"id": "c"}]"#);
    let store = IndexOnlyStore::new(Some("broken"));

    let count = load_dataset(&store, file.path()).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(store.index_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn missing_dataset_file_reports_not_found() {
    let store = IndexOnlyStore::new(None);
    let result = load_dataset(&store, std::path::Path::new("/no/such/tweets.json")).await;

    match result {
        Err(AnalysisError::Io { source }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
        }
        other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn malformed_dataset_is_a_serialization_error() {
    let file = dataset_file("this is not json");
    let store = IndexOnlyStore::new(None);

    let result = load_dataset(&store, file.path()).await;

    assert!(matches!(result, Err(AnalysisError::Serialization { .. })));
    assert_eq!(store.index_calls.load(Ordering::SeqCst), 0);
}
