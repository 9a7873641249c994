use crate::error::{AnalysisError, Result};
use crate::store::DocumentStore;
use crate::utils::prometheus_metrics::{TWEETS_INDEXED_TOTAL, TWEET_INDEX_ERRORS_TOTAL};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

/// Loads tweets from a JSON dataset file and indexes them one by one.
///
/// A tweet that fails to index is logged and skipped; the load carries on.
/// Returns the number of tweets actually indexed.
pub async fn load_dataset(store: &dyn DocumentStore, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(AnalysisError::Io {
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("dataset file '{}' not found", path.display()),
            ),
        });
    }

    let contents = tokio::fs::read_to_string(path).await?;
    let tweets: Vec<Value> = serde_json::from_str(&contents)?;

    let mut indexed = 0;
    for tweet in &tweets {
        match store.index(tweet).await {
            Ok(_) => {
                TWEETS_INDEXED_TOTAL.inc();
                indexed += 1;
            }
            Err(e) => {
                TWEET_INDEX_ERRORS_TOTAL.inc();
                error!(tweet_id = ?tweet.get("id"), error = %e, "Failed to index tweet");
            }
        }
    }

    info!(indexed, total = tweets.len(), "Dataset load complete");
    Ok(indexed)
}

/// Index bootstrap run at service startup: create the index if missing and
/// seed it from the dataset file when it was just created.
pub async fn bootstrap_index(store: &dyn DocumentStore, dataset_path: &Path) -> Result<()> {
    let created = store.ensure_index().await?;
    if created {
        match load_dataset(store, dataset_path).await {
            Ok(count) => info!(count, "Seeded newly created index"),
            // A missing dataset file is fine at startup; the index just
            // starts empty.
            Err(AnalysisError::Io { .. }) => {
                warn!(path = %dataset_path.display(), "No dataset file, index starts empty")
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
