// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_gauge, register_histogram, Counter, Gauge, Histogram};

// Metrics from the annotation pipeline
pub static ANNOTATION_RUNS_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_annotation_runs_total",
        "Total number of annotation runs started."
    )
    .expect("Failed to register ANNOTATION_RUNS_TOTAL counter")
});

pub static TWEETS_ANNOTATED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_tweets_annotated_total",
        "Total number of tweets successfully classified and updated."
    )
    .expect("Failed to register TWEETS_ANNOTATED_TOTAL counter")
});

pub static TWEETS_SKIPPED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pipeline_tweets_skipped_total",
        "Total number of tweets skipped (missing content, classification or update failure)."
    )
    .expect("Failed to register TWEETS_SKIPPED_TOTAL counter")
});

pub static RUN_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pipeline_run_duration_seconds",
        "Histogram of annotation run durations (from selection to loop completion)."
    )
    .expect("Failed to register RUN_DURATION_SECONDS histogram")
});

pub static ACTIVE_ANNOTATION_RUNS: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "pipeline_active_annotation_runs",
        "Number of annotation runs currently in flight."
    )
    .expect("Failed to register ACTIVE_ANNOTATION_RUNS gauge")
});

// Metrics from the ingestion path
pub static TWEETS_INDEXED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "ingest_tweets_indexed_total",
        "Total number of tweets indexed from the dataset file."
    )
    .expect("Failed to register TWEETS_INDEXED_TOTAL counter")
});

pub static TWEET_INDEX_ERRORS_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "ingest_tweet_index_errors_total",
        "Total number of errors indexing individual tweets from the dataset file."
    )
    .expect("Failed to register TWEET_INDEX_ERRORS_TOTAL counter")
});
