use crate::classifier::EmotionClassifier;
use crate::data_model::{EmotionAnalysis, QueryFilter, RunOutcome, SearchHit};
use crate::error::{Result, SkipReason};
use crate::query::build_query;
use crate::store::DocumentStore;
use crate::utils::prometheus_metrics::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// Source fields requested per hit: just enough to classify and merge.
const ANNOTATION_SOURCE_FIELDS: &[&str] =
    &["payload.tweet.content", "id", "metrics", "meta", "user"];

/// Drives one batch annotation run: query, per-tweet classify, per-tweet
/// merge-update, aggregate.
///
/// Both collaborators are injected; the pipeline holds no other state, so
/// one instance can serve any number of sequential runs.
pub struct AnnotationPipeline {
    store: Arc<dyn DocumentStore>,
    classifier: Arc<dyn EmotionClassifier>,
}

impl AnnotationPipeline {
    pub fn new(store: Arc<dyn DocumentStore>, classifier: Arc<dyn EmotionClassifier>) -> Self {
        AnnotationPipeline { store, classifier }
    }

    /// Runs the pipeline over the filter's selection.
    ///
    /// Failures before the loop (the search itself) escalate and abort the
    /// run. Inside the loop each tweet is processed independently: a failing
    /// tweet is logged, counted as skipped, and never aborts the batch. Each
    /// selected tweet gets at most one update attempt per run.
    pub async fn run(&self, filter: &QueryFilter) -> Result<RunOutcome> {
        ANNOTATION_RUNS_TOTAL.inc();
        ACTIVE_ANNOTATION_RUNS.inc();
        let run_timer = RUN_DURATION_SECONDS.start_timer();
        let started = Instant::now();

        let query = build_query(filter);
        info!(%query, size = filter.max_results, "Selecting tweets for annotation");

        let results = match self
            .store
            .search(&query, ANNOTATION_SOURCE_FIELDS, filter.max_results)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                ACTIVE_ANNOTATION_RUNS.dec();
                run_timer.observe_duration();
                return Err(e);
            }
        };

        // The selection is what we actually retrieved, not the store's
        // total match count: retrieval is capped at max_results.
        let total_selected = results.hits.len();
        info!(total_selected, store_total = results.total, "Selection complete");

        if results.hits.is_empty() {
            ACTIVE_ANNOTATION_RUNS.dec();
            run_timer.observe_duration();
            return Ok(RunOutcome::empty());
        }

        let mut successfully_updated = 0;
        for hit in &results.hits {
            let span = info_span!("annotate_tweet", tweet_id = %hit.id);
            let _enter = span.enter();

            match self.annotate_one(hit).await {
                Ok(()) => {
                    TWEETS_ANNOTATED_TOTAL.inc();
                    successfully_updated += 1;
                }
                Err(reason) => {
                    TWEETS_SKIPPED_TOTAL.inc();
                    warn!(tweet_id = %hit.id, %reason, "Skipping tweet");
                }
            }
        }

        let elapsed_secs = started.elapsed().as_secs_f64();
        run_timer.observe_duration();
        ACTIVE_ANNOTATION_RUNS.dec();

        Ok(RunOutcome {
            total_selected,
            successfully_updated,
            elapsed_secs,
        })
    }

    /// Classifies one tweet and merges the result back into the store.
    async fn annotate_one(&self, hit: &SearchHit) -> std::result::Result<(), SkipReason> {
        let content = hit.source["payload"]["tweet"]["content"]
            .as_str()
            .ok_or(SkipReason::MissingContent)?;
        debug!("Classifying tweet content");

        let scores = self
            .classifier
            .classify(content)
            .await
            .map_err(|e| SkipReason::Classification(e.to_string()))?;

        let analysis = EmotionAnalysis::from_scores(scores)
            .ok_or_else(|| SkipReason::Classification("empty label set".to_string()))?;

        let partial_doc = build_merge_doc(&hit.source, &analysis);
        self.store
            .update(&hit.id, &partial_doc)
            .await
            .map_err(|e| SkipReason::Update(e.to_string()))?;
        debug!(emotion = %analysis.dominant_emotion.label, "Tweet updated");

        Ok(())
    }
}

/// Builds the partial document merged into the store for one tweet.
///
/// The existing `metrics` object is carried over verbatim with only
/// `emotion` overwritten; `stance` and every counter stay untouched. The
/// store applies this as a field-level merge, never a full replace.
pub fn build_merge_doc(source: &Value, analysis: &EmotionAnalysis) -> Value {
    let mut metrics = match source.get("metrics") {
        Some(Value::Object(m)) => m.clone(),
        _ => serde_json::Map::new(),
    };
    metrics.insert(
        "emotion".to_string(),
        json!(analysis.dominant_emotion.label),
    );

    json!({
        "metrics": metrics,
        "emotion_analysis": {
            "dominant_emotion": analysis.dominant_emotion,
            "all_emotions": analysis.all_emotions,
        },
    })
}
