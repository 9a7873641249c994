use serde::{Deserialize, Serialize};

/// One (label, score) pair from the emotion classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

/// Structured classification result merged into a tweet document.
///
/// `all_emotions` covers the classifier's full label vocabulary, sorted by
/// descending score; `dominant_emotion` is always its first element. Ties
/// keep the classifier's own iteration order (engine-defined).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub dominant_emotion: EmotionScore,
    pub all_emotions: Vec<EmotionScore>,
}

impl EmotionAnalysis {
    /// Builds the analysis from a raw classifier output.
    ///
    /// The dominant label is the stable maximum by score: on a tie the
    /// first-seen entry wins. The sort is stable for the same reason.
    pub fn from_scores(mut scores: Vec<EmotionScore>) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Some(EmotionAnalysis {
            dominant_emotion: scores[0].clone(),
            all_emotions: scores,
        })
    }
}

/// Engagement counters and derived labels stored under `metrics`.
///
/// Only `emotion` is ever written by the annotation pipeline. `stance` and
/// the counters are opaque here and must survive the merge untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub stance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A tweet as returned to API callers (flattened from the stored shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub user: UserInfo,
    pub content: String,
    pub created_at: String,
    pub metrics: TweetMetrics,
}

/// Date window plus size cap for one annotation run. Built per invocation,
/// never persisted.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_results: usize,
}

/// Aggregate result of one annotation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub total_selected: usize,
    pub successfully_updated: usize,
    pub elapsed_secs: f64,
}

impl RunOutcome {
    pub fn empty() -> Self {
        RunOutcome {
            total_selected: 0,
            successfully_updated: 0,
            elapsed_secs: 0.0,
        }
    }
}

/// One hit from a store search: the document id plus the requested source
/// fields as raw JSON.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub source: serde_json::Value,
}

/// Hits returned by a capped search, plus the store's total match count
/// (which may exceed `hits.len()`).
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: usize,
}
