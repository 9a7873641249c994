use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// The Error type for store, classification and pipeline operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store or the classifier endpoint could not be reached at all.
    /// Only escalated when it happens before the per-document loop starts;
    /// mid-loop occurrences are downgraded to per-document skips.
    #[error("Service unavailable: {0}")]
    Connectivity(String),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization/Deserialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

// reqwest's connect/timeout errors surface as Connectivity so callers can
// answer "service unavailable" instead of a generic store error.
impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            AnalysisError::Connectivity(err.to_string())
        } else {
            AnalysisError::Store(err.to_string())
        }
    }
}

/// Why a single document was skipped during an annotation run.
///
/// A `SkipReason` never escapes the run loop; it is logged, counted and
/// folded into the aggregate `RunOutcome`.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("document has no tweet content")]
    MissingContent,

    #[error("classification failed: {0}")]
    Classification(String),

    #[error("update failed: {0}")]
    Update(String),
}
