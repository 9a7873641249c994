use crate::config::ClassifierConfig;
use crate::data_model::EmotionScore;
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Stateless text-classification engine.
///
/// Every call covers the engine's full, fixed label vocabulary; scores lie
/// in [0, 1]. The order of the returned set is engine-defined and only
/// matters for tie-breaking downstream.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>>;
}

/// Classifier backed by a HuggingFace-style inference endpoint.
///
/// POSTs `{"inputs": text}` and expects the usual text-classification
/// response shape: a list per input, each a list of {label, score}.
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl RemoteClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        RemoteClassifier {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }
}

#[async_trait]
impl EmotionClassifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>> {
        let body = json!({ "inputs": text });
        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AnalysisError::Connectivity(e.to_string())
                } else {
                    AnalysisError::Classification(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Classification(format!(
                "inference endpoint answered {}: {}",
                status, detail
            )));
        }

        // One outer list entry per input; we always send a single input.
        let scores: Vec<Vec<EmotionScore>> = response
            .json()
            .await
            .map_err(|e| AnalysisError::Classification(e.to_string()))?;
        let scores = scores
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Classification("empty inference response".to_string()))?;

        if scores.is_empty() {
            return Err(AnalysisError::Classification(
                "inference response had no labels".to_string(),
            ));
        }

        debug!(num_labels = scores.len(), "Classified text");
        Ok(scores)
    }
}
