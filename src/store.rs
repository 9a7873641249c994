use crate::config::ElasticsearchConfig;
use crate::data_model::{SearchHit, SearchResults};
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Index mapping for the tweet documents. Mirrors the ingestion shape:
/// tweet text under payload.tweet.content, timestamps under meta.created_at,
/// engagement counters and derived labels under metrics.
pub const TWEET_INDEX_MAPPING: &str = r#"{
  "mappings": {
    "properties": {
      "id": { "type": "keyword" },
      "user": {
        "type": "object",
        "properties": {
          "username": { "type": "keyword" },
          "handle": { "type": "keyword" },
          "verified": { "type": "boolean" }
        }
      },
      "meta": {
        "type": "object",
        "properties": {
          "created_at": { "type": "date" },
          "hashtags": { "type": "keyword" }
        }
      },
      "payload": {
        "type": "object",
        "properties": {
          "tweet": {
            "type": "object",
            "properties": {
              "content": { "type": "text" }
            }
          }
        }
      },
      "metrics": {
        "type": "object",
        "properties": {
          "retweets": { "type": "long" },
          "likes": { "type": "long" },
          "replies": { "type": "long" },
          "emotion": { "type": "keyword" },
          "stance": { "type": "keyword" }
        }
      }
    }
  }
}"#;

/// The document store the pipeline runs against. Searches are capped and
/// field-projected; updates are field-level merges, never full replaces.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs `query` against the index, returning at most `size` hits with
    /// only `source_fields` populated, plus the store's total match count.
    async fn search(
        &self,
        query: &Value,
        source_fields: &[&str],
        size: usize,
    ) -> Result<SearchResults>;

    /// Merges `partial_doc` into the existing document `id`. Fields not
    /// named in `partial_doc` are left untouched by the store.
    async fn update(&self, id: &str, partial_doc: &Value) -> Result<()>;

    /// Indexes a new document, returning the store-assigned id.
    async fn index(&self, doc: &Value) -> Result<String>;

    /// Creates the index with its mapping if it does not exist yet.
    /// Returns true when the index was created by this call.
    async fn ensure_index(&self) -> Result<bool>;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<()>;
}

/// Elasticsearch-backed store speaking the REST API via reqwest.
pub struct EsStore {
    client: reqwest::Client,
    base_url: String,
    index: String,
    auth: Option<(String, String)>,
}

impl EsStore {
    pub fn new(config: &ElasticsearchConfig) -> Self {
        let auth = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };
        EsStore {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            auth,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some((user, pass)) = &self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }
        builder
    }

    async fn check_status(response: reqwest::Response, context: &str) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(AnalysisError::Store(format!(
                "{} failed with status {}: {}",
                context, status, body
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl DocumentStore for EsStore {
    async fn search(
        &self,
        query: &Value,
        source_fields: &[&str],
        size: usize,
    ) -> Result<SearchResults> {
        let body = json!({
            "query": query,
            "_source": source_fields,
            "size": size,
        });
        debug!(index = %self.index, %body, "Executing search");

        let response = self
            .request(reqwest::Method::POST, &format!("{}/_search", self.index))
            .json(&body)
            .send()
            .await?;
        let result = Self::check_status(response, "search").await?;

        let total = result["hits"]["total"]["value"].as_u64().unwrap_or(0) as usize;
        let hits = result["hits"]["hits"]
            .as_array()
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| {
                        let id = hit["_id"].as_str()?.to_string();
                        Some(SearchHit {
                            id,
                            source: hit["_source"].clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(SearchResults { hits, total })
    }

    async fn update(&self, id: &str, partial_doc: &Value) -> Result<()> {
        let body = json!({ "doc": partial_doc });
        let path = format!("{}/_update/{}", self.index, urlencoding::encode(id));

        let response = self
            .request(reqwest::Method::POST, &path)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response, "update").await?;
        Ok(())
    }

    async fn index(&self, doc: &Value) -> Result<String> {
        let response = self
            .request(reqwest::Method::POST, &format!("{}/_doc", self.index))
            .json(doc)
            .send()
            .await?;
        let result = Self::check_status(response, "index").await?;

        result["_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AnalysisError::Store("index response had no _id".to_string()))
    }

    async fn ensure_index(&self) -> Result<bool> {
        let response = self
            .request(reqwest::Method::HEAD, &self.index)
            .send()
            .await?;
        if response.status().is_success() {
            info!(index = %self.index, "Index already exists");
            return Ok(false);
        }

        let mapping: Value = serde_json::from_str(TWEET_INDEX_MAPPING)?;
        let response = self
            .request(reqwest::Method::PUT, &self.index)
            .json(&mapping)
            .send()
            .await?;
        Self::check_status(response, "index creation").await?;
        info!(index = %self.index, "Index created");
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        let response = self.request(reqwest::Method::GET, "").send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AnalysisError::Connectivity(format!(
                "Elasticsearch at {} answered {}",
                self.base_url,
                response.status()
            )))
        }
    }
}
