// data_api.rs
use crate::domain::PipelineError;
use crate::source::{DocumentSource, Projection, RawRecord};
use rand::Rng;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const MAX_BACKOFF_SECS: u64 = 10;
const JITTER_MAX_MILLIS: u64 = 2000;

/// Connection settings for a Mongo Data-API style `find` endpoint.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    /// Base URL; `/action/find` is appended.
    pub base_url: String,
    pub api_key: String,
    pub data_source: String,
    pub database: String,
    pub collection: String,
    /// 1 means a single attempt.
    pub max_attempts: u32,
    pub timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    filter: Value,
    projection: Value,
}

#[derive(Deserialize)]
struct FindResponse {
    documents: Vec<RawRecord>,
}

pub struct DataApiSource {
    client: Client,
    config: DataApiConfig,
}

impl DataApiSource {
    pub fn new(config: DataApiConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn find_url(&self) -> String {
        format!("{}/action/find", self.config.base_url.trim_end_matches('/'))
    }

    fn try_fetch(&self, projection: &Projection) -> Result<Vec<RawRecord>, PipelineError> {
        let body = FindRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection: &self.config.collection,
            filter: Value::Object(Default::default()),
            projection: projection.to_document(),
        };

        let resp = self
            .client
            .post(self.find_url())
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(PipelineError::SourceUnavailable(format!(
                "Data API HTTP {status}: {text}"
            )));
        }

        parse_find_response(&text)
    }
}

fn parse_find_response(text: &str) -> Result<Vec<RawRecord>, PipelineError> {
    serde_json::from_str::<FindResponse>(text)
        .map(|r| r.documents)
        .map_err(|e| PipelineError::SourceUnavailable(format!("Malformed Data API response: {e}")))
}

impl DocumentSource for DataApiSource {
    fn fetch(&self, projection: &Projection) -> Result<Vec<RawRecord>, PipelineError> {
        let attempts = self.config.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let start = Instant::now();

            match self.try_fetch(projection) {
                Ok(docs) => {
                    info!(attempt, documents = docs.len(), elapsed = ?start.elapsed(), "fetched listings");
                    // The server applies the projection; re-apply so both sources agree.
                    return Ok(docs.iter().map(|d| projection.apply(d)).collect());
                }
                Err(e) => {
                    warn!(attempt, elapsed = ?start.elapsed(), error = %e, "fetch attempt failed");
                    last_err = Some(e);

                    if attempt < attempts {
                        let base = std::cmp::min(2 * u64::from(attempt), MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                        std::thread::sleep(
                            Duration::from_secs(base) + Duration::from_millis(jitter),
                        );
                    }
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| PipelineError::SourceUnavailable("fetch loop did not run".into())))
    }

    fn describe(&self) -> String {
        format!(
            "data-api:{}/{}.{}",
            self.config.base_url, self.config.database, self.config.collection
        )
    }
}
