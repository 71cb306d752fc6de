use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{EnrichmentError, InteractionEnricher};
use crate::config::EnrichmentConfig;
use crate::knowledge::InteractionRecord;

/// Blocking HTTP client for a remote interaction provider.
///
/// Sends `POST {url}` with `{"drugs": [...]}` and a bearer token, and expects
/// `{"interactions": [...]}` in the knowledge-base record shape.
pub struct HttpEnricher {
    url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct EnrichRequest<'a> {
    drugs: &'a [String],
}

#[derive(Deserialize)]
struct EnrichResponse {
    #[serde(default)]
    interactions: Vec<InteractionRecord>,
}

impl HttpEnricher {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EnrichmentError::Http(e.to_string()))?;

        Ok(Self {
            url: config.url.trim().to_string(),
            api_key: config.api_key.trim().to_string(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl InteractionEnricher for HttpEnricher {
    fn is_available(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }

    fn enrich_interactions(
        &self,
        drugs: &[String],
    ) -> Result<Vec<InteractionRecord>, EnrichmentError> {
        if drugs.len() < 2 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&EnrichRequest { drugs })
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    EnrichmentError::Connection(self.url.clone())
                } else if e.is_timeout() {
                    EnrichmentError::Http(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    EnrichmentError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EnrichResponse = response
            .json()
            .map_err(|e| EnrichmentError::ResponseParsing(e.to_string()))?;

        tracing::debug!(
            count = parsed.interactions.len(),
            "Enrichment provider returned interactions"
        );

        Ok(parsed.interactions)
    }
}
