use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::consts::MODEL_ID_HEADER;

use super::{ClassificationTransport, TransportResponse};

/// Calls the Watson NLP EmotionPredict endpoint over HTTP.
pub struct WatsonTransport {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
}

impl WatsonTransport {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model_id: config.model_id.clone(),
        })
    }
}

#[async_trait]
impl ClassificationTransport for WatsonTransport {
    async fn send(&self, text: &str) -> Result<TransportResponse> {
        let body = PredictRequest {
            raw_document: RawDocument { text },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header(MODEL_ID_HEADER, &self.model_id)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .context("failed to read response body")?;

        debug!(status, bytes = body.len(), "upstream responded");

        Ok(TransportResponse { status, body })
    }
}

// --- API types ---

#[derive(Serialize)]
struct PredictRequest<'a> {
    raw_document: RawDocument<'a>,
}

#[derive(Serialize)]
struct RawDocument<'a> {
    text: &'a str,
}
