//! Access to the prediction backend: liveness probe and prediction request.

use std::future::Future;

use tracing::{debug, warn};

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::types::{ApiErrorBody, FormState, PredictionResult};

/// The two calls a submission makes against the backend.
pub trait PredictionApi {
    /// `GET /health`; any 2xx counts as live, the body is ignored.
    fn health(&self) -> impl Future<Output = ClientResult<()>> + Send;

    /// `POST /predict` with the whole form as JSON.
    fn predict(&self, form: &FormState) -> impl Future<Output = ClientResult<PredictionResult>> + Send;
}

/// [`PredictionApi`] over HTTP. No retries; timeouts are the transport's.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl PredictionApi for HttpPredictionClient {
    async fn health(&self) -> ClientResult<()> {
        let url = self.endpoint("health");
        debug!("probing {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("health probe failed: {}", e);
            ClientError::BackendUnavailable {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("health probe returned {}", status);
            return Err(ClientError::BackendUnavailable {
                reason: format!("health check returned status {}", status.as_u16()),
            });
        }
        Ok(())
    }

    async fn predict(&self, form: &FormState) -> ClientResult<PredictionResult> {
        let url = self.endpoint("predict");
        debug!("posting form to {}", url);

        let response = self
            .http
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| ClientError::unknown(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Body is optional; anything that doesn't parse falls back to the status.
            let body = response.text().await.unwrap_or_default();
            let server_message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!("predict returned {} (server error: {:?})", status, server_message);
            return Err(ClientError::prediction_request(status.as_u16(), server_message));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| ClientError::unknown(e.to_string()))
    }
}
