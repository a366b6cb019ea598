use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use crate::config::SettingsStore;
use crate::errors::GateError;
use crate::models::{TrustRequest, TrustResponse};
use super::provider::TrustService;

/// JSON-over-HTTP client for the trust management service.
///
/// The endpoint is read from the settings on every call so that changes made
/// during the session take effect on the next navigation.
pub struct HttpTrustClient {
    client: Client,
    settings: Arc<dyn SettingsStore>,
}

impl HttpTrustClient {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Result<Self, GateError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GateError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl TrustService for HttpTrustClient {
    async fn validate(
        &self,
        request: &TrustRequest,
        timeout: Duration,
    ) -> Result<TrustResponse, GateError> {
        let endpoint = self.settings.endpoint().url()?;
        debug!(
            endpoint = %endpoint,
            url = %request.url,
            mode = %request.mode,
            chain_len = request.chain.len(),
            "Sending trust request"
        );

        let resp = self.client
            .post(endpoint.clone())
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GateError::Timeout(format!("Trust service did not answer within {:?}", timeout))
                } else {
                    GateError::Network(format!("Trust request to {} failed: {}", endpoint, e))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Trust service returned an error status");
            return Err(GateError::Network(format!("Trust service returned HTTP {}", status)));
        }

        let body = resp.bytes().await
            .map_err(|e| GateError::Network(format!("Failed to read trust response: {}", e)))?;

        let response: TrustResponse = serde_json::from_slice(&body)
            .map_err(|e| GateError::Protocol(format!(
                "{}: {}", e, String::from_utf8_lossy(&body).chars().take(200).collect::<String>()
            )))?;

        debug!(result = response.result.as_str(), detail = %response.detail, "Trust response decoded");
        Ok(response)
    }

    fn service_name(&self) -> &str { "http" }
}
