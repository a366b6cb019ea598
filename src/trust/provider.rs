use async_trait::async_trait;
use std::time::Duration;
use crate::errors::GateError;
use crate::models::{CertificateChain, TrustRequest, TrustResponse};

#[async_trait]
pub trait TrustService: Send + Sync {
    /// Send one request and decode the verdict.
    ///
    /// Every failure to obtain a verdict is an error for which
    /// `GateError::is_transport` holds. Implementations never retry.
    async fn validate(
        &self,
        request: &TrustRequest,
        timeout: Duration,
    ) -> Result<TrustResponse, GateError>;

    /// Advisory lookup that does not gate any navigation.
    async fn recommend(
        &self,
        url: &str,
        chain: CertificateChain,
        timeout: Duration,
    ) -> Result<TrustResponse, GateError> {
        let request = TrustRequest::recommendation(url, chain);
        self.validate(&request, timeout).await
    }

    /// Service name for logging
    fn service_name(&self) -> &str;
}
