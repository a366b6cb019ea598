use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::errors::{GateError, RetryConfig};
use crate::models::SecurityLevel;

pub const DEFAULT_SERVICE_HOST: &str = "http://localhost";
pub const DEFAULT_SERVICE_PORT: u16 = 8090;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GateConfig {
    pub service: Option<ServiceConfig>,
    pub security_level: Option<SecurityLevel>,
    pub native_status: Option<NativeStatusConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServiceConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_ms: Option<u64>,
}

/// Bounded wait for the browser to populate a navigation's TLS status.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NativeStatusConfig {
    pub retry_delay_ms: Option<u64>,
    pub max_attempts: Option<u32>,
}

impl GateConfig {
    pub fn endpoint(&self) -> Endpoint {
        let service = self.service.clone().unwrap_or_default();
        Endpoint {
            host: service.host.unwrap_or_else(|| DEFAULT_SERVICE_HOST.to_string()),
            port: service.port.unwrap_or(DEFAULT_SERVICE_PORT),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        let ms = self.service.as_ref()
            .and_then(|s| s.timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security_level.unwrap_or_default()
    }

    pub fn native_retry(&self) -> RetryConfig {
        let native = self.native_status.clone().unwrap_or_default();
        RetryConfig {
            max_attempts: native.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            delay: Duration::from_millis(native.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
        }
    }
}

/// Address of the trust service as stored in the user's settings.
///
/// `host` may carry a scheme (`https://tms.local`); plain HTTP is assumed
/// when it does not.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    pub fn url(&self) -> Result<reqwest::Url, GateError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(GateError::Endpoint("service host is empty".into()));
        }
        if self.port == 0 {
            return Err(GateError::Endpoint("service port is 0".into()));
        }

        let base = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        let mut url = reqwest::Url::parse(&base)
            .map_err(|e| GateError::Endpoint(format!("'{}': {}", self.host, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GateError::Endpoint(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(GateError::Endpoint(format!("'{}' has no host", self.host)));
        }
        url.set_port(Some(self.port))
            .map_err(|_| GateError::Endpoint(format!("'{}' cannot carry a port", self.host)))?;
        Ok(url)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
