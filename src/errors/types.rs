use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trust service endpoint: {0}")]
    Endpoint(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Malformed trust service response: {0}")]
    Protocol(String),

    #[error("Native TLS status not ready: {0}")]
    NativeStatusNotReady(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Action not offered by this warning: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
