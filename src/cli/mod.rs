pub mod commands;
pub mod check;
pub mod recommend;
pub mod stub;

pub use commands::{Cli, Commands};

use std::path::Path;
use crate::config::{self, GateConfig};
use crate::errors::GateError;
use crate::models::{decode_certificate_file, CertificateChain};

/// Load the config file if one was given, defaults otherwise.
pub async fn load_config(path: Option<&str>) -> Result<GateConfig, GateError> {
    match path {
        Some(path) => config::parse_config(Path::new(path)).await,
        None => Ok(GateConfig::default()),
    }
}

/// Read certificate files given root first into one chain.
pub async fn load_chain(paths: &[String]) -> Result<CertificateChain, GateError> {
    let mut entries = Vec::new();
    for path in paths {
        let bytes = tokio::fs::read(path).await
            .map_err(|e| GateError::Certificate(format!("{}: {}", path, e)))?;
        entries.extend(decode_certificate_file(&bytes)
            .map_err(|e| GateError::Certificate(format!("{}: {}", path, e)))?);
    }
    Ok(CertificateChain::from_root_first(entries))
}
