use std::path::Path;
use crate::errors::GateError;
use super::types::GateConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;
const MAX_RETRY_DELAY_MS: u64 = 60_000;

pub async fn parse_config(path: &Path) -> Result<GateConfig, GateError> {
    if !path.exists() {
        return Err(GateError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(GateError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<GateConfig, GateError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    // An empty file means "all defaults"
    if yaml.is_null() {
        return Ok(GateConfig::default());
    }

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: GateConfig = serde_yaml::from_value(yaml)?;

    // Semantic checks
    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), GateError> {
    // Convert YAML value to JSON for schema validation
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| GateError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| GateError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory: typed parsing and semantic checks have the final word
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that deserialize fine but can never work.
fn validate_conflicts(config: &GateConfig) -> Result<(), GateError> {
    if let Some(service) = &config.service {
        if let Some(host) = &service.host {
            if host.trim().is_empty() {
                return Err(GateError::Config("service.host must not be empty".into()));
            }
        }
        if service.port == Some(0) {
            return Err(GateError::Config("service.port must not be 0".into()));
        }
        if service.timeout_ms == Some(0) {
            return Err(GateError::Config("service.timeout_ms must not be 0".into()));
        }
    }

    // The endpoint must be usable as configured
    config.endpoint().url()
        .map_err(|e| GateError::Config(e.to_string()))?;

    if let Some(native) = &config.native_status {
        if native.max_attempts == Some(0) {
            return Err(GateError::Config("native_status.max_attempts must be at least 1".into()));
        }
        if let Some(delay) = native.retry_delay_ms {
            if delay == 0 || delay > MAX_RETRY_DELAY_MS {
                return Err(GateError::Config(format!(
                    "native_status.retry_delay_ms must be between 1 and {}", MAX_RETRY_DELAY_MS
                )));
            }
        }
        let retry = config.native_retry();
        if retry.max_wait().as_secs() >= 10 {
            warn!(
                max_wait_ms = retry.max_wait().as_millis() as u64,
                "Native status wait is long; navigations may stall before failing open"
            );
        }
    }

    Ok(())
}
