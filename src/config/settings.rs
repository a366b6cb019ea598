use std::sync::RwLock;
use super::types::{Endpoint, GateConfig};
use crate::models::SecurityLevel;

/// User settings the pipeline reads at request time.
pub trait SettingsStore: Send + Sync {
    fn endpoint(&self) -> Endpoint;
    fn security_level(&self) -> SecurityLevel;
}

/// In-process settings seeded from the config file and editable for the
/// rest of the session.
pub struct SessionSettings {
    endpoint: RwLock<Endpoint>,
    security_level: RwLock<SecurityLevel>,
}

impl SessionSettings {
    pub fn new(endpoint: Endpoint, security_level: SecurityLevel) -> Self {
        Self {
            endpoint: RwLock::new(endpoint),
            security_level: RwLock::new(security_level),
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.endpoint(), config.security_level())
    }

    pub fn set_endpoint(&self, endpoint: Endpoint) {
        *self.endpoint.write().unwrap_or_else(|e| e.into_inner()) = endpoint;
    }

    pub fn set_security_level(&self, level: SecurityLevel) {
        *self.security_level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }
}

impl SettingsStore for SessionSettings {
    fn endpoint(&self) -> Endpoint {
        self.endpoint.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn security_level(&self) -> SecurityLevel {
        *self.security_level.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let config: GateConfig = serde_yaml::from_str(
            "service:\n  host: tms.local\n  port: 9000\nsecurity_level: low\n"
        ).unwrap();
        let settings = SessionSettings::from_config(&config);
        assert_eq!(settings.endpoint(), Endpoint::new("tms.local", 9000));
        assert_eq!(settings.security_level(), SecurityLevel::Low);
    }

    #[test]
    fn test_security_level_change_is_visible() {
        let settings = SessionSettings::new(Endpoint::new("localhost", 8090), SecurityLevel::Medium);
        settings.set_security_level(SecurityLevel::High);
        assert_eq!(settings.security_level(), SecurityLevel::High);
        settings.set_endpoint(Endpoint::new("localhost", 9001));
        assert_eq!(settings.endpoint().port, 9001);
    }
}
