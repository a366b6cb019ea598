use super::types::GateError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Whether the pipeline may repeat the failed step on its own.
    pub retryable: bool,
}

impl GateError {
    /// Classify this error to determine its type and whether the pipeline
    /// may retry it without involving the user.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Locally retryable: the browser has not populated the TLS status yet
            GateError::NativeStatusNotReady(_) => ErrorClassification {
                error_type: "NativeStatusNotReady",
                retryable: true,
            },

            // Transport failures are surfaced to the user, never retried here
            GateError::Endpoint(_) => ErrorClassification {
                error_type: "EndpointError",
                retryable: false,
            },
            GateError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: false,
            },
            GateError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: false,
            },
            GateError::Protocol(_) => ErrorClassification {
                error_type: "ProtocolError",
                retryable: false,
            },

            GateError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            GateError::Certificate(_) => ErrorClassification {
                error_type: "CertificateError",
                retryable: false,
            },
            GateError::InvalidUrl(_) => ErrorClassification {
                error_type: "InvalidUrlError",
                retryable: false,
            },
            GateError::InvalidAction(_) => ErrorClassification {
                error_type: "InvalidActionError",
                retryable: false,
            },
            GateError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            GateError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            GateError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            GateError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }

    /// True for every failure that means "no verdict could be obtained from
    /// the trust service". Callers treat all of them alike.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GateError::Endpoint(_)
                | GateError::Network(_)
                | GateError::Timeout(_)
                | GateError::Protocol(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_not_ready_is_retryable() {
        let err = GateError::NativeStatusNotReady("no security info".into());
        let class = err.classify();
        assert!(class.retryable);
        assert_eq!(class.error_type, "NativeStatusNotReady");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_errors_not_retryable() {
        for err in [
            GateError::Endpoint("bad port".into()),
            GateError::Network("connection refused".into()),
            GateError::Timeout("timed out".into()),
            GateError::Protocol("not json".into()),
        ] {
            assert!(err.is_transport(), "{err} should be transport");
            assert!(!err.classify().retryable);
        }
    }

    #[test]
    fn test_config_error_not_transport() {
        let err = GateError::Config("invalid config".into());
        assert!(!err.is_transport());
        assert_eq!(err.classify().error_type, "ConfigError");
    }

    #[test]
    fn test_invalid_action_not_retryable() {
        let err = GateError::InvalidAction("force-visit".into());
        assert!(!err.classify().retryable);
    }
}
