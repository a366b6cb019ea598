use serde::{Deserialize, Serialize};

/// The browser's own TLS validation result for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeVerdict {
    Valid,
    Invalid,
    /// Broken or mixed security state.
    Unknown,
}

impl NativeVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NativeVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NativeVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            "unknown" | "broken" => Ok(Self::Unknown),
            other => Err(format!("unknown native verdict '{}'", other)),
        }
    }
}

/// User preference forwarded unmodified to the trust service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SecurityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown security level '{}'", other)),
        }
    }
}

/// Top-level verdict of the trust service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustResult {
    Trusted,
    Untrusted,
    Unknown,
}

impl TrustResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Untrusted => "untrusted",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for TrustResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trusted" => Ok(Self::Trusted),
            "untrusted" => Ok(Self::Untrusted),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown trust result '{}'", other)),
        }
    }
}

/// Why a non-trusted verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultDetail {
    /// First certificate ever seen for this host.
    #[serde(rename = "first-seen")]
    FirstSeen,
    /// A valid certificate from the same CA already exists for the host.
    #[serde(rename = "same-ca-valid")]
    SameCAValid,
    /// The previous certificate from the same CA has expired.
    #[serde(rename = "same-ca-expired")]
    SameCAExpired,
    /// The host previously presented a certificate from another CA.
    #[serde(rename = "different-ca")]
    DifferentCA,
    #[serde(rename = "revoked")]
    Revoked,
    #[default]
    #[serde(rename = "none")]
    None,
}

impl ResultDetail {
    /// Map a `resultSpec` wire value. Anything unrecognized is `None`.
    pub fn from_result_spec(spec: Option<&str>) -> Self {
        match spec {
            Some("validated-first-seen") => Self::FirstSeen,
            Some("validated-existing-valid-same-ca") => Self::SameCAValid,
            Some("validated-existing-expired-same-ca") => Self::SameCAExpired,
            Some("validated-existing") => Self::DifferentCA,
            Some("validated-revoked") => Self::Revoked,
            _ => Self::None,
        }
    }

    pub fn result_spec(&self) -> Option<&'static str> {
        match self {
            Self::FirstSeen => Some("validated-first-seen"),
            Self::SameCAValid => Some("validated-existing-valid-same-ca"),
            Self::SameCAExpired => Some("validated-existing-expired-same-ca"),
            Self::DifferentCA => Some("validated-existing"),
            Self::Revoked => Some("validated-revoked"),
            Self::None => None,
        }
    }

    /// Short label handed to warning pages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSeen => "first-seen",
            Self::SameCAValid => "same-ca-valid",
            Self::SameCAExpired => "same-ca-expired",
            Self::DifferentCA => "different-ca",
            Self::Revoked => "revoked",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for ResultDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResultDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-seen" => Ok(Self::FirstSeen),
            "same-ca-valid" => Ok(Self::SameCAValid),
            "same-ca-expired" => Ok(Self::SameCAExpired),
            "different-ca" => Ok(Self::DifferentCA),
            "revoked" => Ok(Self::Revoked),
            "none" => Ok(Self::None),
            other => Err(format!("unknown result detail '{}'", other)),
        }
    }
}
