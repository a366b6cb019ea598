use serde::{Deserialize, Serialize};
use super::chain::CertificateChain;
use super::verdict::{NativeVerdict, ResultDetail, SecurityLevel, TrustResult};

/// How the trust service is asked to treat a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    #[default]
    Validate,
    /// Validate while treating the end certificate as trusted.
    ValidateTrustEndCertificate,
    /// Advisory only, never gates a navigation.
    RetrieveRecommendation,
}

impl RequestMode {
    /// Gating mode for a host, given its trust-if-uncertain override.
    pub fn for_host(trust_if_uncertain: bool) -> Self {
        if trust_if_uncertain {
            Self::ValidateTrustEndCertificate
        } else {
            Self::Validate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::ValidateTrustEndCertificate => "validate-trust-end-certificate",
            Self::RetrieveRecommendation => "retrieve-recommendation",
        }
    }
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a POST to the trust service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustRequest {
    pub url: String,
    #[serde(rename = "certChain")]
    pub chain: CertificateChain,
    #[serde(rename = "validationResult", default, skip_serializing_if = "Option::is_none")]
    pub native_verdict: Option<NativeVerdict>,
    #[serde(rename = "secLevel", default, skip_serializing_if = "Option::is_none")]
    pub security_level: Option<SecurityLevel>,
    #[serde(rename = "validationSpec", default)]
    pub mode: RequestMode,
}

impl TrustRequest {
    pub fn validation(
        url: impl Into<String>,
        chain: CertificateChain,
        native_verdict: NativeVerdict,
        security_level: SecurityLevel,
        mode: RequestMode,
    ) -> Self {
        Self {
            url: url.into(),
            chain,
            native_verdict: Some(native_verdict),
            security_level: Some(security_level),
            mode,
        }
    }

    /// Advisory request. Carries no native verdict or security level.
    pub fn recommendation(url: impl Into<String>, chain: CertificateChain) -> Self {
        Self {
            url: url.into(),
            chain,
            native_verdict: None,
            security_level: None,
            mode: RequestMode::RetrieveRecommendation,
        }
    }
}

/// Decoded answer of the trust service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireResponse", into = "WireResponse")]
pub struct TrustResponse {
    pub result: TrustResult,
    /// Only meaningful when `result` is not `Trusted`.
    pub detail: ResultDetail,
}

impl TrustResponse {
    pub fn new(result: TrustResult, detail: ResultDetail) -> Self {
        Self { result, detail }
    }

    pub fn trusted() -> Self {
        Self::new(TrustResult::Trusted, ResultDetail::None)
    }
}

#[derive(Serialize, Deserialize)]
struct WireResponse {
    result: TrustResult,
    #[serde(rename = "resultSpec", default, skip_serializing_if = "Option::is_none")]
    result_spec: Option<String>,
}

impl From<WireResponse> for TrustResponse {
    fn from(wire: WireResponse) -> Self {
        Self {
            result: wire.result,
            detail: ResultDetail::from_result_spec(wire.result_spec.as_deref()),
        }
    }
}

impl From<TrustResponse> for WireResponse {
    fn from(response: TrustResponse) -> Self {
        Self {
            result: response.result,
            result_spec: response.detail.result_spec().map(str::to_string),
        }
    }
}
