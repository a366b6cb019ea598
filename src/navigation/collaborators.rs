use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::errors::GateError;
use crate::models::{CertificateChain, NativeVerdict, ResultDetail, WarningKind};

/// Stable handle of one in-flight navigation, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The navigation being gated, as handed to the certificate provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub op: OperationId,
    pub url: String,
}

impl Navigation {
    pub fn new(op: OperationId, url: impl Into<String>) -> Self {
        Self { op, url: url.into() }
    }

    /// Whether the target is reached over TLS.
    pub fn is_secure(&self) -> bool {
        reqwest::Url::parse(&self.url)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false)
    }
}

/// Access to the browser's TLS state for a navigation.
pub trait CertificateProvider: Send + Sync {
    /// The browser's own verdict. Fails with `GateError::NativeStatusNotReady`
    /// while the browser has not populated the security status yet.
    fn validation_result(&self, nav: &Navigation) -> Result<NativeVerdict, GateError>;

    /// DER chain of the connection, root first.
    fn chain(&self, nav: &Navigation) -> Result<CertificateChain, GateError>;
}

/// The host's loading mechanism.
pub trait NavigationController: Send + Sync {
    fn suspend(&self, op: OperationId);
    /// Must tolerate operations the host already finished or dropped.
    fn resume(&self, op: OperationId);
    /// Issue a fresh navigation to `url`.
    fn reload(&self, url: &str);
}

/// Renders interstitial warning pages.
pub trait WarningPresenter: Send + Sync {
    fn show(&self, kind: WarningKind, url: &str, detail: ResultDetail);
}
