use serde::{Deserialize, Serialize};
use crate::models::{Outcome, RequestMode};
use super::collaborators::OperationId;

/// Lifecycle of one gated navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationState {
    Idle,
    AwaitingNativeStatus,
    Skipped,
    Gating,
    AwaitingRemoteVerdict,
    Resolved,
}

impl std::fmt::Display for NavigationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingNativeStatus => write!(f, "awaiting-native-status"),
            Self::Skipped => write!(f, "skipped"),
            Self::Gating => write!(f, "gating"),
            Self::AwaitingRemoteVerdict => write!(f, "awaiting-remote-verdict"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    InsecureScheme,
    Exempt,
}

/// Which branch of the pipeline decided a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", content = "reason", rename_all = "kebab-case")]
pub enum ResolutionPath {
    Skipped(SkipReason),
    /// The browser already rejected the certificate.
    NativeRejected,
    /// The native status never became readable; failed open.
    NativeStatusUnavailable,
    /// The chain could not be read; failed open.
    ChainUnavailable,
    /// The trust service was consulted in the given mode.
    Remote(RequestMode),
    /// The host cancelled the navigation before a decision was applied.
    Cancelled,
}

/// Final record of a navigation, published once it leaves the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub op: OperationId,
    pub url: String,
    /// `None` when the navigation was cancelled.
    pub outcome: Option<Outcome>,
    pub path: ResolutionPath,
}

impl ResolutionPath {
    /// State the navigation was in when this path decided it.
    pub fn decided_in(&self) -> NavigationState {
        match self {
            Self::Skipped(_) => NavigationState::Skipped,
            Self::NativeStatusUnavailable => NavigationState::AwaitingNativeStatus,
            Self::NativeRejected => NavigationState::Gating,
            Self::ChainUnavailable | Self::Remote(_) | Self::Cancelled => NavigationState::AwaitingRemoteVerdict,
        }
    }
}

impl Resolution {
    pub fn consulted_service(&self) -> bool {
        matches!(self.path, ResolutionPath::Remote(_))
    }
}
