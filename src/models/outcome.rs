use serde::{Deserialize, Serialize};
use super::request::TrustResponse;
use super::verdict::{ResultDetail, TrustResult};

/// What happens to a navigation once it has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "kebab-case")]
pub enum Outcome {
    Proceed,
    WarnUnreachable,
    WarnUntrusted(ResultDetail),
    WarnUnknown(ResultDetail),
}

impl Outcome {
    /// Outcome of a completed trust service round trip. Any failure to obtain
    /// a verdict is `WarnUnreachable`.
    pub fn from_verdict<E>(verdict: &Result<TrustResponse, E>) -> Self {
        match verdict {
            Err(_) => Self::WarnUnreachable,
            Ok(resp) => match resp.result {
                TrustResult::Trusted => Self::Proceed,
                TrustResult::Untrusted => Self::WarnUntrusted(resp.detail),
                TrustResult::Unknown => Self::WarnUnknown(resp.detail),
            },
        }
    }

    /// Interstitial to display, if any.
    pub fn warning_kind(&self) -> Option<WarningKind> {
        match self {
            Self::Proceed => None,
            Self::WarnUnreachable => Some(WarningKind::Unreachable),
            Self::WarnUntrusted(_) => Some(WarningKind::Untrusted),
            Self::WarnUnknown(_) => Some(WarningKind::Unknown),
        }
    }

    pub fn detail(&self) -> ResultDetail {
        match self {
            Self::WarnUntrusted(detail) | Self::WarnUnknown(detail) => *detail,
            Self::Proceed | Self::WarnUnreachable => ResultDetail::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proceed => "proceed",
            Self::WarnUnreachable => "warn-unreachable",
            Self::WarnUntrusted(_) => "warn-untrusted",
            Self::WarnUnknown(_) => "warn-unknown",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            ResultDetail::None => f.write_str(self.as_str()),
            detail => write!(f, "{}({})", self.as_str(), detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Unreachable,
    Untrusted,
    Unknown,
}

/// Buttons a warning page can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserAction {
    TryAgain,
    /// Skip validation for the host for the rest of the session.
    ForceVisit,
    /// Accept the host's uncertain certificate from now on.
    TrustAndRevisit,
}

impl WarningKind {
    pub fn actions(&self) -> &'static [UserAction] {
        match self {
            Self::Unreachable => &[UserAction::TryAgain],
            Self::Untrusted => &[UserAction::TryAgain, UserAction::ForceVisit],
            Self::Unknown => &[UserAction::TryAgain, UserAction::TrustAndRevisit],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreachable => "unreachable",
            Self::Untrusted => "untrusted",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UserAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TryAgain => "try-again",
            Self::ForceVisit => "force-visit",
            Self::TrustAndRevisit => "trust-and-revisit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_verdicts() {
        let unreachable: Result<TrustResponse, ()> = Err(());
        assert_eq!(Outcome::from_verdict(&unreachable), Outcome::WarnUnreachable);

        let trusted: Result<_, ()> = Ok(TrustResponse::new(TrustResult::Trusted, ResultDetail::FirstSeen));
        assert_eq!(Outcome::from_verdict(&trusted), Outcome::Proceed);

        let untrusted: Result<_, ()> = Ok(TrustResponse::new(TrustResult::Untrusted, ResultDetail::Revoked));
        assert_eq!(Outcome::from_verdict(&untrusted), Outcome::WarnUntrusted(ResultDetail::Revoked));

        let unknown: Result<_, ()> = Ok(TrustResponse::new(TrustResult::Unknown, ResultDetail::FirstSeen));
        assert_eq!(Outcome::from_verdict(&unknown), Outcome::WarnUnknown(ResultDetail::FirstSeen));
    }

    #[test]
    fn test_warning_actions() {
        assert_eq!(WarningKind::Unreachable.actions(), &[UserAction::TryAgain]);
        assert!(WarningKind::Untrusted.actions().contains(&UserAction::ForceVisit));
        assert!(!WarningKind::Untrusted.actions().contains(&UserAction::TrustAndRevisit));
        assert!(WarningKind::Unknown.actions().contains(&UserAction::TrustAndRevisit));
        assert!(!WarningKind::Unknown.actions().contains(&UserAction::ForceVisit));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Proceed.to_string(), "proceed");
        assert_eq!(Outcome::WarnUntrusted(ResultDetail::Revoked).to_string(), "warn-untrusted(revoked)");
        assert_eq!(Outcome::WarnUnknown(ResultDetail::None).to_string(), "warn-unknown");
    }

    #[test]
    fn test_proceed_has_no_warning() {
        assert_eq!(Outcome::Proceed.warning_kind(), None);
        assert_eq!(Outcome::WarnUnreachable.warning_kind(), Some(WarningKind::Unreachable));
    }
}
