//! Turns outcomes into warning pages and applies the user's answer to them.

use std::sync::Arc;
use tracing::{debug, info};
use crate::errors::GateError;
use crate::models::{Outcome, UserAction, WarningKind};
use crate::navigation::{NavigationController, WarningPresenter};
use crate::overrides::OverrideStore;

pub struct DecisionRouter {
    presenter: Arc<dyn WarningPresenter>,
    navigation: Arc<dyn NavigationController>,
    overrides: Arc<OverrideStore>,
}

impl DecisionRouter {
    pub fn new(
        presenter: Arc<dyn WarningPresenter>,
        navigation: Arc<dyn NavigationController>,
        overrides: Arc<OverrideStore>,
    ) -> Self {
        Self { presenter, navigation, overrides }
    }

    /// Show the interstitial for `outcome`, if it has one. Never touches the
    /// override store.
    pub fn route(&self, outcome: Outcome, url: &str) {
        let Some(kind) = outcome.warning_kind() else {
            debug!(url, "Proceeding without warning");
            return;
        };
        info!(url, kind = kind.as_str(), detail = %outcome.detail(), "Showing warning page");
        self.presenter.show(kind, url, outcome.detail());
    }

    /// Apply a button press from a `kind` warning page shown for `url`.
    ///
    /// Rejects actions the page does not offer.
    pub fn handle_action(&self, kind: WarningKind, action: UserAction, url: &str) -> Result<(), GateError> {
        if !kind.actions().contains(&action) {
            return Err(GateError::InvalidAction(format!(
                "{} is not offered on the {} page", action.as_str(), kind
            )));
        }

        info!(url, kind = kind.as_str(), action = action.as_str(), "User action on warning page");
        match action {
            UserAction::TryAgain => {}
            UserAction::ForceVisit => self.overrides.exempt(url),
            UserAction::TrustAndRevisit => self.overrides.mark_trust_if_uncertain(url),
        }
        self.navigation.reload(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::models::ResultDetail;
    use crate::navigation::OperationId;

    #[derive(Default)]
    struct Host {
        shown: Mutex<Vec<(WarningKind, String, ResultDetail)>>,
        reloads: Mutex<Vec<String>>,
    }

    impl WarningPresenter for Host {
        fn show(&self, kind: WarningKind, url: &str, detail: ResultDetail) {
            self.shown.lock().unwrap().push((kind, url.to_string(), detail));
        }
    }

    impl NavigationController for Host {
        fn suspend(&self, _op: OperationId) {}
        fn resume(&self, _op: OperationId) {}
        fn reload(&self, url: &str) {
            self.reloads.lock().unwrap().push(url.to_string());
        }
    }

    fn router() -> (DecisionRouter, Arc<Host>, Arc<OverrideStore>) {
        let host = Arc::new(Host::default());
        let overrides = Arc::new(OverrideStore::new());
        let router = DecisionRouter::new(host.clone(), host.clone(), overrides.clone());
        (router, host, overrides)
    }

    #[test]
    fn test_proceed_shows_nothing() {
        let (router, host, _) = router();
        router.route(Outcome::Proceed, "https://a.example/");
        assert!(host.shown.lock().unwrap().is_empty());
    }

    #[test]
    fn test_untrusted_page_carries_detail() {
        let (router, host, overrides) = router();
        router.route(Outcome::WarnUntrusted(ResultDetail::Revoked), "https://a.example/");
        assert_eq!(
            *host.shown.lock().unwrap(),
            vec![(WarningKind::Untrusted, "https://a.example/".to_string(), ResultDetail::Revoked)]
        );
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_try_again_reloads_without_override() {
        let (router, host, overrides) = router();
        router.handle_action(WarningKind::Unreachable, UserAction::TryAgain, "https://a.example/x").unwrap();
        assert_eq!(*host.reloads.lock().unwrap(), vec!["https://a.example/x"]);
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_force_visit_exempts_host() {
        let (router, host, overrides) = router();
        router.handle_action(WarningKind::Untrusted, UserAction::ForceVisit, "https://a.example/x").unwrap();
        assert!(overrides.is_exempt("a.example"));
        assert_eq!(host.reloads.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_trust_and_revisit_marks_host() {
        let (router, _, overrides) = router();
        router.handle_action(WarningKind::Unknown, UserAction::TrustAndRevisit, "https://a.example/").unwrap();
        assert!(overrides.wants_trust_if_uncertain("a.example"));
        assert!(!overrides.is_exempt("a.example"));
    }

    #[test]
    fn test_action_not_on_page_is_rejected() {
        let (router, host, overrides) = router();
        let err = router.handle_action(WarningKind::Unreachable, UserAction::ForceVisit, "https://a.example/");
        assert!(matches!(err, Err(GateError::InvalidAction(_))));
        let err = router.handle_action(WarningKind::Untrusted, UserAction::TrustAndRevisit, "https://a.example/");
        assert!(err.is_err());
        assert!(overrides.is_empty());
        assert!(host.reloads.lock().unwrap().is_empty());
    }
}
