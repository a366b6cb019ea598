use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::config::{GateConfig, SettingsStore};
use crate::errors::{with_retry, GateError, RetryConfig};
use crate::models::{NativeVerdict, Outcome, RequestMode, TrustRequest};
use crate::overrides::OverrideStore;
use crate::router::DecisionRouter;
use crate::trust::TrustService;
use super::collaborators::*;
use super::events::NavigationEvent;
use super::handle::SuspendedNavigation;
use super::state::*;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub native_retry: RetryConfig,
    pub request_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for OrchestratorConfig {
    fn from(config: &GateConfig) -> Self {
        Self {
            native_retry: config.native_retry(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// The host-side services the gate drives.
pub struct Collaborators {
    pub certificates: Arc<dyn CertificateProvider>,
    pub settings: Arc<dyn SettingsStore>,
    pub trust: Arc<dyn TrustService>,
    pub navigation: Arc<dyn NavigationController>,
    pub presenter: Arc<dyn WarningPresenter>,
}

struct InFlight {
    handle: Arc<SuspendedNavigation>,
    cancel: CancellationToken,
}

/// Gates every navigation on the trust service's verdict.
pub struct ValidationOrchestrator {
    config: OrchestratorConfig,
    overrides: Arc<OverrideStore>,
    certificates: Arc<dyn CertificateProvider>,
    settings: Arc<dyn SettingsStore>,
    trust: Arc<dyn TrustService>,
    navigation: Arc<dyn NavigationController>,
    router: Arc<DecisionRouter>,
    in_flight: DashMap<OperationId, InFlight>,
    decision_tx: Option<mpsc::UnboundedSender<Resolution>>,
}

impl ValidationOrchestrator {
    pub fn new(
        collaborators: Collaborators,
        overrides: Arc<OverrideStore>,
        config: OrchestratorConfig,
    ) -> Self {
        let router = Arc::new(DecisionRouter::new(
            collaborators.presenter,
            collaborators.navigation.clone(),
            overrides.clone(),
        ));
        Self {
            config,
            overrides,
            certificates: collaborators.certificates,
            settings: collaborators.settings,
            trust: collaborators.trust,
            navigation: collaborators.navigation,
            router,
            in_flight: DashMap::new(),
            decision_tx: None,
        }
    }

    /// Publish every resolution on `tx`.
    pub fn with_decision_channel(mut self, tx: mpsc::UnboundedSender<Resolution>) -> Self {
        self.decision_tx = Some(tx);
        self
    }

    pub fn router(&self) -> &Arc<DecisionRouter> {
        &self.router
    }

    pub fn overrides(&self) -> &Arc<OverrideStore> {
        &self.overrides
    }

    /// Consume host events until every sender is dropped, then wait for the
    /// navigations still in flight.
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<NavigationEvent>) {
        let mut tasks = JoinSet::new();

        while let Some(event) = events.recv().await {
            match event {
                NavigationEvent::Started { op, url } => {
                    // Pause first: the page must not render before a decision
                    let handle = Arc::new(self.begin(op));
                    let cancel = CancellationToken::new();
                    let entry = InFlight { handle: handle.clone(), cancel: cancel.clone() };
                    if self.in_flight.insert(op, entry).is_some() {
                        warn!(op = %op, "Operation id reused while still in flight");
                    }

                    let this = self.clone();
                    let owned = handle.clone();
                    tasks.spawn(async move {
                        let nav = Navigation::new(op, url);
                        this.process(nav, handle, cancel).await;
                        // A reused id may already belong to a newer navigation
                        this.in_flight.remove_if(&op, |_, entry| Arc::ptr_eq(&entry.handle, &owned));
                    });
                }
                NavigationEvent::Cancelled { op } => {
                    if let Some((_, entry)) = self.in_flight.remove(&op) {
                        entry.handle.abandon();
                        entry.cancel.cancel();
                        debug!(op = %op, "Navigation cancelled by host");
                    }
                }
                NavigationEvent::UserAction { kind, action, url } => {
                    if let Err(e) = self.router.handle_action(kind, action, &url) {
                        warn!(error = %e, "Ignoring user action");
                    }
                }
            }

            // Reap finished tasks without blocking the event loop
            while tasks.try_join_next().is_some() {}
        }

        while tasks.join_next().await.is_some() {}
        debug!("Navigation event stream closed");
    }

    /// Suspend the host operation. Must be called on the dispatch path,
    /// before any other work for the navigation.
    pub fn begin(&self, op: OperationId) -> SuspendedNavigation {
        debug!(op = %op, from = %NavigationState::Idle, to = %NavigationState::AwaitingNativeStatus, "Transition");
        SuspendedNavigation::suspend(op, self.navigation.clone())
    }

    /// Suspend and gate one navigation to completion.
    pub async fn navigate(&self, op: OperationId, url: impl Into<String>) -> Resolution {
        let handle = Arc::new(self.begin(op));
        self.process(Navigation::new(op, url), handle, CancellationToken::new()).await
    }

    /// Drive a suspended navigation to its resolution.
    pub async fn process(
        &self,
        nav: Navigation,
        handle: Arc<SuspendedNavigation>,
        cancel: CancellationToken,
    ) -> Resolution {
        if !nav.is_secure() {
            self.transition(&nav, NavigationState::AwaitingNativeStatus, NavigationState::Skipped);
            return self.resolve(nav, &handle, Outcome::Proceed, ResolutionPath::Skipped(SkipReason::InsecureScheme));
        }
        if self.overrides.is_exempt(&nav.url) {
            self.transition(&nav, NavigationState::AwaitingNativeStatus, NavigationState::Skipped);
            return self.resolve(nav, &handle, Outcome::Proceed, ResolutionPath::Skipped(SkipReason::Exempt));
        }

        // The browser fills in the TLS status after the navigation event
        let certificates = &self.certificates;
        let target = &nav;
        let native = tokio::select! {
            biased;
            _ = cancel.cancelled() => return self.cancelled(&nav, &handle),
            r = with_retry("native_status", &self.config.native_retry, || async move {
                // Any failed read counts as not ready yet, within the bound
                certificates.validation_result(target).map_err(|e| match e {
                    GateError::NativeStatusNotReady(_) => e,
                    other => GateError::NativeStatusNotReady(other.to_string()),
                })
            }) => r,
        };

        let native = match native {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    op = %nav.op,
                    url = %nav.url,
                    error = %e,
                    max_wait_ms = self.config.native_retry.max_wait().as_millis() as u64,
                    "Native TLS status unavailable, continuing without validation"
                );
                return self.resolve(nav, &handle, Outcome::Proceed, ResolutionPath::NativeStatusUnavailable);
            }
        };
        self.transition(&nav, NavigationState::AwaitingNativeStatus, NavigationState::Gating);

        // Only add scrutiny on top of a passing or ambiguous native check
        if native == NativeVerdict::Invalid {
            return self.resolve(nav, &handle, Outcome::Proceed, ResolutionPath::NativeRejected);
        }
        self.transition(&nav, NavigationState::Gating, NavigationState::AwaitingRemoteVerdict);

        let chain = match self.certificates.chain(&nav) {
            Ok(chain) => chain,
            Err(e) => {
                warn!(op = %nav.op, url = %nav.url, error = %e, "Certificate chain unavailable, continuing without validation");
                return self.resolve(nav, &handle, Outcome::Proceed, ResolutionPath::ChainUnavailable);
            }
        };

        let mode = RequestMode::for_host(self.overrides.wants_trust_if_uncertain(&nav.url));
        let request = TrustRequest::validation(
            nav.url.clone(),
            chain,
            native,
            self.settings.security_level(),
            mode,
        );

        let verdict = tokio::select! {
            biased;
            _ = cancel.cancelled() => return self.cancelled(&nav, &handle),
            r = self.trust.validate(&request, self.config.request_timeout) => r,
        };

        if let Err(e) = &verdict {
            warn!(
                op = %nav.op,
                url = %nav.url,
                service = self.trust.service_name(),
                error_type = e.classify().error_type,
                error = %e,
                "Trust service unreachable"
            );
        }

        let outcome = Outcome::from_verdict(&verdict);
        self.resolve(nav, &handle, outcome, ResolutionPath::Remote(mode))
    }

    /// Resume the navigation, then show a warning if the outcome needs one.
    fn resolve(
        &self,
        nav: Navigation,
        handle: &SuspendedNavigation,
        outcome: Outcome,
        path: ResolutionPath,
    ) -> Resolution {
        if !handle.resume() {
            // The host finished with this operation while we were deciding
            return self.cancelled(&nav, handle);
        }
        self.transition(&nav, path.decided_in(), NavigationState::Resolved);
        info!(op = %nav.op, url = %nav.url, outcome = %outcome, path = ?path, "Navigation resolved");

        self.router.route(outcome, &nav.url);

        self.publish(Resolution {
            op: nav.op,
            url: nav.url,
            outcome: Some(outcome),
            path,
        })
    }

    fn cancelled(&self, nav: &Navigation, handle: &SuspendedNavigation) -> Resolution {
        handle.abandon();
        debug!(op = %nav.op, url = %nav.url, "Discarding decision for cancelled navigation");
        self.publish(Resolution {
            op: nav.op,
            url: nav.url.clone(),
            outcome: None,
            path: ResolutionPath::Cancelled,
        })
    }

    fn publish(&self, resolution: Resolution) -> Resolution {
        if let Some(ref tx) = self.decision_tx {
            let _ = tx.send(resolution.clone());
        }
        resolution
    }

    fn transition(&self, nav: &Navigation, from: NavigationState, to: NavigationState) {
        debug!(op = %nav.op, from = %from, to = %to, "Transition");
    }
}
