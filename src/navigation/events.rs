use tokio::sync::mpsc;
use crate::errors::GateError;
use crate::models::{UserAction, WarningKind};
use super::collaborators::OperationId;

/// Messages the host adapter sends into the gate.
#[derive(Debug, Clone)]
pub enum NavigationEvent {
    /// A navigation started. The gate suspends it before anything else.
    Started {
        op: OperationId,
        url: String,
    },
    /// The host dropped or redirected the navigation.
    Cancelled {
        op: OperationId,
    },
    /// A button was pressed on a warning page.
    UserAction {
        kind: WarningKind,
        action: UserAction,
        url: String,
    },
}

/// Sending side handed to the host's callback adapter.
#[derive(Debug, Clone)]
pub struct GateHandle {
    tx: mpsc::UnboundedSender<NavigationEvent>,
}

impl GateHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn navigation_started(&self, op: OperationId, url: impl Into<String>) -> Result<(), GateError> {
        self.send(NavigationEvent::Started { op, url: url.into() })
    }

    pub fn navigation_cancelled(&self, op: OperationId) -> Result<(), GateError> {
        self.send(NavigationEvent::Cancelled { op })
    }

    pub fn user_action(
        &self,
        kind: WarningKind,
        action: UserAction,
        url: impl Into<String>,
    ) -> Result<(), GateError> {
        self.send(NavigationEvent::UserAction { kind, action, url: url.into() })
    }

    fn send(&self, event: NavigationEvent) -> Result<(), GateError> {
        self.tx.send(event)
            .map_err(|_| GateError::Internal("Navigation gate is no longer running".into()))
    }
}
