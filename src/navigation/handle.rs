use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use super::collaborators::{NavigationController, OperationId};

/// A navigation paused by the gate. Resumed at most once.
///
/// The first of `resume` and `abandon` finalizes the operation; later calls
/// are no-ops. A handle dropped without being finalized resumes the
/// navigation so a page can never stay paused forever.
pub struct SuspendedNavigation {
    op: OperationId,
    controller: Arc<dyn NavigationController>,
    finalized: AtomicBool,
}

impl SuspendedNavigation {
    /// Pause the host operation and take ownership of its resumption.
    pub fn suspend(op: OperationId, controller: Arc<dyn NavigationController>) -> Self {
        controller.suspend(op);
        Self {
            op,
            controller,
            finalized: AtomicBool::new(false),
        }
    }

    pub fn op(&self) -> OperationId {
        self.op
    }

    /// Resume the host operation. Returns false if it was already finalized.
    pub fn resume(&self) -> bool {
        if self.finalized.swap(true, Ordering::AcqRel) {
            debug!(op = %self.op, "Navigation already finalized, not resuming");
            return false;
        }
        self.controller.resume(self.op);
        true
    }

    /// Finalize without resuming, for operations the host cancelled.
    /// Returns false if it was already finalized.
    pub fn abandon(&self) -> bool {
        !self.finalized.swap(true, Ordering::AcqRel)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::Acquire)
    }
}

impl Drop for SuspendedNavigation {
    fn drop(&mut self) {
        if !self.finalized.swap(true, Ordering::AcqRel) {
            warn!(op = %self.op, "Navigation dropped while suspended, resuming");
            self.controller.resume(self.op);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<&'static str>>,
    }

    impl NavigationController for Recorder {
        fn suspend(&self, _op: OperationId) {
            self.calls.lock().unwrap().push("suspend");
        }
        fn resume(&self, _op: OperationId) {
            self.calls.lock().unwrap().push("resume");
        }
        fn reload(&self, _url: &str) {
            self.calls.lock().unwrap().push("reload");
        }
    }

    #[test]
    fn test_suspend_then_single_resume() {
        let recorder = Arc::new(Recorder::default());
        let handle = SuspendedNavigation::suspend(OperationId::new(), recorder.clone());
        assert!(handle.resume());
        assert!(!handle.resume());
        drop(handle);
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["suspend", "resume"]);
    }

    #[test]
    fn test_abandoned_navigation_is_never_resumed() {
        let recorder = Arc::new(Recorder::default());
        let handle = SuspendedNavigation::suspend(OperationId::new(), recorder.clone());
        assert!(handle.abandon());
        assert!(!handle.resume());
        assert!(handle.is_finalized());
        drop(handle);
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["suspend"]);
    }

    #[test]
    fn test_drop_resumes_pending_navigation() {
        let recorder = Arc::new(Recorder::default());
        drop(SuspendedNavigation::suspend(OperationId::new(), recorder.clone()));
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["suspend", "resume"]);
    }
}
