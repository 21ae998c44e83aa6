use melma_audit::audit::{EvaluationSession, Rubric};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The append-only evaluation log, shared across request handlers. The
/// mutex makes concurrent appends safe; each audit computes fully before
/// taking the lock-guarded append path.
pub(crate) type SharedSession = Arc<Mutex<EvaluationSession>>;

pub(crate) fn shared_session() -> SharedSession {
    Arc::new(Mutex::new(EvaluationSession::new(Rubric::standard())))
}
