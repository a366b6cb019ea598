//! Stand-in trust service speaking the real wire contract with fixed verdicts.
//!
//! Useful for running the gate without a trust service installed, and for
//! exercising the HTTP client end to end in tests.

use std::net::SocketAddr;
use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use dashmap::DashMap;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use crate::errors::GateError;
use crate::models::{RequestMode, TrustRequest, TrustResponse, TrustResult};
use crate::overrides::normalize_host;

#[derive(Clone)]
pub struct StubState {
    inner: Arc<StubInner>,
}

struct StubInner {
    default: TrustResponse,
    hosts: DashMap<String, TrustResponse>,
    requests: RwLock<Vec<TrustRequest>>,
}

impl StubState {
    pub fn new(default: TrustResponse) -> Self {
        Self {
            inner: Arc::new(StubInner {
                default,
                hosts: DashMap::new(),
                requests: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Answer requests for `host` with `verdict` instead of the default.
    pub fn set_host_verdict(&self, host: &str, verdict: TrustResponse) {
        if let Some(host) = normalize_host(host) {
            self.inner.hosts.insert(host, verdict);
        }
    }

    /// Every request decoded so far, oldest first.
    pub async fn requests(&self) -> Vec<TrustRequest> {
        self.inner.requests.read().await.clone()
    }

    fn verdict_for(&self, request: &TrustRequest) -> TrustResponse {
        if request.mode == RequestMode::RetrieveRecommendation {
            return self.inner.default;
        }

        let verdict = normalize_host(&request.url)
            .and_then(|host| self.inner.hosts.get(&host).map(|v| *v))
            .unwrap_or(self.inner.default);

        // The end certificate is taken as trusted in this mode
        if request.mode == RequestMode::ValidateTrustEndCertificate && verdict.result == TrustResult::Unknown {
            return TrustResponse::trusted();
        }
        verdict
    }
}

pub fn build_router(state: StubState) -> Router {
    Router::new()
        .route("/", post(handle_validation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_validation(
    State(state): State<StubState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<TrustRequest>, JsonRejection>,
) -> Response {
    if let Some(ConnectInfo(addr)) = peer {
        if !addr.ip().is_loopback() {
            warn!(peer = %addr, "Rejecting request not from loopback address");
            return (StatusCode::FORBIDDEN, "Request not from loopback address").into_response();
        }
    }

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed trust request");
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };

    let verdict = state.verdict_for(&request);
    info!(
        url = %request.url,
        mode = %request.mode,
        result = verdict.result.as_str(),
        detail = %verdict.detail,
        "Answering trust request"
    );
    state.inner.requests.write().await.push(request);

    Json(verdict).into_response()
}

/// Serve the stub on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, state: StubState) -> Result<(), GateError> {
    let app = build_router(state);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| GateError::Internal(format!("Stub server error: {}", e)))
}

/// Bind an ephemeral loopback port and serve the stub in the background.
pub async fn spawn_local(state: StubState) -> Result<SocketAddr, GateError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            warn!(error = %e, "Stub trust service stopped");
        }
    });
    Ok(addr)
}
