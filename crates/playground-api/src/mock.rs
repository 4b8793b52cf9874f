//! Stand-in execution service for local development and tests.
//!
//! It never runs the submitted code. A responder decides the status and body
//! for each payload.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::schema::RunPayload;

pub const RUN_ROUTE: &str = "/api/run";

pub type Responder = Arc<dyn Fn(&RunPayload) -> (StatusCode, String) + Send + Sync>;

pub struct MockServerConfig {
    pub bind_addr: String,
}

#[derive(Clone)]
struct MockState {
    responder: Responder,
}

/// Echoes the submission back; blank code is rejected with 400.
pub fn echo_responder() -> Responder {
    Arc::new(|payload: &RunPayload| {
        if payload.code.trim().is_empty() {
            return (StatusCode::BAD_REQUEST, "empty source".to_string());
        }
        let body = format!(
            "[{}] received {} line(s)\n{}",
            payload.language,
            payload.code.lines().count(),
            payload.code
        );
        (StatusCode::OK, body)
    })
}

/// Always answers with the same status and body.
pub fn fixed_responder(status: StatusCode, body: &str) -> Responder {
    let body = body.to_string();
    Arc::new(move |_: &RunPayload| (status, body.clone()))
}

pub fn build_router(responder: Responder) -> Router {
    Router::new()
        .route(RUN_ROUTE, post(run_code))
        .with_state(MockState { responder })
}

async fn run_code(
    State(state): State<MockState>,
    Json(payload): Json<RunPayload>,
) -> impl IntoResponse {
    debug!(language = %payload.language, bytes = payload.code.len(), "mock run");
    (state.responder)(&payload)
}

pub async fn serve(config: MockServerConfig, responder: Responder) -> Result<(), ApiError> {
    let listener = bind(&config.bind_addr).await?;
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, route = RUN_ROUTE, "mock execution service listening");
    }
    serve_on(listener, responder).await
}

/// Serves in a background task and returns the bound address. Binding to
/// port 0 picks a free port.
pub async fn spawn(bind_addr: &str, responder: Responder) -> Result<SocketAddr, ApiError> {
    let listener = bind(bind_addr).await?;
    let addr = listener
        .local_addr()
        .map_err(|source| ApiError::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;
    tokio::spawn(async move {
        if let Err(err) = serve_on(listener, responder).await {
            error!(%err, "mock execution service stopped");
        }
    });
    Ok(addr)
}

async fn bind(bind_addr: &str) -> Result<TcpListener, ApiError> {
    TcpListener::bind(bind_addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: bind_addr.to_string(),
            source,
        })
}

async fn serve_on(listener: TcpListener, responder: Responder) -> Result<(), ApiError> {
    axum::serve(listener, build_router(responder))
        .await
        .map_err(ApiError::Serve)
}
