//! The webhook listener
//!
//! A single POST route. With a signing secret configured, the signature is
//! verified against the raw body before anything else touches it; only then
//! is the body parsed as JSON and handed to the handler. Each request is
//! handled independently - the only shared state is the immutable secret
//! and the handler itself, so concurrent deliveries need no locking.
//!
//! Response contract:
//! - 200 `{"received":true}` - verified, parsed, handled
//! - 400 - body is not valid JSON (signature was fine)
//! - 401 - missing or invalid signature (only when a secret is configured)
//! - 404 - wrong method or path
//! - 500 - the handler returned an error; the listener survives

use std::net::SocketAddr;
use std::sync::Arc;

use agora_types::WebhookEvent;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::signature::{verify_signature, DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER};

/// Listener configuration
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// URL path to accept deliveries on
    pub path: String,
    /// Signing secret; when absent, signatures are not verified
    /// (not recommended outside local development)
    pub signing_secret: Option<String>,
    /// Maximum accepted delivery age in seconds
    pub tolerance_secs: i64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: "/webhook".to_string(),
            signing_secret: None,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }
}

impl WebhookConfig {
    /// Default config with a signing secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            signing_secret: Some(secret.into()),
            ..Self::default()
        }
    }
}

/// Receives each verified webhook event
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handle one event. An error becomes a 500 response; the listener
    /// keeps running.
    async fn handle(&self, event: WebhookEvent) -> anyhow::Result<()>;
}

#[derive(Clone)]
struct ListenerState {
    handler: Arc<dyn WebhookHandler>,
    signing_secret: Option<Arc<str>>,
    tolerance_secs: i64,
}

/// The webhook listener
pub struct WebhookServer {
    config: WebhookConfig,
    handler: Arc<dyn WebhookHandler>,
}

impl WebhookServer {
    /// Create a listener over a handler
    pub fn new(handler: Arc<dyn WebhookHandler>, config: WebhookConfig) -> Self {
        Self { config, handler }
    }

    /// Build the router (useful for embedding and for tests)
    pub fn router(&self) -> Router {
        let state = ListenerState {
            handler: self.handler.clone(),
            signing_secret: self.config.signing_secret.as_deref().map(Arc::from),
            tolerance_secs: self.config.tolerance_secs,
        };
        Router::new()
            .route(&self.config.path, any(receive))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind and serve on a port; port 0 picks an ephemeral one
    pub async fn start(&self, port: u16) -> std::io::Result<RunningWebhookServer> {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        let path = self.config.path.clone();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(err) = served {
                error!(error = %err, "webhook listener exited");
            }
        });

        info!(%addr, %path, "webhook listener started");
        Ok(RunningWebhookServer {
            addr,
            path,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// A started listener; dropping it without `stop` leaves the task running
pub struct RunningWebhookServer {
    addr: SocketAddr,
    path: String,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RunningWebhookServer {
    /// Bound socket address
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Full delivery URL
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, self.path)
    }

    /// Gracefully stop the listener
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

async fn receive(
    State(state): State<ListenerState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return not_found().await;
    }

    let body = String::from_utf8_lossy(&body);

    if let Some(secret) = &state.signing_secret {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if header.is_empty() || !verify_signature(&body, header, secret, state.tolerance_secs) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or missing webhook signature"})),
            )
                .into_response();
        }
    }

    let event: WebhookEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid JSON"})),
            )
                .into_response()
        }
    };

    match state.handler.handle(event).await {
        Ok(()) => (StatusCode::OK, Json(json!({"received": true}))).into_response(),
        Err(err) => {
            error!(error = %err, "webhook handler failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Handler failed"})),
            )
                .into_response()
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
