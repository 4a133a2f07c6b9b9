//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the relay: the static root
//! marker and the email-draft endpoint. Every draft response is HTTP 200;
//! failures are reported inside the JSON envelope, matching the contract
//! callers already depend on.

use crate::core::relay::{DraftRelay, UpstreamError};
use crate::models::draft::{DraftEnvelope, DraftRequest};
use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{error, info};

/// Application state shared across handlers
///
/// The relay already carries everything it needs from the configuration;
/// nothing here is mutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<DraftRelay>,
}

/// Create the API router with all endpoints
///
/// The CORS layer admits exactly one browser origin, mirroring whatever
/// methods and headers that origin asks for, with credentials allowed.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(root))
        .route("/email-draft", post(draft_email))
        .layer(cors)
        .with_state(state)
}

/// GET / - Static liveness marker
async fn root() -> Json<Value> {
    Json(json!({"message": "🚀 Email draft relay is working!"}))
}

/// POST /email-draft - Generate an email body from a note
async fn draft_email(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Json<DraftEnvelope> {
    info!(
        "📥 Incoming draft request: tone={}, recipient={}, note_chars={}",
        request.tone,
        request.recipient,
        request.note.len()
    );

    match state.relay.draft(&request).await {
        Ok(content) => Json(DraftEnvelope::Success { response: content }),
        Err(err) => {
            error!("Draft generation failed: {}", err);
            Json(failure_envelope(err))
        }
    }
}

/// Map an upstream failure to the caller-facing envelope
///
/// Transport faults get the same structured shape as provider faults, with
/// an empty `raw` since no upstream body exists.
fn failure_envelope(err: UpstreamError) -> DraftEnvelope {
    match err {
        UpstreamError::Api { status, body } => DraftEnvelope::Failure {
            error: format!("API error {}", status),
            raw: body,
        },
        UpstreamError::Shape { detail, raw } => DraftEnvelope::Failure {
            error: format!("Failed to parse JSON: {}", detail),
            raw,
        },
        UpstreamError::Transport(e) => DraftEnvelope::Failure {
            error: format!("Upstream request failed: {}", e),
            raw: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use axum::http::StatusCode;

    fn state_for(base_url: String) -> AppState {
        let config = Config::from_lookup(|name| match name {
            "OPENROUTER_API_KEY" => Some("test-key".to_string()),
            "OPENROUTER_BASE_URL" => Some(base_url.clone()),
            "REQUEST_TIMEOUT" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        AppState {
            relay: Arc::new(DraftRelay::new(&config)),
        }
    }

    async fn spawn_upstream(router: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn sample_request() -> DraftRequest {
        DraftRequest {
            note: "meeting moved to 3pm".to_string(),
            tone: "friendly".to_string(),
            recipient: "the team".to_string(),
        }
    }

    #[tokio::test]
    async fn test_router_serves_both_endpoints() {
        let upstream = Router::new().route(
            "/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Done."}}]
                }))
            }),
        );
        let upstream_addr = spawn_upstream(upstream).await;
        let state = state_for(format!("http://{}", upstream_addr));
        let app = create_router(state, HeaderValue::from_static("http://localhost:5173"));
        let addr = spawn_upstream(app).await;

        let client = reqwest::Client::new();

        let root = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(root.status(), 200);

        let response = client
            .post(format!("http://{}/email-draft", addr))
            .json(&sample_request())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"response": "Done."}));
    }

    #[tokio::test]
    async fn test_root_returns_static_marker() {
        let Json(body) = root().await;
        assert_eq!(body, json!({"message": "🚀 Email draft relay is working!"}));
    }

    #[tokio::test]
    async fn test_draft_email_success_envelope() {
        let upstream = Router::new().route(
            "/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "See you at 3pm."}}]
                }))
            }),
        );
        let addr = spawn_upstream(upstream).await;
        let state = state_for(format!("http://{}", addr));

        let Json(envelope) = draft_email(State(state), Json(sample_request())).await;
        assert_eq!(
            envelope,
            DraftEnvelope::Success {
                response: "See you at 3pm.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_draft_email_upstream_rejection_envelope() {
        let upstream = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::NOT_FOUND, "not found") }),
        );
        let addr = spawn_upstream(upstream).await;
        let state = state_for(format!("http://{}", addr));

        let Json(envelope) = draft_email(State(state), Json(sample_request())).await;
        assert_eq!(
            envelope,
            DraftEnvelope::Failure {
                error: "API error 404".to_string(),
                raw: "not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_draft_email_malformed_body_envelope() {
        let upstream =
            Router::new().route("/chat/completions", post(|| async { Json(json!({})) }));
        let addr = spawn_upstream(upstream).await;
        let state = state_for(format!("http://{}", addr));

        let Json(envelope) = draft_email(State(state), Json(sample_request())).await;
        match envelope {
            DraftEnvelope::Failure { error, raw } => {
                assert!(error.contains("Failed to parse JSON"));
                assert_eq!(raw, "{}");
            }
            other => panic!("expected failure envelope, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_draft_email_transport_failure_envelope() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let state = state_for(format!("http://{}", addr));

        let Json(envelope) = draft_email(State(state), Json(sample_request())).await;
        match envelope {
            DraftEnvelope::Failure { error, raw } => {
                assert!(error.contains("Upstream request failed"));
                assert_eq!(raw, "");
            }
            other => panic!("expected failure envelope, got {:?}", other),
        }
    }
}
