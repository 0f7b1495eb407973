//! HTTP routes: health check and the webhook endpoint.

use axum::{
    Router,
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing,
};
use tracing::{error, info};

use crate::SharedState;
use crate::dispatch::spawn_notify;
use crate::error::{RelayError, Result};
use crate::payload::PushEvent;
use crate::signature::verify_signature;

/// Builds the application router with the webhook route taken from config.
pub fn build_router(state: SharedState) -> Router {
    let webhook_path = state.config.webhook_path.clone();
    Router::new()
        .route("/", routing::get(root))
        .route(&webhook_path, routing::post(handle_webhook))
        .with_state(state)
}

pub async fn root() -> &'static str {
    "Hello, world!"
}

/// Handles the GitHub webhook POST request.
///
/// Verify -> extract -> dispatch, short-circuiting on first failure. The
/// response is returned as soon as the notify script has started; its
/// outcome is never reported back to GitHub.
pub async fn handle_webhook(
    AxumState(state): AxumState<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    // Only dispatch "push" events. GitHub sends "ping" on hook creation;
    // a request without the event header is treated as a push.
    let event_opt = headers.get("X-GitHub-Event").and_then(|v| v.to_str().ok());
    if let Some(event_type) = event_opt {
        if event_type != "push" {
            info!("Not push event; Received {:?} event", event_type);
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
    }

    // Signature verification happens on the raw body, before any parsing.
    // With no secret configured the server runs in open mode and skips it.
    if let Some(secret) = &state.config.secret {
        let signature = headers
            .get("X-Hub-Signature-256")
            .or_else(|| headers.get("X-Hub-Signature"))
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                error!("Secret configured, but no signature header supplied.");
                RelayError::AuthenticationFailure("no signature header supplied".to_string())
            })?;

        if !verify_signature(secret, &body, signature) {
            error!("Signature verification failed!");
            return Err(RelayError::AuthenticationFailure(
                "signature mismatch".to_string(),
            ));
        }
    }

    let event = PushEvent::from_slice(&body).inspect_err(|e| {
        info!("Could not parse push payload: {}", e);
    })?;

    let full_name = event.repository.full_name.clone();
    info!(
        "Push to '{}' ({} -> {} on {})",
        full_name, event.before, event.after, event.git_ref
    );

    spawn_notify(&state.config, &event).inspect_err(|e| {
        error!("Could not start notify script: {}", e);
    })?;

    // Return immediately so the webhook request responds within GitHub's
    // 10 second delivery timeout.
    Ok((
        StatusCode::OK,
        format!("Processed push to {}.", full_name),
    )
        .into_response())
}
