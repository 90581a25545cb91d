//! Quotation endpoint handler.
//!
//! The relay runs on its own task so it can observe the caller leaving: hyper
//! drops this handler's future when the connection closes, which drops
//! `caller_tx` and resolves the relay's `caller_gone` future.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tokio::sync::oneshot;
use tracing::Instrument;

use crate::http::request::request_id;
use crate::http::response::internal_error;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn get_quotation(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let span = tracing::info_span!("quotation", request_id = %request_id(&headers));
    let (reply_tx, reply_rx) = oneshot::channel();
    let (caller_tx, caller_rx) = oneshot::channel::<()>();

    let relay = state.relay.clone();
    let task = tokio::spawn(
        async move {
            let caller_gone = async move {
                let _ = caller_rx.await;
            };
            relay.handle(caller_gone, reply_tx).await
        }
        .instrument(span.clone()),
    );
    let _caller = caller_tx;

    match reply_rx.await {
        Ok(reply) => reply.into_response(),
        // The relay dropped the reply channel: it failed without an answer.
        Err(_) => match task.await {
            Ok(Err(e)) => e.into_response(),
            Ok(Ok(outcome)) => {
                span.in_scope(|| tracing::error!(?outcome, "Relay finished without a reply"));
                internal_error()
            }
            Err(e) => {
                span.in_scope(|| tracing::error!(error = %e, "Relay task aborted"));
                metrics::record_request("aborted");
                internal_error()
            }
        },
    }
}
