//! Tweet queue endpoints.
//!
//! The queue is served at both `/` and `/tweets`, one operation per method:
//! - `GET` lists pending tweets
//! - `POST` adds a tweet (or updates one when `task` is `update_tweet`)
//! - `PUT` updates a tweet's status
//! - anything else answers with an "unsupported" envelope

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, Uri},
    response::Response,
    routing::get,
};
use std::sync::Arc;

use super::dto::{PostTask, envelope_response, parse_post, parse_put};
use crate::AppState;
use crate::models::{CreatedTweet, StatusUpdate, UpdatedStatus};
use crate::services::error::{GatewayError, LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    let queue = get(list_pending)
        .post(post_tweet)
        .put(put_tweet)
        .fallback(unsupported_method);

    Router::new()
        .route("/", queue.clone())
        .route("/tweets", queue)
}

/// GET /tweets - List tweets awaiting publication
async fn list_pending(State(state): State<Arc<AppState>>) -> Response {
    let result = state
        .gateway
        .list_pending()
        .await
        .log_err("List pending tweets error")
        .map(|tweets| (format!("Found {} pending tweets", tweets.len()), tweets));

    envelope_response(result, state.strict_status_codes)
}

/// POST /tweets - Add a tweet, or dispatch on `task`
async fn post_tweet(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let parsed = body
        .map_err(GatewayError::from_body_rejection)
        .and_then(|body| parse_post(&body));
    match parsed.log_err("Add tweet request rejected") {
        Ok(PostTask::AddTweet(tweet)) => {
            let result = state
                .gateway
                .insert_record(tweet)
                .await
                .log_err("Add tweet error")
                .map(|created: CreatedTweet| ("Tweet added successfully".to_string(), created));
            envelope_response(result, state.strict_status_codes)
        }
        Ok(PostTask::UpdateTweet(update)) => update_status(&state, update).await,
        Err(err) => envelope_response::<()>(Err(err), state.strict_status_codes),
    }
}

/// PUT /tweets - Update a tweet's status
async fn put_tweet(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let parsed = body
        .map_err(GatewayError::from_body_rejection)
        .and_then(|body| parse_put(&body));
    match parsed.log_err("Update tweet request rejected") {
        Ok(update) => update_status(&state, update).await,
        Err(err) => envelope_response::<()>(Err(err), state.strict_status_codes),
    }
}

async fn update_status(state: &AppState, update: StatusUpdate) -> Response {
    let result = state
        .gateway
        .update_status(update)
        .await
        .log_err("Update tweet error")
        .map(|updated: UpdatedStatus| {
            (
                format!(
                    "Tweet {} status updated to {}",
                    updated.tweet_id, updated.status
                ),
                updated,
            )
        });

    envelope_response(result, state.strict_status_codes)
}

/// Any other method - deleting or editing records is not supported
async fn unsupported_method(State(state): State<Arc<AppState>>, method: Method) -> Response {
    let err = GatewayError::UnsupportedOperation(method.to_string());
    tracing::warn!(%method, "Unsupported method");
    envelope_response::<()>(Err(err), state.strict_status_codes)
}

/// Any path outside the queue and health routes
pub async fn unknown_path(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let err = GatewayError::UnknownPath(format!("{method} {}", uri.path()));
    tracing::warn!(%method, path = %uri.path(), "Unknown path");
    envelope_response::<()>(Err(err), state.strict_status_codes)
}
