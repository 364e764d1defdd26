//! Request schemas and the response envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{COL_STATUS, COL_TWEET, COL_TWEET_ID, STATUS_PENDING};
use crate::models::{NewTweet, StatusUpdate};
use crate::services::error::GatewayError;

/// `tweet_id` as callers send it: a string, or a bare number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TweetIdValue {
    Text(String),
    Number(serde_json::Number),
}

impl TweetIdValue {
    fn into_text(self) -> String {
        match self {
            TweetIdValue::Text(s) => s,
            TweetIdValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddTweetBody {
    tweet_id: Option<TweetIdValue>,
    tweet: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateTweetBody {
    tweet_id: Option<TweetIdValue>,
    status: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl AddTweetBody {
    fn validate(self) -> Result<NewTweet, GatewayError> {
        let tweet_id = present(self.tweet_id.map(TweetIdValue::into_text));
        let tweet = present(self.tweet);
        let (Some(tweet_id), Some(tweet)) = (tweet_id, tweet) else {
            return Err(GatewayError::MissingRequiredField(&[COL_TWEET_ID, COL_TWEET]));
        };

        Ok(NewTweet {
            tweet_id,
            tweet,
            status: present(self.status).unwrap_or_else(|| STATUS_PENDING.to_string()),
        })
    }
}

impl UpdateTweetBody {
    fn validate(self) -> Result<StatusUpdate, GatewayError> {
        let tweet_id = present(self.tweet_id.map(TweetIdValue::into_text));
        let status = present(self.status);
        let (Some(tweet_id), Some(status)) = (tweet_id, status) else {
            return Err(GatewayError::MissingRequiredField(&[COL_TWEET_ID, COL_STATUS]));
        };

        Ok(StatusUpdate { tweet_id, status })
    }
}

/// A POST body, dispatched on its optional `task` field
#[derive(Debug, PartialEq)]
pub enum PostTask {
    AddTweet(NewTweet),
    UpdateTweet(StatusUpdate),
}

fn parse_object(body: &[u8]) -> Result<Value, GatewayError> {
    match serde_json::from_slice::<Value>(body).map_err(GatewayError::malformed)? {
        value @ Value::Object(_) => Ok(value),
        _ => Err(GatewayError::malformed("expected a JSON object")),
    }
}

/// Parse a POST body. Without a `task` it is an insert; the scheduler
/// reports completions with `"task": "update_tweet"`.
pub fn parse_post(body: &[u8]) -> Result<PostTask, GatewayError> {
    let value = parse_object(body)?;

    let task = match value.get("task") {
        None | Some(Value::Null) => "add_tweet".to_string(),
        Some(Value::String(task)) => task.clone(),
        Some(_) => return Err(GatewayError::malformed("task must be a string")),
    };

    match task.as_str() {
        "add_tweet" => serde_json::from_value::<AddTweetBody>(value)
            .map_err(GatewayError::malformed)?
            .validate()
            .map(PostTask::AddTweet),
        "update_tweet" => serde_json::from_value::<UpdateTweetBody>(value)
            .map_err(GatewayError::malformed)?
            .validate()
            .map(PostTask::UpdateTweet),
        other => Err(GatewayError::malformed(format!("Unknown task: {other}"))),
    }
}

/// Parse a PUT body into a status update
pub fn parse_put(body: &[u8]) -> Result<StatusUpdate, GatewayError> {
    let value = parse_object(body)?;
    serde_json::from_value::<UpdateTweetBody>(value)
        .map_err(GatewayError::malformed)?
        .validate()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Uniform `{status, message, data?}` response body
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn error(err: &GatewayError) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: err.to_string(),
            data: None,
        }
    }
}

/// Render an operation result. Errors go out as 200 unless `strict` asks
/// for the error kind's own status code.
pub fn envelope_response<T: Serialize>(
    result: Result<(String, T), GatewayError>,
    strict: bool,
) -> Response {
    match result {
        Ok((message, data)) => (StatusCode::OK, Json(Envelope::success(message, data))).into_response(),
        Err(err) => {
            let status = if strict {
                err.status_code()
            } else {
                StatusCode::OK
            };
            (status, Json(Envelope::error(&err))).into_response()
        }
    }
}
