//! Request and response bodies of the HTTP API.
//!
//! Owner IDs arrive as JSON strings or numbers depending on the client, so
//! text fields accept both and normalize to a string.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Query string of `GET /todos`
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosParams {
    pub user_id: Option<String>,
    pub status: Option<String>,
}

/// Body of `POST /todos`. Any `status` sent by the client is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoBody {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub task: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub user_id: Option<String>,
}

/// Body of `PUT /todos/:id`
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoBody {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub task: Option<String>,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the server started
    pub uptime: f64,
}

/// Confirmation body of successful writes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accept a JSON string or number as text; `null` counts as absent
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or a number, got {other}"
        ))),
    }
}

/// A JSON request body that falls back to `T::default()`
///
/// A body without a JSON content type, or with an empty body, reads as `{}`.
/// Anything else must parse as JSON.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Failed to read request body");
            ApiError::bad_request("Invalid JSON body")
        })?;

        decode_body(is_json, &body).map(JsonBody)
    }
}

/// Decode a request body, treating a non-JSON or empty body as `{}`
pub fn decode_body<T>(is_json: bool, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::bad_request("Invalid JSON body")
    })
}

/// `application/json` or any `application/*+json` media type
fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
