//! HTTP gateway to the inventory backend.
//!
//! [`GatewayClient`] is the only type that opens connections. Per-entity
//! operations live in [`crate::stores`] as traits implemented for it.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Ack, ImageUpload, PartPayload};
use crate::session::Session;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part as FormPart};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    config: ApiConfig,
    session: Session,
}

impl GatewayClient {
    pub fn new(config: ApiConfig, session: Session) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn bearer(&self) -> ApiResult<String> {
        self.session
            .token()
            .map(|token| format!("Bearer {}", token))
            .ok_or_else(|| ApiError::Unauthorized("not logged in".to_string()))
    }

    /// Request without credentials. Only login goes through here.
    pub(crate) fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header(ACCEPT, "application/json")
    }

    /// JSON request carrying the session's bearer token.
    pub(crate) fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        Ok(self
            .http
            .request(method, self.config.endpoint(path))
            .header(AUTHORIZATION, self.bearer()?)
            .header(ACCEPT, "application/json"))
    }

    /// Multipart POST. The content type (and its boundary) is left to reqwest.
    pub(crate) fn multipart(&self, path: &str, payload: &PartPayload) -> ApiResult<RequestBuilder> {
        let mut form = Form::new();
        for (key, value) in &payload.fields {
            form = form.text(*key, value.clone());
        }
        if let Some(image) = &payload.image {
            form = form.part("image", image_part(image)?);
        }

        Ok(self
            .http
            .post(self.config.endpoint(path))
            .header(AUTHORIZATION, self.bearer()?)
            .header(ACCEPT, "application/json")
            .multipart(form))
    }

    /// Sends and decodes a JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.execute(operation, request).await?;
        serde_json::from_slice(&body).map_err(|e| {
            error!(operation, "Failed to decode response: {}", e);
            ApiError::Decode(e)
        })
    }

    /// Sends a mutation and normalises whatever came back into an [`Ack`].
    pub(crate) async fn acknowledge(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> ApiResult<Ack> {
        let body = self.execute(operation, request).await?;
        Ok(ack_from_body(&body))
    }

    async fn execute(&self, operation: &str, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        debug!(operation, "Sending request");

        let response = request.send().await.map_err(|e| {
            error!(operation, "Request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(operation, "Failed to read response body: {}", e);
            ApiError::Transport(e)
        })?;

        if status.is_success() {
            debug!(operation, status = status.as_u16(), "Request succeeded");
            return Ok(body.to_vec());
        }

        let err = error_for_status(status, &body);
        error!(operation, status = status.as_u16(), "Request rejected: {}", err);
        Err(err)
    }
}

fn image_part(image: &ImageUpload) -> ApiResult<FormPart> {
    Ok(FormPart::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(image.mime)?)
}

pub(crate) fn ack_from_body(body: &[u8]) -> Ack {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ack::default();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        Ok(other) => Ack {
            message: None,
            data: Some(other),
        },
        Err(_) => Ack {
            message: Some(String::from_utf8_lossy(body).trim().to_string()),
            data: None,
        },
    }
}

pub(crate) fn error_for_status(status: StatusCode, body: &[u8]) -> ApiError {
    let message = backend_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation {
                status: status.as_u16(),
                message,
            }
        }
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

// `{"message": "..."}`, else the first entry of Laravel's `{"errors": {field: [..]}}`.
fn backend_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }

    value
        .get("errors")
        .and_then(Value::as_object)
        .and_then(|errors| errors.values().next())
        .and_then(|first| match first {
            Value::Array(items) => items.first().and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
        .map(str::to_string)
}
