//! HTTP helpers for the identity service's JSON API. Feature clients use these
//! helpers to avoid duplicating request setup and to map every failure into an
//! [`AppError`]. Structured validation errors are recognized here so callers can
//! branch on them without inspecting response bodies. The helpers never log
//! request or response bodies.

mod errors;

pub use errors::AppError;

use crate::{config::AppConfig, APP_USER_AGENT, GIT_COMMIT_HASH};
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
/// Error name used by the identity service for structured validation failures.
const VALIDATION_ERROR_NAME: &str = "ValidationError";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client bound to the configured API base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Fetches JSON with optional query parameters.
    ///
    /// # Errors
    /// Returns an error on transport failures, non-2xx responses or undecodable bodies.
    #[instrument(skip(self, query))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error on encoding failures, transport failures, non-2xx responses
    /// or undecodable bodies.
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send_json(path, body).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and ignores the response body.
    ///
    /// # Errors
    /// Returns an error on encoding failures, transport failures or non-2xx responses.
    #[instrument(skip(self, body))]
    pub async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self.send_json(path, body).await?;
        handle_empty_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        self.client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)
    }
}

fn user_agent() -> String {
    let short_hash = GIT_COMMIT_HASH.get(..7).unwrap_or(GIT_COMMIT_HASH);
    format!("{APP_USER_AGENT} ({short_hash})")
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    debug!(status = status.as_u16(), "response received");

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(parse_error_body(status.as_u16(), &body))
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    let status = response.status();
    debug!(status = status.as_u16(), "response received");

    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(parse_error_body(status.as_u16(), &body))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Option<ErrorDetails>,
}

#[derive(Deserialize)]
struct ErrorDetails {
    #[serde(default)]
    errors: Vec<FieldIssue>,
}

#[derive(Deserialize)]
struct FieldIssue {
    #[serde(default)]
    path: Vec<Value>,
    message: String,
}

/// Classifies an error body: validation errors with field details become
/// [`AppError::Validation`], everything else an [`AppError::Http`].
fn parse_error_body(status: u16, body: &str) -> AppError {
    let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return AppError::Http {
            status,
            message: sanitize_body(body),
        };
    };

    let issues = error.details.map(|details| details.errors).unwrap_or_default();
    if error.name == VALIDATION_ERROR_NAME && !issues.is_empty() {
        let mut errors = BTreeMap::new();
        for issue in issues {
            errors.entry(join_path(&issue.path)).or_insert(issue.message);
        }
        return AppError::Validation {
            message: error.message,
            errors,
        };
    }

    AppError::Http {
        status,
        message: sanitize_body(&error.message),
    }
}

fn join_path(path: &[Value]) -> String {
    path.iter()
        .map(|segment| match segment {
            Value::String(segment) => segment.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
