//! Sending requests to the backend.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::logging::{log_request, log_response};

/// The JSON body the backend returns from every action endpoint.
///
/// Failed actions set `success` to false and usually explain why in
/// `message`. The add-category endpoint echoes the created category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Whether the action took effect.
    pub success: bool,
    /// A human readable explanation.
    #[serde(default)]
    pub message: Option<String>,
    /// The ID of a created category.
    #[serde(default)]
    pub category_id: Option<String>,
    /// The name of a created category.
    #[serde(default)]
    pub category_name: Option<String>,
}

impl ApiResponse {
    /// A successful response with no message.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            category_id: None,
            category_name: None,
        }
    }

    /// A failed response explained by `message`.
    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_owned()),
            ..Self::ok()
        }
    }
}

/// A POST to an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// The full URL, including the configured server URL.
    pub url: String,
    /// An `application/x-www-form-urlencoded` body. Requests without a form
    /// are sent with an empty JSON content type.
    pub form: Option<String>,
}

/// Why a request produced no [ApiResponse].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not the expected JSON.
    #[error("response was not valid JSON: {0}")]
    InvalidBody(String),
}

/// Sends action requests to the backend.
///
/// Responses with an error status but a JSON body are returned as
/// [ApiResponse]s, since the backend reports failed actions that way.
pub trait Transport {
    /// POST `request` and decode the JSON response.
    fn post(
        &self,
        request: PostRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

/// A [Transport] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that sends requests with `client`, e.g. one with a
    /// cookie store holding the user's session.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: PostRequest) -> Result<ApiResponse, TransportError> {
        log_request(
            "POST",
            &request.url,
            request.form.as_deref().unwrap_or_default(),
        );

        let builder = self.client.post(&request.url);
        let builder = match request.form {
            Some(form) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form),
            None => builder.header(CONTENT_TYPE, "application/json"),
        };

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;

        log_response(&request.url, status.as_u16(), &body);

        serde_json::from_str(&body).map_err(|error| TransportError::InvalidBody(error.to_string()))
    }
}
