//! reqwest-backed [`SessionService`] speaking the `/api/*` JSON protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::FeedbackVector,
    error::ServiceErrorBody,
    protocol::{InjectRequest, SessionSnapshot, SubmitReply, SubmitRequest},
};
use tracing::debug;
use url::Url;

use crate::service::{InjectReply, ServiceError, SessionService};

pub struct HttpSessionService {
    http: Client,
    base_url: Url,
}

impl HttpSessionService {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(request_timeout)
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::Transport(format!("invalid endpoint {path}: {err}")))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ServiceError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "session request");
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn call<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ServiceError> {
        let response = self.send(method, path, body).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn error_message(bytes: &[u8]) -> String {
    serde_json::from_slice::<ServiceErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).trim().to_string())
}

#[async_trait]
impl SessionService for HttpSessionService {
    async fn fetch_state(&self) -> Result<SessionSnapshot, ServiceError> {
        self.call(Method::GET, "api/state", None::<&()>).await
    }

    async fn new_game(&self) -> Result<SessionSnapshot, ServiceError> {
        self.call(Method::POST, "api/new_game", None::<&()>).await
    }

    async fn switch_suggestion(&self) -> Result<SessionSnapshot, ServiceError> {
        self.call(Method::POST, "api/switch", None::<&()>).await
    }

    async fn inject_word(&self, word: &str) -> Result<InjectReply, ServiceError> {
        let body = InjectRequest {
            word: word.to_string(),
        };
        let response = self.send(Method::POST, "api/inject", Some(&body)).await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // A refused word comes back as HTTP 400 with `ok: false`, so the body
        // decides before the status does.
        let value: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => {
                return Err(ServiceError::Status {
                    status: status.as_u16(),
                    message: error_message(&bytes),
                })
            }
        };
        match value.get("ok").and_then(serde_json::Value::as_bool) {
            Some(true) => Ok(InjectReply::Accepted(serde_json::from_value(value)?)),
            Some(false) => Ok(InjectReply::Rejected {
                reason: value
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
            }),
            None if !status.is_success() => Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            }),
            None => Err(ServiceError::Decode(
                "inject response is missing the `ok` flag".to_string(),
            )),
        }
    }

    async fn submit_feedback(&self, feedback: FeedbackVector) -> Result<SubmitReply, ServiceError> {
        self.call(Method::POST, "api/submit", Some(&SubmitRequest { feedback }))
            .await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
