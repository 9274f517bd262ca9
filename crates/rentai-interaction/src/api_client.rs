//! Shared HTTP client for the RentAI services.
//!
//! Every call goes through two interceptors:
//!
//! - request: JSON content type plus `Authorization: Bearer <token>` read
//!   from durable storage at send time
//! - response: a 401 clears the session, returns to `/` and tells the user
//!   the session expired; any other failure is surfaced with the server's
//!   message when one is present

use std::sync::Arc;

use rentai_core::navigation::{Navigator, Route};
use rentai_core::notification::{Notification, Notifier, messages};
use rentai_core::session::SessionStore;
use rentai_core::{RentaiError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};

/// Collaborators every API client needs.
#[derive(Clone)]
pub struct ClientContext {
    pub transport: Arc<dyn HttpTransport>,
    pub session: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Clone)]
pub struct ApiClient {
    name: &'static str,
    base_url: String,
    context: ClientContext,
}

impl ApiClient {
    pub fn new(name: &'static str, base_url: impl Into<String>, context: ClientContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name,
            base_url,
            context,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `url(path)` with `id` appended as one percent-encoded path segment.
    pub fn resource_url(&self, path: &str, id: &str) -> Result<String> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(RentaiError::validation(format!("Invalid identifier '{}'", id)));
        }
        let mut url = Url::parse(&self.url(path))?;
        url.path_segments_mut()
            .map_err(|_| RentaiError::config(format!("{} cannot take path segments", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url.into())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, Vec::new()).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let request = ApiRequest::new(HttpMethod::Get, self.url(path)).with_query(query);
        let response = self.execute(request).await?;
        parse_body(&response)
    }

    /// GET against an absolute URL (root-level health endpoints).
    pub async fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .execute(ApiRequest::new(HttpMethod::Get, url))
            .await?;
        parse_body(&response)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let request = ApiRequest::new(HttpMethod::Post, self.url(path)).with_body(body);
        let response = self.execute(request).await?;
        parse_body(&response)
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.intercept_request(request);
        tracing::debug!(
            "[{}] {} {}",
            self.name,
            request.method,
            request.url
        );
        let outcome = self.context.transport.send(request).await;
        self.intercept_response(outcome)
    }

    fn intercept_request(&self, mut request: ApiRequest) -> ApiRequest {
        request
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        if let Some(token) = self.context.session.stored_token() {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        request
    }

    fn intercept_response(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse> {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("[{}] Request failed: {}", self.name, e);
                self.context
                    .notifier
                    .notify(Notification::error(messages::GENERIC_FAILURE));
                return Err(e);
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        if response.status == 401 {
            tracing::warn!("[{}] 401 received, clearing session", self.name);
            if let Err(e) = self.context.session.logout() {
                tracing::warn!("[{}] Failed to clear session: {}", self.name, e);
            }
            self.context.navigator.navigate(Route::ROOT);
            self.context
                .notifier
                .notify(Notification::error(messages::SESSION_EXPIRED));
            return Err(RentaiError::Unauthorized);
        }

        let message = server_message(&response.body)
            .unwrap_or_else(|| messages::GENERIC_FAILURE.to_string());
        tracing::warn!(
            "[{}] HTTP {}: {}",
            self.name,
            response.status,
            message
        );
        self.context
            .notifier
            .notify(Notification::error(message.clone()));
        Err(RentaiError::http(response.status, message))
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Looks at `detail` first, then `message`. A `detail` array of validation
/// entries is joined on their `msg` fields.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    };
    value
        .get("detail")
        .and_then(text)
        .or_else(|| value.get("message").and_then(text))
}

/// Empty bodies decode as JSON `null` so `Option<T>` and `Value` callers
/// handle 204-style replies.
fn parse_body<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    Ok(serde_json::from_str(body)?)
}
