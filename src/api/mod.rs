//! HTTP clients for the two backends.
//!
//! Both clients sit behind small traits so the session and notes logic can be
//! driven by in-memory fakes in tests.

mod auth;
mod notes;

pub(crate) use auth::{AuthClient, SigninRequest, SignupRequest};
pub(crate) use notes::NotesClient;

use crate::models::{NewNote, Note};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed ({status}): {body}")]
    Http {
        status: u16,
        /// `message` field of the error payload, when the backend sent one.
        message: Option<String>,
        body: String,
    },

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    pub(crate) fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub(crate) fn http(status: u16, body: String) -> Self {
        Self::Http {
            status,
            message: error_message_from_body(&body),
            body,
        }
    }

    /// Text to show a user: the backend's own message when there is one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http {
                message: Some(m), ..
            } => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|p| p.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Notes CRUD backend.
pub(crate) trait NotesApi {
    async fn list_notes(&self) -> ApiResult<Vec<Note>>;
    async fn create_note(&self, note: &NewNote) -> ApiResult<()>;
    /// Full-record replace.
    async fn update_note(&self, id: &str, note: &Note) -> ApiResult<()>;
    async fn delete_note(&self, id: &str) -> ApiResult<()>;
}

/// Cookie-session authentication backend. Every call succeeds only on HTTP 200.
pub(crate) trait AuthApi {
    async fn signup(&self, req: &SignupRequest) -> ApiResult<()>;
    async fn signin(&self, req: &SigninRequest) -> ApiResult<()>;
    async fn logout(&self) -> ApiResult<()>;
    /// Probes whether the browser still holds a valid session cookie.
    async fn check_session(&self) -> ApiResult<()>;
}

/// Shared request plumbing for both clients.
#[derive(Clone, Debug)]
pub(crate) struct HttpTransport {
    pub(crate) base_url: String,
    pub(crate) with_credentials: bool,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, with_credentials: bool) -> Self {
        Self {
            base_url: base_url.into(),
            with_credentials,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[cfg(target_arch = "wasm32")]
    fn attach_credentials(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.with_credentials {
            req.fetch_credentials_include()
        } else {
            req
        }
    }

    // Cookies are a browser concern; native builds only run tests.
    #[cfg(not(target_arch = "wasm32"))]
    fn attach_credentials(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req
    }

    /// Sends the request and returns the response when its status satisfies
    /// `accept`; anything else becomes `ApiError::Http`.
    pub(crate) async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
        accept: impl Fn(reqwest::StatusCode) -> bool,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = self.attach_credentials(client.request(method, self.url(path)));

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();

        if accept(status) {
            Ok(res)
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status.as_u16(), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(error_message_from_body(r#"{"error":"x"}"#), None);
        assert_eq!(error_message_from_body(r#"{"message":"  "}"#), None);
        assert_eq!(error_message_from_body("<html>502</html>"), None);
    }

    #[test]
    fn test_user_message_prefers_backend_message() {
        let e = ApiError::http(401, r#"{"message":"User not found"}"#.to_string());
        assert_eq!(e.user_message("Login failed. Please try again."), "User not found");
    }

    #[test]
    fn test_user_message_falls_back() {
        let http = ApiError::http(500, "oops".to_string());
        assert_eq!(
            http.user_message("Login failed. Please try again."),
            "Login failed. Please try again."
        );

        let net = ApiError::Network("connection refused".to_string());
        assert_eq!(net.user_message("Signup failed. Try again."), "Signup failed. Try again.");
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let e = ApiError::http(404, "not here".to_string());
        assert_eq!(e.to_string(), "request failed (404): not here");
    }

    #[test]
    fn test_transport_url_join() {
        let t = HttpTransport::new("https://api.test", false);
        assert_eq!(t.url("/notes"), "https://api.test/notes");
    }
}
