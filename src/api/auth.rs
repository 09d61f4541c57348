use super::{ApiResult, AuthApi, HttpTransport};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SigninRequest {
    pub email: String,
    pub password: String,
}

fn is_ok(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// Client for the authentication service.
///
/// The session lives in an HTTP-only cookie, so every call except signup is
/// sent with `credentials: include`. No token is kept client-side.
#[derive(Clone, Debug)]
pub(crate) struct AuthClient {
    transport: HttpTransport,
    signup_transport: HttpTransport,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            transport: HttpTransport::new(base_url.clone(), true),
            signup_transport: HttpTransport::new(base_url, false),
        }
    }
}

impl AuthApi for AuthClient {
    async fn signup(&self, req: &SignupRequest) -> ApiResult<()> {
        self.signup_transport
            .send(Method::POST, "/signup", Some(req), is_ok)
            .await
            .map(drop)
    }

    async fn signin(&self, req: &SigninRequest) -> ApiResult<()> {
        self.transport
            .send(Method::POST, "/signin", Some(req), is_ok)
            .await
            .map(drop)
    }

    async fn logout(&self) -> ApiResult<()> {
        self.transport
            .send(
                Method::POST,
                "/logout",
                Some(&serde_json::json!({})),
                is_ok,
            )
            .await
            .map(drop)
    }

    async fn check_session(&self) -> ApiResult<()> {
        self.transport
            .send(Method::GET, "/protected", None::<&()>, is_ok)
            .await
            .map(drop)
    }
}
