use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_AUTH_API_URL: &str = "https://notetaker-backend-authenication.onrender.com";
pub(crate) const DEFAULT_NOTES_API_URL: &str = "https://notetaker-backend-data.onrender.com";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration, read from `window.ENV` in `index.html`.
///
/// Every key is accepted in README style (`AUTH_API_URL`) and in lower case
/// (`auth_api_url`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub auth_api_url: String,
    pub notes_api_url: String,

    /// Attach session cookies to notes requests too. Off by default: only the
    /// auth service is called with credentials.
    pub notes_with_credentials: bool,

    /// `tracing-subscriber` filter directive.
    pub log_level: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_lookup(|key| {
                let value = js_sys::Reflect::get(&env, &key.into()).ok()?;
                value
                    .as_string()
                    .or_else(|| value.as_bool().map(|b| b.to_string()))
            }),
            None => Self::default(),
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .or_else(|| lookup(&key.to_ascii_lowercase()))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            auth_api_url: get("AUTH_API_URL")
                .map(|url| normalize_base_url(&url))
                .unwrap_or_else(|| DEFAULT_AUTH_API_URL.to_string()),
            notes_api_url: get("NOTES_API_URL")
                .map(|url| normalize_base_url(&url))
                .unwrap_or_else(|| DEFAULT_NOTES_API_URL.to_string()),
            notes_with_credentials: get("NOTES_WITH_CREDENTIALS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_flag(v: &str) -> bool {
    matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
