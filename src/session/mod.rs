//! Session guard: the authenticated flag gating the notes route.
//!
//! The flag is an explicit state machine owned by `App` and handed to
//! children through a [`SessionHandle`] in context. The backend cookie is the
//! only source of truth; nothing about the session is stored client-side.

use crate::api::{AuthApi, SigninRequest, SignupRequest};
use crate::storage::TokenStore;
use leptos::prelude::*;

pub(crate) const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub(crate) const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum SessionStatus {
    #[default]
    Unknown,
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    CheckStarted,
    CheckSucceeded,
    CheckFailed,
    SignedIn,
    SignInFailed,
    LoggedOut,
}

impl SessionStatus {
    /// Next state after `event`.
    ///
    /// Probe results only land while a probe is pending, so a slow startup
    /// check can never undo an explicit sign-in or logout.
    pub fn apply(self, event: SessionEvent) -> Self {
        use SessionEvent::*;

        match event {
            CheckStarted => Self::Checking,
            CheckSucceeded if self == Self::Checking => Self::Authenticated,
            CheckFailed if self == Self::Checking => Self::Unauthenticated,
            CheckSucceeded | CheckFailed => self,
            SignedIn => Self::Authenticated,
            SignInFailed | LoggedOut => Self::Unauthenticated,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }

    /// False while the startup probe has not answered yet.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Authenticated | Self::Unauthenticated)
    }
}

/// Capability handed to views: read the flag, request a transition.
#[derive(Clone, Copy)]
pub(crate) struct SessionHandle {
    status: RwSignal<SessionStatus>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(SessionStatus::Unknown),
        }
    }

    /// Tracked read.
    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    pub fn dispatch(&self, event: SessionEvent) {
        self.status.update(|s| {
            let next = s.apply(event);
            tracing::debug!(?event, from = ?*s, to = ?next, "session transition");
            *s = next;
        });
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}

/// One-shot startup probe. Any failure, network included, means signed out.
pub(crate) async fn probe_session<A: AuthApi>(api: &A) -> SessionEvent {
    match api.check_session().await {
        Ok(()) => {
            tracing::info!("existing session is valid");
            SessionEvent::CheckSucceeded
        }
        Err(e) => {
            tracing::info!("no valid session: {e}");
            SessionEvent::CheckFailed
        }
    }
}

/// Signs in and returns the transition to dispatch, plus the message to show
/// the user when it failed.
pub(crate) async fn sign_in<A: AuthApi>(
    api: &A,
    email: &str,
    password: &str,
) -> (SessionEvent, Option<String>) {
    let req = SigninRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    match api.signin(&req).await {
        Ok(()) => {
            tracing::info!("signed in");
            (SessionEvent::SignedIn, None)
        }
        Err(e) => {
            tracing::warn!("signin failed: {e}");
            (SessionEvent::SignInFailed, Some(e.user_message(LOGIN_FAILED_MESSAGE)))
        }
    }
}

pub(crate) async fn sign_up<A: AuthApi>(
    api: &A,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<(), String> {
    let req = SignupRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    api.signup(&req).await.map_err(|e| {
        tracing::warn!("signup failed: {e}");
        e.user_message(SIGNUP_FAILED_MESSAGE)
    })
}

/// Invalidates the backend session, then clears local artifacts whatever the
/// network outcome was.
pub(crate) async fn log_out<A: AuthApi, T: TokenStore>(api: &A, tokens: &T) -> SessionEvent {
    if let Err(e) = api.logout().await {
        tracing::error!("Error logging out: {e}");
    }
    tokens.clear_tokens();
    tracing::info!("logged out");
    SessionEvent::LoggedOut
}
