use crate::api::{AuthClient, NotesClient};
use crate::config::EnvConfig;
use crate::notes::NotesSync;
use crate::pages::{DashboardPage, LoginPage, RequireSession, SignupPage};
use crate::session::{probe_session, SessionEvent, SessionHandle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

/// Backend clients shared by every page.
#[derive(Clone)]
pub(crate) struct AppServices {
    pub auth: AuthClient,
    pub notes: NotesSync<NotesClient>,
}

impl AppServices {
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            auth: AuthClient::new(config.auth_api_url.clone()),
            notes: NotesSync::new(NotesClient::new(
                config.notes_api_url.clone(),
                config.notes_with_credentials,
            )),
        }
    }
}

#[component]
pub(crate) fn App(config: EnvConfig) -> impl IntoView {
    let services = AppServices::from_config(&config);
    let session = SessionHandle::new();
    provide_context(session);
    provide_context(services.clone());

    // One-shot probe of the session cookie.
    session.dispatch(SessionEvent::CheckStarted);
    spawn_local(async move {
        let event = probe_session(&services.auth).await;
        session.dispatch(event);
    });

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=LoginPage />
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=SignupPage />
                <Route path=path!("dashboard") view=move || view! {
                    <RequireSession>
                        <DashboardPage />
                    </RequireSession>
                } />
            </Routes>
        </Router>
    }
}
