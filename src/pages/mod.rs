mod auth;
mod dashboard;

pub(crate) use auth::{LoginPage, SignupPage};
pub(crate) use dashboard::DashboardPage;

use crate::session::use_session;
use leptos::prelude::*;
use leptos_router::components::Redirect;

/// Renders `children` only for an authenticated session; a settled
/// unauthenticated session is sent to the login page.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    // Store children so the view closure stays `Fn`.
    let children = StoredValue::new(children);

    move || {
        let status = session.status();
        if !status.is_settled() {
            view! {
                <div class="flex min-h-screen items-center justify-center text-sm text-muted-foreground">
                    "Loading..."
                </div>
            }
            .into_any()
        } else if status.is_authenticated() {
            children.with_value(|c| c()).into_any()
        } else {
            view! { <Redirect path="/login" /> }.into_any()
        }
    }
}
