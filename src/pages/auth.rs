use crate::app::AppServices;
use crate::components::ui::{
    Button, ButtonSize, Card, CardContent, CardDescription, CardHeader, CardTitle, BoundInput,
    ErrorAlert, Label, Spinner,
};
use crate::session::{sign_in, sign_up, use_session};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
fn AuthShell(
    title: &'static str,
    description: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <span class="text-sm font-medium text-foreground">"AI Notes"</span>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">{title}</CardTitle>
                        <CardDescription class="text-xs">{description}</CardDescription>
                    </CardHeader>
                    <CardContent>{children()}</CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn SubmitButton(loading: RwSignal<bool>, idle: &'static str, busy: &'static str) -> impl IntoView {
    view! {
        <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
            <span class="inline-flex items-center gap-2">
                <Show when=move || loading.get()>
                    <Spinner />
                </Show>
                {move || if loading.get() { busy } else { idle }}
            </span>
        </Button>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let services = expect_context::<AppServices>();
    let session = use_session();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let auth = services.auth.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let (event, message) = sign_in(&auth, &email_val, &password_val).await;
            session.dispatch(event);
            match message {
                None => navigate.with_value(|nav| nav("/dashboard", Default::default())),
                Some(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
    };

    view! {
        <AuthShell title="Log in" description="Use your email and password to continue.">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <div class="flex flex-col gap-1.5">
                    <Label html_for="email" class="text-xs">"Email"</Label>
                    <BoundInput
                        id="email"
                        r#type="email"
                        placeholder="you@example.com"
                        bind_value=email
                        required=true
                        class="h-8 text-sm"
                    />
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="password" class="text-xs">"Password"</Label>
                    <BoundInput
                        id="password"
                        r#type="password"
                        placeholder="••••••••"
                        bind_value=password
                        required=true
                        class="h-8 text-sm"
                    />
                </div>

                <ErrorAlert error=error />
                <SubmitButton loading=loading idle="Continue" busy="Signing in..." />

                <div class="pt-1 text-xs text-muted-foreground">
                    "No account? "
                    <a class="text-primary underline underline-offset-4" href="/signup">"Sign up"</a>
                </div>
            </form>
        </AuthShell>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let full_name: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let services = expect_context::<AppServices>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let full_name_val = full_name.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let auth = services.auth.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match sign_up(&auth, &full_name_val, &email_val, &password_val).await {
                Ok(()) => {
                    tracing::info!("account created");
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(message) => error.set(Some(message)),
            }
            loading.set(false);
        });
    };

    view! {
        <AuthShell title="Create account" description="Sign up to start taking notes.">
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <div class="flex flex-col gap-1.5">
                    <Label html_for="full_name" class="text-xs">"Full name"</Label>
                    <BoundInput
                        id="full_name"
                        placeholder="Ada Lovelace"
                        bind_value=full_name
                        required=true
                        class="h-8 text-sm"
                    />
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="email" class="text-xs">"Email"</Label>
                    <BoundInput
                        id="email"
                        r#type="email"
                        placeholder="you@example.com"
                        bind_value=email
                        required=true
                        class="h-8 text-sm"
                    />
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="password" class="text-xs">"Password"</Label>
                    <BoundInput
                        id="password"
                        r#type="password"
                        placeholder="••••••••"
                        bind_value=password
                        required=true
                        class="h-8 text-sm"
                    />
                </div>

                <ErrorAlert error=error />
                <SubmitButton loading=loading idle="Sign up" busy="Creating account..." />

                <div class="pt-1 text-xs text-muted-foreground">
                    "Already have an account? "
                    <a class="text-primary underline underline-offset-4" href="/login">"Log in"</a>
                </div>
            </form>
        </AuthShell>
    }
}
