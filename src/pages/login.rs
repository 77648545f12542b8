//! Login page: member number + password.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::ServicesHandle;
use crate::guards::{DASHBOARD_ROUTE, return_url_from_query};
use crate::state::auth::AuthState;

pub const SIGNING_IN_MESSAGE: &str = "Signing you in...";

/// Both fields are required; the member number is compared trimmed.
///
/// # Errors
///
/// Returns the message to show next to the form.
pub fn validate_login(member_number: &str, password: &str) -> Result<(), &'static str> {
    match (member_number.trim().is_empty(), password.is_empty()) {
        (true, true) => Err("Enter your member number and password."),
        (true, false) => Err("Member number is required."),
        (false, true) => Err("Password is required."),
        (false, false) => Ok(()),
    }
}

/// Where to go after signing in: a safe `returnUrl`, else the dashboard.
#[must_use]
pub fn post_login_destination(search: &str) -> String {
    return_url_from_query(search).unwrap_or_else(|| DASHBOARD_ROUTE.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let location = use_location();

    let member_number = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Already signed in: skip the form.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if auth.get().is_authenticated() && !busy.get_untracked() {
            navigate_home(DASHBOARD_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let number = member_number.get();
        let secret = password.get();
        if let Err(msg) = validate_login(&number, &secret) {
            error.set(Some(msg.to_owned()));
            return;
        }
        error.set(None);
        busy.set(true);

        let destination = post_login_destination(&location.search.get_untracked());
        let services = handle.get_value();
        let navigate = navigate.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            services.loading.show(SIGNING_IN_MESSAGE);
            let result = services.api.login(&number, &secret).await;
            services.loading.hide();
            busy.set(false);
            match result {
                Ok(user) => {
                    services.notifications.success("Welcome back", &format!("Login successful, {}!", user.display_name()));
                    navigate(&destination, NavigateOptions::default());
                }
                Err(err) => {
                    services.notifications.error("Login Failed", &err.message);
                    error.set(Some(err.message));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (services, navigate, destination, number, secret);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"SACCO Banking"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label for="member-number">"Member Number"</label>
                    <input
                        id="member-number"
                        class="auth-input"
                        type="text"
                        placeholder="MB1001"
                        prop:value=move || member_number.get()
                        on:input=move |ev| member_number.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    {move || error.get().map(|msg| view! { <p class="auth-form__error">{msg}</p> })}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "New member? " <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
