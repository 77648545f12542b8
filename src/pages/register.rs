//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::ServicesHandle;
#[cfg(feature = "csr")]
use crate::net::interceptor::LOGIN_ROUTE;
use crate::net::types::RegisterRequest;

pub const CREATING_ACCOUNT_MESSAGE: &str = "Creating your account...";

/// Form field values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl RegisterForm {
    #[must_use]
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            national_id: Some(self.national_id.trim().to_owned()),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

/// Every rule the form breaks, in field order. Empty means valid.
#[must_use]
pub fn validate_registration(form: &RegisterForm) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if form.national_id.trim().chars().count() < 10 {
        problems.push("National ID must be at least 10 characters.");
    }
    if !name_ok(&form.first_name) {
        problems.push("First name must be 2 to 50 characters.");
    }
    if !name_ok(&form.last_name) {
        problems.push("Last name must be 2 to 50 characters.");
    }
    if !email_ok(form.email.trim()) {
        problems.push("Enter a valid email address.");
    }
    if !phone_ok(form.phone_number.trim()) {
        problems.push("Phone number must look like 254712345678.");
    }
    if form.password.chars().count() < 8 {
        problems.push("Password must be at least 8 characters.");
    }
    if form.password != form.confirm_password {
        problems.push("Passwords do not match.");
    }
    if !form.agree_to_terms {
        problems.push("You must accept the terms.");
    }
    problems
}

fn name_ok(name: &str) -> bool {
    (2..=50).contains(&name.trim().chars().count())
}

fn email_ok(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.starts_with('.') && domain.contains('.') && !email.contains(char::is_whitespace)
}

/// Kenyan MSISDN: `254` followed by nine digits.
fn phone_ok(phone: &str) -> bool {
    phone.len() == 12 && phone.starts_with("254") && phone.bytes().all(|b| b.is_ascii_digit())
}

type Getter = fn(&RegisterForm) -> String;
type Setter = fn(&mut RegisterForm, String);

fn text_field(form: RwSignal<RegisterForm>, label: &'static str, kind: &'static str, get: Getter, set: Setter) -> impl IntoView {
    view! {
        <label class="auth-label">
            {label}
            <input
                class="auth-input"
                type=kind
                prop:value=move || get(&form.get())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let problems = RwSignal::new(Vec::<&'static str>::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = form.get();
        let found = validate_registration(&current);
        if !found.is_empty() {
            handle.with_value(|s| s.notifications.warning("Invalid Form", "Please fill in all required fields correctly."));
            problems.set(found);
            return;
        }
        problems.set(Vec::new());
        busy.set(true);

        let services = handle.get_value();
        let navigate = navigate.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            services.loading.show(CREATING_ACCOUNT_MESSAGE);
            let result = services.api.register(&current.to_request()).await;
            services.loading.hide();
            busy.set(false);
            match result {
                Ok(_) => {
                    services.notifications.success(
                        "Registration Complete",
                        "Account created successfully! Please sign in with your credentials.",
                    );
                    navigate(LOGIN_ROUTE, NavigateOptions::default());
                }
                Err(err) => {
                    services.notifications.error("Registration Failed", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (services, navigate, current);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Become a Member"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {text_field(form, "National ID", "text", |f| f.national_id.clone(), |f, v| f.national_id = v)}
                    {text_field(form, "First Name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                    {text_field(form, "Last Name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    {text_field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {text_field(form, "Phone Number", "tel", |f| f.phone_number.clone(), |f, v| f.phone_number = v)}
                    {text_field(form, "Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {text_field(form, "Confirm Password", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                    <label class="auth-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.get().agree_to_terms
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.agree_to_terms = checked);
                            }
                        />
                        "I agree to the terms and conditions"
                    </label>
                    <ul class="auth-form__errors">
                        {move || problems.get().into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                    </ul>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>"Create Account"</button>
                </form>
                <p class="auth-card__footer">"Already a member? " <a href="/login">"Sign in"</a></p>
            </div>
        </div>
    }
}
