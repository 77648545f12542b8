//! Member dashboard: balances, accounts, recent activity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. Loads dashboard data and accounts once
//! the authentication guard allows, and polls the unread-notification badge
//! in the background without driving the busy overlay.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::ServicesHandle;
use crate::components::sidebar::Sidebar;
use crate::guards::RouteGuard;
use crate::net::types::{Account, DashboardData};
use crate::state::auth::AuthState;
use crate::util::auth::{install_route_guard, route_target};

const GUARDS: &[RouteGuard] = &[RouteGuard::Authenticated];

/// `KES 1,234.50` style amount.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}KES {grouped}.{:02}", cents % 100)
}

/// Dashboard total, falling back to the sum of account balances.
#[must_use]
pub fn total_balance(data: Option<&DashboardData>, accounts: &[Account]) -> f64 {
    data.and_then(|d| d.total_balance).unwrap_or_else(|| accounts.iter().map(|a| a.balance).sum())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let target = route_target(&location.pathname.get_untracked(), &location.search.get_untracked());
    let allowed = install_route_guard(GUARDS, handle.with_value(crate::services::Services::guard_context), target, navigate);

    let data = RwSignal::new(None::<DashboardData>);
    let accounts = RwSignal::new(Vec::<Account>::new());
    let unread = RwSignal::new(0_u64);

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if !allowed.get() || requested.get_untracked() {
            return;
        }
        requested.set(true);
        let services = handle.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.dashboard().await {
                Ok(d) => {
                    let _ = data.try_set(Some(d));
                }
                Err(err) => {
                    services.notifications.error("Dashboard Unavailable", &err.message);
                }
            }
            match services.api.accounts().await {
                Ok(list) => {
                    let _ = accounts.try_set(list);
                }
                Err(err) => {
                    services.notifications.error("Accounts Unavailable", &err.message);
                }
            }
            let _ = unread.try_set(services.api.unread_notification_count().await);
        });
        #[cfg(not(feature = "csr"))]
        let _ = services;
    });

    let on_logout = move |_| {
        let services = handle.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move { services.logout().await });
        #[cfg(not(feature = "csr"))]
        let _ = services;
    };

    let greeting = move || auth.get().display_name().unwrap_or_else(|| "member".to_owned());
    let balance = move || format_currency(total_balance(data.get().as_ref(), &accounts.get()));

    let account_rows = move || {
        accounts
            .get()
            .into_iter()
            .map(|a| {
                view! {
                    <li class="account-row">
                        <span class="account-row__type">{a.account_type}</span>
                        <span class="account-row__number">{a.account_number}</span>
                        <span class="account-row__balance">{format_currency(a.balance)}</span>
                    </li>
                }
            })
            .collect_view()
    };

    let recent_rows = move || {
        data.get()
            .map(|d| d.recent_transactions)
            .unwrap_or_default()
            .into_iter()
            .map(|t| {
                view! {
                    <li class="txn-row">
                        <span class="txn-row__type">{t.transaction_type}</span>
                        <span class="txn-row__desc">{t.description}</span>
                        <span class="txn-row__amount">{format_currency(t.amount)}</span>
                    </li>
                }
            })
            .collect_view()
    };

    move || {
        allowed.get().then(|| {
            view! {
                <div class="layout">
                    <Sidebar/>
                    <main class="dashboard">
                        <header class="dashboard__header">
                            <h1>"Welcome, " {greeting}</h1>
                            <span class="badge" title="Unread notifications">{move || unread.get()}</span>
                            <button class="btn btn--secondary" on:click=on_logout>"Log out"</button>
                        </header>
                        <section class="dashboard__summary">
                            <h2>"Total balance"</h2>
                            <p class="dashboard__balance">{balance}</p>
                        </section>
                        <section>
                            <h2>"Accounts"</h2>
                            <ul class="account-list">{account_rows}</ul>
                        </section>
                        <section>
                            <h2>"Recent transactions"</h2>
                            <ul class="txn-list">{recent_rows}</ul>
                        </section>
                    </main>
                </div>
            }
        })
    }
}
