//! Member banking sections: transfers, savings goals, loans.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated routes reached from the sidebar. Each one lists what the
//! backend reports for the signed-in member; balances, schedules, and
//! projections are computed server-side and shown as received.

#[cfg(test)]
#[path = "banking_test.rs"]
mod banking_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use serde_json::Value;

use crate::app::ServicesHandle;
use crate::components::sidebar::Sidebar;
use crate::guards::RouteGuard;
use crate::net::types::{Account, SavingsGoal, Transaction};
use crate::pages::dashboard::format_currency;
use crate::services::Services;
use crate::util::auth::{install_route_guard, route_target};

const GUARDS: &[RouteGuard] = &[RouteGuard::Authenticated];

const RECENT_LIMIT: u32 = 10;

/// `"45%"`, clamped to 0..=100.
#[must_use]
pub fn progress_label(goal: &SavingsGoal) -> String {
    let pct = goal.progress_percentage.clamp(0.0, 100.0);
    format!("{pct:.0}%")
}

/// One loan row as sent by `GET /loans`: type, amount, status.
#[must_use]
pub fn loan_summary(loan: &Value) -> (String, String, String) {
    let amount = ["amount", "principal", "loan_amount"]
        .iter()
        .find_map(|k| loan.get(*k).and_then(Value::as_f64))
        .map_or_else(|| "-".to_owned(), format_currency);
    (first_text(loan, &["loan_type", "loanType", "type"]), amount, first_text(loan, &["status"]))
}

fn first_text(value: &Value, keys: &[&str]) -> String {
    keys.iter().find_map(|k| value.get(*k).and_then(Value::as_str)).unwrap_or("-").to_owned()
}

/// Guard the current route and run `load` once the guard allows.
fn guarded_section(load: impl Fn(Services) + 'static) -> RwSignal<bool> {
    let handle = expect_context::<ServicesHandle>();
    let location = use_location();
    let navigate = use_navigate();

    let target = route_target(&location.pathname.get_untracked(), &location.search.get_untracked());
    let allowed = install_route_guard(GUARDS, handle.with_value(Services::guard_context), target, navigate);

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if !allowed.get() || requested.get_untracked() {
            return;
        }
        requested.set(true);
        load(handle.get_value());
    });
    allowed
}

#[component]
fn Section(title: &'static str, allowed: RwSignal<bool>, children: ChildrenFn) -> impl IntoView {
    move || {
        allowed.get().then(|| {
            view! {
                <div class="layout">
                    <Sidebar/>
                    <main class="section">
                        <h1>{title}</h1>
                        {children()}
                    </main>
                </div>
            }
        })
    }
}

#[component]
pub fn TransferPage() -> impl IntoView {
    let accounts = RwSignal::new(Vec::<Account>::new());
    let recent = RwSignal::new(Vec::<Transaction>::new());

    let allowed = guarded_section(move |services| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.accounts().await {
                Ok(list) => {
                    let _ = accounts.try_set(list);
                }
                Err(err) => {
                    services.notifications.error("Accounts Unavailable", &err.message);
                }
            }
            match services.api.transactions(0, RECENT_LIMIT, None).await {
                Ok(list) => {
                    let _ = recent.try_set(list.items);
                }
                Err(err) => {
                    services.notifications.error("Transactions Unavailable", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = services;
    });

    view! {
        <Section title="Transfers" allowed=allowed>
            <h2>"From account"</h2>
            <ul class="account-list">
                {move || {
                    accounts
                        .get()
                        .into_iter()
                        .map(|a| {
                            view! {
                                <li class="account-row">
                                    <span class="account-row__number">{a.account_number}</span>
                                    <span class="account-row__balance">{format_currency(a.balance)}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <h2>"Recent activity"</h2>
            <ul class="txn-list">
                {move || {
                    recent
                        .get()
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
                }}
            </ul>
        </Section>
    }
}

#[component]
pub fn SavingsPage() -> impl IntoView {
    let goals = RwSignal::new(Vec::<SavingsGoal>::new());

    let allowed = guarded_section(move |services| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.savings_goals().await {
                Ok(list) => {
                    let _ = goals.try_set(list);
                }
                Err(err) => {
                    services.notifications.error("Savings Unavailable", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = services;
    });

    view! {
        <Section title="Savings" allowed=allowed>
            <ul class="goal-list">
                {move || {
                    goals
                        .get()
                        .into_iter()
                        .map(|g| {
                            let progress = progress_label(&g);
                            view! {
                                <li class="goal-row">
                                    <span class="goal-row__name">{g.goal_name}</span>
                                    <span class="goal-row__saved">{format_currency(g.current_amount)}</span>
                                    <span class="goal-row__target">{format_currency(g.target_amount)}</span>
                                    <span class="goal-row__progress">{progress}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </Section>
    }
}

#[component]
pub fn LoansPage() -> impl IntoView {
    let loans = RwSignal::new(Vec::<Value>::new());

    let allowed = guarded_section(move |services| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.loans().await {
                Ok(list) => {
                    let _ = loans.try_set(list);
                }
                Err(err) => {
                    services.notifications.error("Loans Unavailable", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = services;
    });

    view! {
        <Section title="Loans" allowed=allowed>
            <ul class="loan-list">
                {move || {
                    loans
                        .get()
                        .iter()
                        .map(loan_summary)
                        .map(|(kind, amount, status)| {
                            view! {
                                <li class="loan-row">
                                    <span class="loan-row__type">{kind}</span>
                                    <span class="loan-row__amount">{amount}</span>
                                    <span class="loan-row__status">{status}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </Section>
    }
}
