//! Member administration (admins only).
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded by authentication then admin role. Lists members page by page
//! with a search box and lets the admin suspend or reactivate accounts.
//! Status changes are sent once and the row is replaced with the backend's
//! answer. `/members/:memberNumber` shows one member under the same guards.

#[cfg(test)]
#[path = "members_test.rs"]
mod members_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_params_map};

use crate::app::ServicesHandle;
use crate::components::sidebar::Sidebar;
use crate::guards::RouteGuard;
use crate::net::api::{MemberAction, MemberQuery};
use crate::net::types::{Member, MemberStatus, Page};
use crate::pages::dashboard::format_currency;
use crate::services::Services;
use crate::util::auth::{install_route_guard, route_target};

const GUARDS: &[RouteGuard] = &[RouteGuard::Authenticated, RouteGuard::Admin];

/// The toggle offered for a member in `status`, if any.
#[must_use]
pub fn status_action(status: MemberStatus) -> Option<MemberAction> {
    match status {
        MemberStatus::Active => Some(MemberAction::Suspend),
        MemberStatus::Suspended | MemberStatus::Inactive => Some(MemberAction::Activate),
        MemberStatus::Pending | MemberStatus::Unknown => None,
    }
}

#[must_use]
pub fn action_label(action: MemberAction) -> &'static str {
    match action {
        MemberAction::Suspend => "Suspend",
        MemberAction::Activate => "Activate",
    }
}

#[must_use]
pub fn status_label(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Active => "Active",
        MemberStatus::Inactive => "Inactive",
        MemberStatus::Suspended => "Suspended",
        MemberStatus::Pending => "Pending",
        MemberStatus::Unknown => "Unknown",
    }
}

/// "Page 2 of 5 (47 members)"; zero-based page numbers are shown one-based.
#[must_use]
pub fn page_summary(page: &Page<Member>) -> String {
    let total_pages = page.total_pages.max(1);
    format!("Page {} of {} ({} members)", page.number + 1, total_pages, page.total_elements)
}

/// Swap in the updated member, matched by member number.
pub fn replace_member(rows: &mut [Member], updated: Member) {
    if let Some(slot) = rows.iter_mut().find(|m| m.member_number == updated.member_number) {
        *slot = updated;
    }
}

#[component]
pub fn MembersPage() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let location = use_location();
    let navigate = use_navigate();

    let target = route_target(&location.pathname.get_untracked(), &location.search.get_untracked());
    let allowed = install_route_guard(GUARDS, handle.with_value(Services::guard_context), target, navigate);

    let query = RwSignal::new(MemberQuery::default());
    let search_input = RwSignal::new(String::new());
    let page = RwSignal::new(None::<Page<Member>>);

    // Reload whenever the guard allows or the query changes.
    Effect::new(move || {
        let current = query.get();
        if !allowed.get() {
            return;
        }
        let services = handle.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.members(&current).await {
                Ok(result) => {
                    let _ = page.try_set(Some(result));
                }
                Err(err) => {
                    services.notifications.error("Could not load members", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (services, current);
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let term = search_input.get();
        query.update(|q| {
            q.search = term;
            q.page = 0;
        });
    };

    let on_toggle = move |member_number: String, action: MemberAction| {
        let services = handle.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.set_member_status(&member_number, action).await {
                Ok(updated) => {
                    let verb = match action {
                        MemberAction::Suspend => "suspended",
                        MemberAction::Activate => "activated",
                    };
                    services.notifications.success("Member Updated", &format!("{} has been {verb}.", updated.full_name()));
                    let _ = page.try_update(|p| {
                        if let Some(p) = p {
                            replace_member(&mut p.content, updated);
                        }
                    });
                }
                Err(err) => {
                    services.notifications.error("Update Failed", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (services, member_number, action);
    };

    let go_to = move |delta: i64| {
        query.update(|q| {
            let next = i64::from(q.page) + delta;
            q.page = u32::try_from(next.max(0)).unwrap_or(0);
        });
    };

    let rows = move || {
        page.get()
            .map(|p| p.content)
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                let action = status_action(m.status);
                let number = m.member_number.clone();
                view! {
                    <tr>
                        <td><a href=format!("/members/{}", m.member_number)>{m.member_number.clone()}</a></td>
                        <td>{m.full_name()}</td>
                        <td>{m.email.clone().unwrap_or_default()}</td>
                        <td>{status_label(m.status)}</td>
                        <td>
                            {action.map(|a| {
                                let number = number.clone();
                                view! {
                                    <button class="btn btn--small" on:click=move |_| on_toggle(number.clone(), a)>
                                        {action_label(a)}
                                    </button>
                                }
                            })}
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let summary = move || page.get().as_ref().map(page_summary).unwrap_or_default();
    let at_first = move || query.get().page == 0;
    let at_last = move || page.get().is_none_or(|p| p.number + 1 >= p.total_pages);

    move || {
        allowed.get().then(|| {
            view! {
                <div class="layout">
                    <Sidebar/>
                    <main class="members">
                        <h1>"Members"</h1>
                        <form class="members__search" on:submit=on_search>
                            <input
                                class="members__search-input"
                                type="search"
                                placeholder="Search by name, number, or email"
                                prop:value=move || search_input.get()
                                on:input=move |ev| search_input.set(event_target_value(&ev))
                            />
                            <button class="btn" type="submit">"Search"</button>
                        </form>
                        <table class="members__table">
                            <thead>
                                <tr>
                                    <th>"Number"</th>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                        <div class="members__pager">
                            <button class="btn" disabled=at_first on:click=move |_| go_to(-1)>"Previous"</button>
                            <span>{summary}</span>
                            <button class="btn" disabled=at_last on:click=move |_| go_to(1)>"Next"</button>
                        </div>
                    </main>
                </div>
            }
        })
    }
}

/// Label/value rows for the member detail view. Missing values show as `-`.
#[must_use]
pub fn member_details(member: &Member) -> Vec<(&'static str, String)> {
    let or_dash = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "-".to_owned());
    vec![
        ("Member number", member.member_number.clone()),
        ("Name", member.full_name()),
        ("Email", or_dash(&member.email)),
        ("Phone", or_dash(&member.phone_number)),
        ("Status", status_label(member.status).to_owned()),
        ("Joined", or_dash(&member.date_joined)),
        ("Savings", format_currency(member.savings_balance)),
        ("Loan balance", format_currency(member.loan_balance)),
    ]
}

#[component]
pub fn MemberDetailPage() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let location = use_location();
    let navigate = use_navigate();
    let params = use_params_map();

    let target = route_target(&location.pathname.get_untracked(), &location.search.get_untracked());
    let allowed = install_route_guard(GUARDS, handle.with_value(Services::guard_context), target, navigate);

    let member = RwSignal::new(None::<Member>);

    Effect::new(move || {
        let number = params.with(|p| p.get("memberNumber")).unwrap_or_default();
        if !allowed.get() || number.is_empty() {
            return;
        }
        let services = handle.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match services.api.member(&number).await {
                Ok(found) => {
                    let _ = member.try_set(Some(found));
                }
                Err(err) => {
                    services.notifications.error("Member Unavailable", &err.message);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (services, number);
    });

    let rows = move || {
        member
            .get()
            .as_ref()
            .map(member_details)
            .unwrap_or_default()
            .into_iter()
            .map(|(label, value)| {
                view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                }
            })
            .collect_view()
    };

    move || {
        allowed.get().then(|| {
            view! {
                <div class="layout">
                    <Sidebar/>
                    <main class="member-detail">
                        <a class="member-detail__back" href="/members">"Back to members"</a>
                        <h1>{move || member.get().map(|m| m.full_name()).unwrap_or_default()}</h1>
                        <dl class="member-detail__fields">{rows}</dl>
                    </main>
                </div>
            }
        })
    }
}
