//! Side navigation with role-gated entries.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

pub const MENU: [MenuItem; 5] = [
    MenuItem { path: "/dashboard", label: "Dashboard", icon: "fa-tachometer-alt", admin_only: false },
    MenuItem { path: "/transfer", label: "Transfers", icon: "fa-exchange-alt", admin_only: false },
    MenuItem { path: "/savings", label: "Savings", icon: "fa-piggy-bank", admin_only: false },
    MenuItem { path: "/loans", label: "Loans", icon: "fa-money-bill-wave", admin_only: false },
    MenuItem { path: "/members", label: "Members", icon: "fa-users", admin_only: true },
];

/// Entries the signed-in member may see.
#[must_use]
pub fn visible_items(state: &AuthState) -> Vec<MenuItem> {
    let admin = state.is_admin();
    MENU.iter().filter(|item| admin || !item.admin_only).copied().collect()
}

/// Exact match or a sub-route of `item_path`.
#[must_use]
pub fn is_active(current: &str, item_path: &str) -> bool {
    current == item_path || current.strip_prefix(item_path).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    let items = move || {
        let current = location.pathname.get();
        visible_items(&auth.get())
            .into_iter()
            .map(|item| {
                let class = if is_active(&current, item.path) { "sidebar__item sidebar__item--active" } else { "sidebar__item" };
                view! {
                    <a class=class href=item.path>
                        <i class=format!("fas {}", item.icon)></i>
                        <span>{item.label}</span>
                    </a>
                }
            })
            .collect_view()
    };

    view! { <nav class="sidebar">{items}</nav> }
}
