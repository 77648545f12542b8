//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The [`Services`] graph is not `Send`, so it is held in a local
//! `StoredValue` and shared through context as [`ServicesHandle`]. Each store
//! is mirrored into an `RwSignal` by subscription so components can render
//! reactively while the store remains the single writer.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{NavigateOptions, ParamSegment, StaticSegment};

use crate::components::loading_overlay::LoadingOverlay;
use crate::components::notification_toasts::NotificationToasts;
use crate::guards::DASHBOARD_ROUTE;
use crate::net::interceptor::LOGIN_ROUTE;
use crate::pages::banking::{LoansPage, SavingsPage, TransferPage};
use crate::pages::{
    dashboard::DashboardPage,
    login::LoginPage,
    members::{MemberDetailPage, MembersPage},
    register::RegisterPage,
};
use crate::services::Services;
use crate::state::auth::AuthState;
use crate::state::loading::LoadingSnapshot;
use crate::state::notifications::Notification;

pub type ServicesHandle = StoredValue<Services, LocalStorage>;

const LOGIN: &str = "login";
const REGISTER: &str = "register";
const DASHBOARD: &str = "dashboard";
const TRANSFER: &str = "transfer";
const SAVINGS: &str = "savings";
const LOANS: &str = "loans";
const MEMBERS: &str = "members";

/// First path segment of every registered top-level route.
pub const TOP_LEVEL_ROUTES: [&str; 7] = [LOGIN, REGISTER, DASHBOARD, TRANSFER, SAVINGS, LOANS, MEMBERS];

/// Root application component.
///
/// Provides the service graph plus signal mirrors of the session, loading,
/// and notification stores, then sets up client-side routing.
#[component]
pub fn App(services: Services) -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::from_session(&services.session.snapshot()));
    let loading = RwSignal::new(services.loading.snapshot());
    let notifications = RwSignal::new(services.notifications.items());

    let session_sub = services.session.subscribe(move |session| auth.set(AuthState::from_session(session)));
    let loading_sub = services.loading.subscribe(move |snap: &LoadingSnapshot| loading.set(snap.clone()));
    let toast_sub = services.notifications.subscribe(move |items: &Vec<Notification>| notifications.set(items.clone()));

    let handle: ServicesHandle = StoredValue::new_local(services);
    provide_context(handle);
    provide_context(auth);
    provide_context(loading);
    provide_context(notifications);

    on_cleanup(move || {
        handle.try_with_value(|s| {
            s.session.unsubscribe(session_sub);
            s.loading.unsubscribe(loading_sub);
            s.notifications.unsubscribe(toast_sub);
        });
    });

    let app_name = handle.with_value(|s| s.config.app_name.clone());

    view! {
        <Title text=app_name/>

        <Router>
            <NavigationBridge/>
            <LoadingOverlay/>
            <NotificationToasts/>
            <Routes fallback=|| view! { <Redirect path=LOGIN_ROUTE/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_ROUTE/> }/>
                <Route path=StaticSegment(LOGIN) view=LoginPage/>
                <Route path=StaticSegment(REGISTER) view=RegisterPage/>
                <Route path=StaticSegment(DASHBOARD) view=DashboardPage/>
                <Route path=StaticSegment(TRANSFER) view=TransferPage/>
                <Route path=StaticSegment(SAVINGS) view=SavingsPage/>
                <Route path=StaticSegment(LOANS) view=LoansPage/>
                <Route path=StaticSegment(MEMBERS) view=MembersPage/>
                <Route path=(StaticSegment(MEMBERS), ParamSegment("memberNumber")) view=MemberDetailPage/>
            </Routes>
        </Router>
    }
}

/// Forwards navigation requested outside the component tree (auth
/// interceptor, logout) into the router.
#[component]
fn NavigationBridge() -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let navigate = use_navigate();

    let sub = handle.with_value(|s| {
        s.navigation.subscribe(move |path: &String| navigate(path.as_str(), NavigateOptions::default()))
    });
    on_cleanup(move || {
        handle.try_with_value(|s| s.navigation.unsubscribe(sub));
    });
}
