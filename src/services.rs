//! Application service graph.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at startup. Owns the single [`SessionStore`] and wires it, the
//! loading tracker, and the navigation channel into the API client's
//! interceptors. Components receive these through Leptos context; nothing
//! else constructs a second store or client.

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use std::rc::Rc;

use crate::config::AppConfig;
use crate::guards::GuardContext;
use crate::net::api::BankApi;
use crate::net::client::ApiClient;
use crate::net::http::Transport;
use crate::net::interceptor::{AuthInterceptor, LOGIN_ROUTE, LoadingInterceptor};
use crate::state::loading::LoadingTracker;
use crate::state::notifications::NotificationCenter;
use crate::state::session::SessionStore;
use crate::util::navigation::{NavigationRequests, Navigator};
use crate::util::storage::Storage;
use crate::util::timer::Timer;

pub const LOGGED_OUT_TITLE: &str = "Logged Out";
pub const LOGGED_OUT_MESSAGE: &str = "You have been successfully logged out";

#[derive(Clone)]
pub struct Services {
    pub config: Rc<AppConfig>,
    pub session: Rc<SessionStore>,
    pub loading: Rc<LoadingTracker>,
    pub notifications: Rc<NotificationCenter>,
    pub navigation: Rc<NavigationRequests>,
    pub api: BankApi,
}

impl Services {
    /// Wire the graph and restore any persisted session.
    #[must_use]
    pub fn new(config: AppConfig, storage: Box<dyn Storage>, transport: Rc<dyn Transport>, timer: Rc<dyn Timer>) -> Self {
        let session = Rc::new(SessionStore::new(storage));
        let loading = Rc::new(LoadingTracker::new());
        let notifications = Rc::new(NotificationCenter::new());
        let navigation = Rc::new(NavigationRequests::new());

        let navigator: Rc<dyn Navigator> = navigation.clone();
        let client = ApiClient::new(&config, transport, timer)
            .with_interceptor(Rc::new(AuthInterceptor::new(Rc::clone(&session), navigator)))
            .with_interceptor(Rc::new(LoadingInterceptor::new(Rc::clone(&loading))));
        let api = BankApi::new(client, Rc::clone(&session));

        if session.restore() {
            log::info!("resumed previous session");
        }

        Self { config: Rc::new(config), session, loading, notifications, navigation, api }
    }

    /// Browser wiring: `localStorage`, `fetch`, and `setTimeout`.
    #[cfg(feature = "csr")]
    #[must_use]
    pub fn browser(config: AppConfig) -> Self {
        use crate::net::http::BrowserTransport;
        use crate::util::storage::BrowserStorage;
        use crate::util::timer::BrowserTimer;

        Self::new(config, Box::new(BrowserStorage), Rc::new(BrowserTransport), Rc::new(BrowserTimer))
    }

    #[must_use]
    pub fn guard_context(&self) -> GuardContext {
        GuardContext {
            session: Rc::clone(&self.session),
            api: self.api.clone(),
            notifications: Rc::clone(&self.notifications),
        }
    }

    /// Full sign-out: backend call (failures ignored), local clear, toast, and
    /// a trip to the login page.
    pub async fn logout(&self) {
        self.api.logout().await;
        self.notifications.info(LOGGED_OUT_TITLE, LOGGED_OUT_MESSAGE);
        self.navigation.navigate(LOGIN_ROUTE);
    }
}
