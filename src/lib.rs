//! Browser client for the SACCO member banking portal.
//!
//! The core is the session store, the HTTP client wrapper with its auth and
//! loading interceptors, and the route guards. Pages and components are thin
//! Leptos views over those services.

pub mod app;
pub mod components;
pub mod config;
pub mod guards;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();

    let (config, config_error) = match config::AppConfig::from_build_env() {
        Ok(config) => (config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    let level = if config.enable_logging { log::Level::Debug } else { log::Level::Warn };
    let _ = console_log::init_with_level(level);
    if let Some(err) = config_error {
        log::error!("invalid build configuration, using defaults: {err}");
    }
    log::info!("starting {} against {}", config.app_name, config.api_url);

    leptos::mount::mount_to_body(move || {
        let services = services::Services::browser(config);
        view! { <app::App services=services/> }
    });
}
