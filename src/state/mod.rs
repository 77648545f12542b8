//! Shared client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain single-threaded stores with explicit subscribe/unsubscribe. The app
//! root bridges each one into a Leptos signal for rendering.

pub mod auth;
pub mod loading;
pub mod notifications;
pub mod roles;
pub mod session;
