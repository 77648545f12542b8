//! Networking modules for the banking REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` wraps every request with interceptors, timeout, retry, and error
//! normalization; `api` exposes the typed endpoints on top of it; `types`
//! defines the wire schema.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod retry;
pub mod types;
