//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, loading, notifications)
//! and talks to the backend only through `BankApi`.

pub mod banking;
pub mod dashboard;
pub mod login;
pub mod members;
pub mod register;
