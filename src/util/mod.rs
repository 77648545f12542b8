//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser concerns (storage, timers, routing) sit behind small traits here so
//! the session and HTTP layers run unchanged in host tests.

pub mod auth;
pub mod navigation;
pub mod observer;
pub mod storage;
pub mod timer;
