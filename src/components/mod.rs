//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render application chrome (busy overlay, toasts, navigation)
//! from the signal mirrors the app root provides through context.

pub mod loading_overlay;
pub mod notification_toasts;
pub mod sidebar;
