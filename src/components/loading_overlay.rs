//! Full-screen busy indicator.

use leptos::prelude::*;

use crate::state::loading::LoadingSnapshot;

/// Visible while any tracked request or manual loading session is active.
#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let loading = expect_context::<RwSignal<LoadingSnapshot>>();

    move || {
        let snap = loading.get();
        snap.busy.then(|| {
            view! {
                <div class="loading-overlay" role="status" aria-live="polite">
                    <div class="loading-overlay__spinner"></div>
                    <p class="loading-overlay__message">{snap.message}</p>
                </div>
            }
        })
    }
}
