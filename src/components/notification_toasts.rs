//! Toast stack for the notification center.
//!
//! Each toast schedules its own removal after its duration; dismissing early
//! removes it immediately. Removing an id twice is harmless.

use std::time::Duration;

use leptos::prelude::*;

use crate::app::ServicesHandle;
use crate::state::notifications::Notification;

#[component]
pub fn NotificationToasts() -> impl IntoView {
    let items = expect_context::<RwSignal<Vec<Notification>>>();

    view! {
        <div class="toast-stack">
            <For each=move || items.get() key=|n| n.id let:note>
                <Toast note=note/>
            </For>
        </div>
    }
}

#[component]
fn Toast(note: Notification) -> impl IntoView {
    let handle = expect_context::<ServicesHandle>();
    let Notification { id, level, title, message, duration } = note;

    if let Some(after) = duration {
        schedule_removal(handle, id, after);
    }

    let on_dismiss = move |_| {
        handle.try_with_value(|s| s.notifications.remove(id));
    };
    let body = (!message.is_empty()).then(|| view! { <p class="toast__message">{message}</p> });

    view! {
        <div class=format!("toast {}", level.css_class()) role="alert">
            <div class="toast__body">
                <strong class="toast__title">{title}</strong>
                {body}
            </div>
            <button class="toast__close" aria-label="Dismiss" on:click=on_dismiss>"×"</button>
        </div>
    }
}

fn schedule_removal(handle: ServicesHandle, id: u64, after: Duration) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(after).await;
        handle.try_with_value(|s| s.notifications.remove(id));
    });
    #[cfg(not(feature = "csr"))]
    let _ = (handle, id, after);
}
