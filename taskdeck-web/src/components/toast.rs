use gloo_timers::callback::Timeout;
use shared::notify::NotificationLevel;
use yew::{Callback, Html, classes, function_component, html, use_effect_with};
use yewdux::prelude::{use_dispatch, use_selector};

use crate::models::app_state::{AppState, dismiss};

/// How long a notification stays on screen.
const TOAST_MILLIS: u32 = 3_000;

fn alert_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "alert-success",
        NotificationLevel::Info => "alert-info",
        NotificationLevel::Error => "alert-error",
    }
}

#[function_component(Toast)]
pub fn toast() -> Html {
    let dispatch = use_dispatch::<AppState>();
    let current = use_selector(|state: &AppState| state.toast.clone());

    {
        let dispatch = dispatch.clone();
        use_effect_with((*current).clone(), move |note| {
            let timeout = note
                .is_some()
                .then(|| Timeout::new(TOAST_MILLIS, move || dismiss(&dispatch)));
            move || drop(timeout)
        });
    }

    let Some(note) = (*current).clone() else {
        return html! {};
    };
    let onclick = Callback::from(move |_| dismiss(&dispatch));

    html! {
        <div class="toast toast-top toast-end z-50">
            <div
                role="alert"
                class={classes!("alert", alert_class(note.level))}
                {onclick}
            >
                <span>{note.message}</span>
            </div>
        </div>
    }
}
