use shared::workflow::{TaskForm, load_task};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::{
    components::{loading::Loading, task_form::TaskFormView},
    models::app_state::{AppState, notify},
    routes::AppRoute,
    services::use_services,
};

#[derive(Properties, PartialEq)]
pub struct EditTaskProps {
    pub id: String,
}

/// Loads the task once, then edits it in place. A failed load returns to
/// the dashboard.
#[function_component(EditTaskPage)]
pub fn edit_task_page(props: &EditTaskProps) -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let form = use_state(|| None::<TaskForm>);
    let saving = use_state(|| false);
    let navigator = use_navigator();

    {
        let form = form.clone();
        let services = services.clone();
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        use_effect_with(props.id.clone(), move |id| {
            let id = id.clone();
            form.set(None);
            spawn_local(async move {
                match load_task(services.client(), services.auth(), &id).await {
                    Ok(loaded) => form.set(Some(loaded)),
                    Err(err) => {
                        notify(&dispatch, err.notification());
                        if let Some(nav) = navigator {
                            nav.push(&AppRoute::Dashboard);
                        }
                    }
                }
            });
            || ()
        });
    }

    let on_change = {
        let form = form.clone();
        Callback::from(move |next: TaskForm| form.set(Some(next)))
    };

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let id = props.id.clone();
        Callback::from(move |()| {
            let Some(submitted) = (*form).clone() else {
                return;
            };
            let id = id.clone();
            let services = services.clone();
            let dispatch = dispatch.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            saving.set(true);
            spawn_local(async move {
                match submitted.update(services.client(), services.auth(), &id).await {
                    Ok((_, note)) => {
                        notify(&dispatch, note);
                        if let Some(nav) = navigator {
                            nav.push(&AppRoute::Dashboard);
                        }
                    }
                    Err(err) => notify(&dispatch, err.notification()),
                }
                saving.set(false);
            });
        })
    };

    match (*form).clone() {
        None => html! { <Loading /> },
        Some(current) => html! {
            <TaskFormView
                heading="Edit Task"
                submit_label="Update Task"
                form={current}
                {on_change}
                {on_submit}
                busy={*saving}
            />
        },
    }
}
