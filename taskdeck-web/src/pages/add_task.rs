use shared::workflow::TaskForm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::{
    components::task_form::TaskFormView,
    models::app_state::{AppState, notify},
    routes::AppRoute,
    services::use_services,
};

#[function_component(AddTaskPage)]
pub fn add_task_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let form = use_state(TaskForm::default);
    let saving = use_state(|| false);
    let navigator = use_navigator();

    let on_change = {
        let form = form.clone();
        Callback::from(move |next: TaskForm| form.set(next))
    };

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        Callback::from(move |()| {
            let submitted = (*form).clone();
            let form = form.clone();
            let services = services.clone();
            let dispatch = dispatch.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            saving.set(true);
            spawn_local(async move {
                match submitted.create(services.client(), services.auth()).await {
                    Ok((_, note)) => {
                        notify(&dispatch, note);
                        form.set(TaskForm::default());
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

    html! {
        <TaskFormView
            heading="Add Task"
            submit_label="Add Task"
            form={(*form).clone()}
            {on_change}
            {on_submit}
            busy={*saving}
        />
    }
}
