use shared::{models::TaskStatus, workflow::TaskForm};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TaskFormViewProps {
    pub heading: AttrValue,
    pub submit_label: AttrValue,
    pub form: TaskForm,
    pub on_change: Callback<TaskForm>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
}

/// Title, description and status inputs shared by the add and edit pages.
#[function_component(TaskFormView)]
pub fn task_form_view(props: &TaskFormViewProps) -> Html {
    let on_title = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(TaskForm {
                    title: input.value(),
                    ..form.clone()
                });
            }
        })
    };

    let on_description = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlTextAreaElement>() {
                on_change.emit(TaskForm {
                    description: input.value(),
                    ..form.clone()
                });
            }
        })
    };

    let on_status = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            let status = event
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| TaskStatus::parse(&select.value()));
            if let Some(status) = status {
                on_change.emit(TaskForm {
                    status,
                    ..form.clone()
                });
            }
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="card w-full max-w-xl mx-auto shadow-lg bg-base-100">
            <form class="card-body" {onsubmit}>
                <h2 class="card-title text-2xl">{props.heading.clone()}</h2>
                <div class="form-control">
                    <label class="label" for="title">
                        <span class="label-text">{"Title"}</span>
                    </label>
                    <input
                        id="title"
                        class="input input-bordered"
                        type="text"
                        value={props.form.title.clone()}
                        oninput={on_title}
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="description">
                        <span class="label-text">{"Description"}</span>
                    </label>
                    <textarea
                        id="description"
                        class="textarea textarea-bordered"
                        value={props.form.description.clone()}
                        oninput={on_description}
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="status">
                        <span class="label-text">{"Status"}</span>
                    </label>
                    <select id="status" class="select select-bordered" onchange={on_status}>
                        { for TaskStatus::all().map(|status| html! {
                            <option
                                value={status.as_str()}
                                selected={status == props.form.status}
                            >
                                {status.as_str()}
                            </option>
                        })}
                    </select>
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" type="submit" disabled={props.busy}>
                        {if props.busy { "Saving..." } else { props.submit_label.as_str() }}
                    </button>
                </div>
            </form>
        </div>
    }
}
