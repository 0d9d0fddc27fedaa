use shared::workflow::SignUpForm;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::{
    models::app_state::{AppState, notify},
    routes::AppRoute,
    services::use_services,
};

#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Password,
    Confirm,
}

fn with_field(form: &SignUpForm, field: Field, value: String) -> SignUpForm {
    let mut form = form.clone();
    match field {
        Field::Name => form.name = value,
        Field::Email => form.email = value,
        Field::Password => form.password = value,
        Field::Confirm => form.confirm_password = value,
    }
    form
}

/// Registration. A successful sign-up does not log in; the visitor is sent
/// to the sign-in page instead.
#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let form = use_state(SignUpForm::default);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let oninput = |field: Field| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                form.set(with_field(&form, field, input.value()));
            }
        })
    };

    let onsubmit = {
        let form = form.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submitted = (*form).clone();
            let services = services.clone();
            let dispatch = dispatch.clone();
            let loading = loading.clone();
            let navigator = navigator.clone();
            loading.set(true);
            spawn_local(async move {
                match submitted.submit(services.client()).await {
                    Ok(note) => {
                        notify(&dispatch, note);
                        if let Some(nav) = navigator {
                            nav.push(&AppRoute::SignIn);
                        }
                    }
                    Err(err) => notify(&dispatch, err.notification()),
                }
                loading.set(false);
            });
        })
    };

    let is_busy = *loading;
    let input = |id: &'static str, label: &'static str, kind: &'static str, value: &str, field| {
        html! {
            <div class="form-control">
                <label class="label" for={id}>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    {id}
                    class="input input-bordered"
                    type={kind}
                    value={value.to_string()}
                    oninput={oninput(field)}
                />
            </div>
        }
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{"Sign up"}</h2>
                    {input("name", "Name", "text", &form.name, Field::Name)}
                    {input("email", "Email", "email", &form.email, Field::Email)}
                    {input("password", "Password", "password", &form.password, Field::Password)}
                    {input(
                        "confirm-password",
                        "Confirm password",
                        "password",
                        &form.confirm_password,
                        Field::Confirm,
                    )}
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { "Signing up..." } else { "Sign up" }}
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"Already registered? "}
                        <Link<AppRoute> to={AppRoute::SignIn} classes="link link-primary">
                            {"Sign in"}
                        </Link<AppRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
