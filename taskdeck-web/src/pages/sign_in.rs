use shared::workflow::SignInForm;
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

#[function_component(SignInPage)]
pub fn sign_in_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let form = use_state(SignInForm::default);
    let loading = use_state(|| false);
    let navigator = use_navigator();

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
                match submitted.submit(services.client(), services.auth()).await {
                    Ok(note) => {
                        notify(&dispatch, note);
                        if let Some(nav) = navigator {
                            nav.push(&AppRoute::Dashboard);
                        }
                    }
                    Err(err) => notify(&dispatch, err.notification()),
                }
                loading.set(false);
            });
        })
    };

    let on_email_change = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                form.set(SignInForm {
                    email: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };

    let on_password_change = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                form.set(SignInForm {
                    password: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };

    let is_busy = *loading;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" {onsubmit}>
                    <h2 class="card-title text-2xl">{"Sign in"}</h2>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            value={form.email.clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            value={form.password.clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { "Signing in..." } else { "Sign in" }}
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        {"No account yet? "}
                        <Link<AppRoute> to={AppRoute::SignUp} classes="link link-primary">
                            {"Sign up"}
                        </Link<AppRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
