use wasm_bindgen::prelude::*;
use yew::{ContextProvider, Html, function_component, html, use_effect_with, use_state};
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::{
    components::toast::Toast,
    config::WebConfig,
    models::app_state::AppState,
    routes::{AppRoute, switch},
    services::Services,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[function_component(App)]
pub fn app() -> Html {
    let dispatch = use_dispatch::<AppState>();
    let services = use_state(|| Services::new(WebConfig::default()));

    {
        let services = (*services).clone();
        use_effect_with((), move |_| {
            let auth = services.auth().clone();
            let subscription = auth.subscribe(move |snapshot| {
                let snapshot = snapshot.clone();
                dispatch.reduce_mut(move |state| state.auth = snapshot);
            });
            auth.hydrate();
            log(&format!(
                "Session restored: {}",
                if auth.is_authenticated() { "yes" } else { "no" }
            ));
            move || {
                auth.unsubscribe(subscription);
            }
        });
    }

    html! {
        <ContextProvider<Services> context={(*services).clone()}>
            <BrowserRouter>
                <Toast />
                <Switch<AppRoute> render={switch} />
            </BrowserRouter>
        </ContextProvider<Services>>
    }
}
