use shared::workflow::sign_out;
use wasm_bindgen::prelude::*;
use yew::{Callback, Children, Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::{
    models::app_state::{AppState, notify},
    routes::AppRoute,
    services::use_services,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub current_route: Option<AppRoute>,
}

fn nav_item(route: AppRoute, label: &'static str, current: Option<&AppRoute>) -> Html {
    let active = current == Some(&route);
    html! {
        <li>
            <Link<AppRoute> to={route} classes={classes!(active.then_some("menu-active"))}>
                {label}
            </Link<AppRoute>>
        </li>
    }
}

/// Navigation bar and page frame for signed-in views.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let user = use_selector(|state: &AppState| state.auth.user.clone());
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_| {
        log("Signing out");
        notify(&dispatch, sign_out(services.auth()));
        if let Some(nav) = &navigator {
            nav.push(&AppRoute::SignIn);
        }
    });

    let current = props.current_route.as_ref();

    html! {
    <>
        <nav class="navbar justify-between bg-base-300">
            <Link<AppRoute> to={AppRoute::Dashboard} classes="btn btn-ghost text-lg">
                {"TaskDeck"}
            </Link<AppRoute>>
            <ul class="menu menu-horizontal gap-2">
                {nav_item(AppRoute::Dashboard, "Dashboard", current)}
                {nav_item(AppRoute::AddTask, "Add Task", current)}
            </ul>
            <div class="flex items-center gap-3">
                if let Some(user) = (*user).clone() {
                    <span class="font-semibold">{user.name}</span>
                    <span class="badge badge-outline">{user.role.as_str()}</span>
                }
                <button class="btn btn-soft" onclick={on_logout}>
                    <Icon icon_id={IconId::HeroiconsOutlineArrowRightOnRectangle} class="w-5 h-5" />
                    {"Logout"}
                </button>
            </div>
        </nav>
        <div class="min-h-screen bg-base-100 flex flex-col">
            <main class={classes!("flex-grow", "p-4", "container", "mx-auto")}>
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"TaskDeck · Powered by Rust, Yew and DaisyUI"}</p>
            </footer>
        </div>
    </>
    }
}
