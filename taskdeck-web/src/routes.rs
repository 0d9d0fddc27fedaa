use shared::guards::{Resolution, Route, resolve_route};
use strum::EnumIter;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

use crate::{
    components::loading::Loading, containers::layout::Layout, models::app_state::AppState,
    pages::*,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Browser locations understood by the client.
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum AppRoute {
    #[at("/")]
    Home,
    #[at("/signin")]
    SignIn,
    #[at("/signup")]
    SignUp,
    #[at("/dashboard")]
    Dashboard,
    #[at("/task/add")]
    AddTask,
    #[at("/task/edit/:id")]
    EditTask { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Route> for AppRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::SignIn => Self::SignIn,
            Route::SignUp => Self::SignUp,
            Route::Dashboard => Self::Dashboard,
            Route::AddTask => Self::AddTask,
            Route::EditTask { id } => Self::EditTask { id },
        }
    }
}

impl AppRoute {
    /// Guarded counterpart; `None` for `/` and the not-found page.
    pub fn guarded(&self) -> Option<Route> {
        match self {
            Self::SignIn => Some(Route::SignIn),
            Self::SignUp => Some(Route::SignUp),
            Self::Dashboard => Some(Route::Dashboard),
            Self::AddTask => Some(Route::AddTask),
            Self::EditTask { id } => Some(Route::EditTask { id: id.clone() }),
            Self::Home | Self::NotFound => None,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: AppRoute,
}

/// Applies the route guards before rendering a page.
#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let auth = use_selector(|state: &AppState| state.auth.clone());

    match resolve_route(props.route.guarded(), &auth) {
        Resolution::Pending => html! { <Loading /> },
        Resolution::Redirect(target) => {
            html! { <Redirect<AppRoute> to={AppRoute::from(target)} /> }
        }
        Resolution::RenderSignIn { .. } => html! { <SignInPage /> },
        Resolution::Render(route) => render(route),
    }
}

fn render(route: Route) -> Html {
    match route {
        Route::SignIn => html! { <SignInPage /> },
        Route::SignUp => html! { <SignUpPage /> },
        Route::Dashboard => html! {
            <Layout current_route={AppRoute::Dashboard}>
                <DashboardPage />
            </Layout>
        },
        Route::AddTask => html! {
            <Layout current_route={AppRoute::AddTask}>
                <AddTaskPage />
            </Layout>
        },
        Route::EditTask { id } => html! {
            <Layout>
                <EditTaskPage {id} />
            </Layout>
        },
    }
}

/// Switch function for the router.
pub fn switch(route: AppRoute) -> Html {
    log(&format!("Switching to route: {route:?}"));
    html! { <RouteView {route} /> }
}
