use shared::{
    guards::{Guard, GuardDecision},
    workflow::{TaskBoard, fetch_page, remove_task},
};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::{
    components::{loading::Loading, pagination::Pagination, task_card::TaskCard},
    models::app_state::{AppState, notify},
    routes::AppRoute,
    services::use_services,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Refetch counter. Dispatching bumps the latest value, so a late delete
/// still triggers a reload.
#[derive(Debug, Default, PartialEq)]
struct Reload(u32);

impl Reducible for Reload {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Paginated task list with counters.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let auth = use_selector(|state: &AppState| state.auth.clone());
    let board = use_state(|| TaskBoard::new(services.config().page_size));
    let page = use_state(|| 1_u32);
    let reload = use_reducer(Reload::default);

    {
        let board = board.clone();
        let services = services.clone();
        let dispatch = dispatch.clone();
        use_effect_with((*page, reload.0), move |(page, _)| {
            let mut next = (*board).clone();
            let query = next.begin_load(*page);
            board.set(next.clone());
            log(&format!("Loading task page {}", query.page));
            spawn_local(async move {
                let result = fetch_page(services.client(), services.auth(), query).await;
                if let Some(note) = next.finish_load(result) {
                    notify(&dispatch, note);
                }
                board.set(next);
            });
            || ()
        });
    }

    let on_page = {
        let page = page.clone();
        Callback::from(move |number: u32| page.set(number))
    };

    let on_delete = {
        let reload = reload.dispatcher();
        Callback::from(move |id: String| {
            let services = services.clone();
            let dispatch = dispatch.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match remove_task(services.client(), services.auth(), &id).await {
                    Ok(note) => {
                        notify(&dispatch, note);
                        reload.dispatch(());
                    }
                    Err(err) => notify(&dispatch, err.notification()),
                }
            });
        })
    };

    let can_delete = Guard::Admin.evaluate(&auth) == GuardDecision::Render;
    let stats = board.stats();
    let current = board.page();

    html! {
        <div class="p-4 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Tasks"}</h1>
                <Link<AppRoute> to={AppRoute::AddTask} classes="btn btn-primary">
                    <Icon icon_id={IconId::HeroiconsOutlinePlus} class="w-5 h-5" />
                    {"Add Task"}
                </Link<AppRoute>>
            </div>

            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Icon icon_id={IconId::HeroiconsOutlineClipboardDocumentList} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"Total Tasks"}</div>
                    <div class="stat-value text-primary">{stats.total_tasks.to_string()}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <Icon icon_id={IconId::HeroiconsOutlineDocumentText} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"On This Page"}</div>
                    <div class="stat-value text-secondary">{stats.on_page.to_string()}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-accent">
                        <Icon icon_id={IconId::HeroiconsOutlineRectangleStack} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{"Pages"}</div>
                    <div class="stat-value text-accent">{stats.total_pages.max(1).to_string()}</div>
                </div>
            </div>

            if let Some(message) = board.error() {
                <div class="alert alert-error">
                    <span>{message.to_string()}</span>
                </div>
            }

            if board.is_loading() && board.tasks().is_empty() {
                <Loading />
            } else if board.tasks().is_empty() {
                <p class="text-center opacity-70">{"No tasks yet."}</p>
            } else {
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    { for board.tasks().iter().map(|task| html! {
                        <TaskCard
                            key={task.id.clone()}
                            task={task.clone()}
                            {can_delete}
                            on_delete={on_delete.clone()}
                        />
                    })}
                </div>
            }

            <Pagination
                page={current.page}
                total_pages={current.total_pages}
                label={current.label()}
                on_change={on_page}
                disabled={board.is_loading()}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_counts_every_dispatch() {
        let reload = Rc::new(Reload::default());
        let once = reload.clone().reduce(());
        let twice = once.clone().reduce(());
        assert_eq!(*once, Reload(1));
        assert_eq!(*twice, Reload(2));
        assert_eq!(*reload, Reload(0));
    }
}
