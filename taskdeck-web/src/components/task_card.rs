use shared::models::{Task, TaskStatus};
use yew::{Callback, Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

use crate::routes::AppRoute;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
    pub task: Task,
    /// Only admins get a delete button.
    #[prop_or_default]
    pub can_delete: bool,
    /// Emits the task id.
    pub on_delete: Callback<String>,
}

#[function_component(TaskCard)]
pub fn task_card(props: &TaskCardProps) -> Html {
    let task = &props.task;
    let (badge, icon) = match task.status {
        TaskStatus::Pending => ("badge-warning", IconId::HeroiconsOutlineClock),
        TaskStatus::Completed => ("badge-success", IconId::HeroiconsOutlineCheck),
    };
    let on_delete = {
        let id = task.id.clone();
        let callback = props.on_delete.clone();
        Callback::from(move |_| callback.emit(id.clone()))
    };

    html! {
        <div class="card bg-base-200 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">{task.title.clone()}</h2>
                <p>{task.description.clone()}</p>
                <div class={classes!("badge", "gap-1", badge)}>
                    <Icon icon_id={icon} class="w-4 h-4" />
                    {task.status.as_str()}
                </div>
                if let Some(created) = task.created_at {
                    <p class="text-sm opacity-60">
                        {format!("Created {}", created.format("%Y-%m-%d %H:%M"))}
                    </p>
                }
                <div class="card-actions justify-end">
                    <Link<AppRoute>
                        to={AppRoute::EditTask { id: task.id.clone() }}
                        classes="btn btn-sm btn-outline"
                    >
                        <Icon icon_id={IconId::HeroiconsOutlinePencilSquare} class="w-4 h-4" />
                        {"Edit"}
                    </Link<AppRoute>>
                    if props.can_delete {
                        <button class="btn btn-sm btn-error" onclick={on_delete}>
                            <Icon icon_id={IconId::HeroiconsOutlineTrash} class="w-4 h-4" />
                            {"Delete"}
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}
