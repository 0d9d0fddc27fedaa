use yew::{Callback, Html, Properties, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: u32,
    pub total_pages: u32,
    pub label: String,
    /// Requested page number.
    pub on_change: Callback<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Previous/next controls. Renders nothing for a single page.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return html! {};
    }

    let page = props.page;
    let previous = {
        let on_change = props.on_change.clone();
        Callback::from(move |_| on_change.emit(page.saturating_sub(1).max(1)))
    };
    let next = {
        let on_change = props.on_change.clone();
        Callback::from(move |_| on_change.emit(page + 1))
    };

    html! {
        <div class="join flex justify-center mt-6">
            <button
                class="join-item btn"
                onclick={previous}
                disabled={props.disabled || page <= 1}
            >
                <Icon icon_id={IconId::HeroiconsOutlineChevronLeft} class="w-4 h-4" />
                {"Previous"}
            </button>
            <span class="join-item btn btn-ghost no-animation">{props.label.clone()}</span>
            <button
                class="join-item btn"
                onclick={next}
                disabled={props.disabled || page >= props.total_pages}
            >
                {"Next"}
                <Icon icon_id={IconId::HeroiconsOutlineChevronRight} class="w-4 h-4" />
            </button>
        </div>
    }
}
