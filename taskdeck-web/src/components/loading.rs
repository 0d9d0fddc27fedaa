use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};

/// Placeholder shown while the session is restored or data is in flight.
#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-[50vh]">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <Icon icon_id={IconId::HeroiconsOutlineClipboardDocumentList} class="w-6 h-6 text-primary" />
                    <span>{"TaskDeck"}</span>
                </div>
                <span class="mt-3 loading loading-dots loading-md"></span>
            </div>
        </div>
    }
}
