use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex items-center justify-center py-10" role="status">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span class="ml-3">{"Loading users..."}</span>
        </div>
    }
}
