use crate::routes::MainRoute;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen gap-4">
            <h1 class="text-4xl font-bold">{"404"}</h1>
            <p>{"The page you are looking for does not exist."}</p>
            <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary">
                {"Back to DashSync"}
            </Link<MainRoute>>
        </div>
    }
}
