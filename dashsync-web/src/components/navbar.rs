use crate::components::user_dropdown::UserDropdown;
use crate::routes::MainRoute;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    html! {
        <nav class="navbar bg-base-200 shadow-sm px-4">
            <div class="flex-1">
                <Link<MainRoute> to={MainRoute::Users} classes="btn btn-ghost text-xl">
                    {"DashSync"}
                </Link<MainRoute>>
            </div>
            <div class="flex-none">
                <UserDropdown />
            </div>
        </nav>
    }
}
