use crate::components::toast::ToastStack;
use crate::routes::{MainRoute, switch};
use yew::{Html, function_component, html};
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
            <ToastStack />
        </BrowserRouter>
    }
}
