use crate::{containers::layout::Layout, models::app_state::AppState, pages::*};
use shared::guard::{self, Access, GuardOutcome};
use strum::EnumIter;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// The main routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Login,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Who may see this route.
    pub const fn access(self) -> Access {
        match self {
            Self::Login => Access::GuestOnly,
            Self::Users => Access::Protected,
            Self::NotFound => Access::Public,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let is_authenticated = use_selector(AppState::is_authenticated);

    match guard::resolve(props.route.access(), *is_authenticated) {
        GuardOutcome::RedirectToLogin => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        GuardOutcome::RedirectToDirectory => {
            html! { <Redirect<MainRoute> to={MainRoute::Users} /> }
        }
        GuardOutcome::Render => match props.route {
            MainRoute::Login => html! { <LoginPage /> },
            MainRoute::Users => html! {
                <Layout>
                    <UsersPage />
                </Layout>
            },
            MainRoute::NotFound => html! { <ErrorPage /> },
        },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log(&format!("Switching to route: {route:?}"));
    html! { <MainRouteView {route} /> }
}
