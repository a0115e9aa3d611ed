use crate::models::app_state::{AppState, sign_out};
use crate::routes::MainRoute;
use yew::prelude::*;
use yew_hooks::use_click_away;
use yew_icons::{Icon, IconId};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_store;

/// Avatar button with the signed-in email and the logout action.
#[function_component(UserDropdown)]
pub fn user_dropdown() -> Html {
    let (state, dispatch) = use_store::<AppState>();
    let navigator = use_navigator();
    let open = use_state(|| false);
    let node = use_node_ref();

    {
        let open = open.clone();
        use_click_away(node.clone(), move |_: Event| open.set(false));
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    let on_logout = {
        let open = open.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            open.set(false);
            sign_out(&dispatch);
            if let Some(navigator) = &navigator {
                navigator.push(&MainRoute::Login);
            }
        })
    };

    let marker = state.session.marker();

    html! {
        <div class="relative" ref={node}>
            <button type="button" class="btn btn-ghost btn-circle" aria-label="Account" onclick={toggle}>
                <Icon icon_id={IconId::HeroiconsOutlineUserCircle} class="w-7 h-7" />
            </button>
            if *open {
                <ul class="menu absolute right-0 z-10 mt-2 w-60 p-2 shadow bg-base-200 rounded-box">
                    <li class="menu-title">{"Welcome to DashSync"}</li>
                    if let Some(marker) = marker {
                        <li class="px-4 py-1 text-sm">
                            <span class="font-semibold">{ &marker.email }</span>
                            <span class="text-xs opacity-70">
                                { format!("Signed in {}", marker.signed_in_at.format("%Y-%m-%d %H:%M UTC")) }
                            </span>
                        </li>
                    }
                    <div class="divider my-0"></div>
                    <li><a href="#" onclick={on_logout}>{"Logout User"}</a></li>
                </ul>
            }
        </div>
    }
}
