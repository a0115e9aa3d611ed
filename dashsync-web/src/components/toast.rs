use crate::models::app_state::{AppState, dismiss};
use shared::models::NoticeKind;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

/// Transient notices, newest at the bottom.
#[function_component(ToastStack)]
pub fn toast_stack() -> Html {
    let (state, dispatch) = use_store::<AppState>();

    html! {
        <div class="toast toast-top toast-end z-50">
            { for state.toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = {
                    let dispatch = dispatch.clone();
                    Callback::from(move |_: MouseEvent| dismiss(&dispatch, id))
                };
                let alert = match toast.notice.kind {
                    NoticeKind::Success => "alert-success",
                    NoticeKind::Error => "alert-error",
                };
                html! {
                    <div key={id.to_string()} class={classes!("alert", alert)} role="alert">
                        <span>{ &toast.notice.message }</span>
                        <button type="button" class="btn btn-ghost btn-xs" aria-label="Dismiss" {onclick}>
                            <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-4 h-4" />
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}
