use crate::api::directory_client;
use crate::components::{
    directory_toolbar::DirectoryToolbar, edit_user_modal::EditUserModal, loading::Loading,
    pagination::Pagination, user_table::UserTable,
};
use crate::models::app_state::{AppState, notify};
use crate::models::directory_store::DirectoryStore;
use shared::directory::{DirectoryAction, EditDraft};
use shared::workflow::{self, DirectoryOutcome};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::Dispatch;
use yewdux::prelude::{use_dispatch, use_selector};

/// Feeds a workflow result back into the view.
fn deliver(
    directory: &UseReducerDispatcher<DirectoryStore>,
    app: &Dispatch<AppState>,
    outcome: DirectoryOutcome,
) {
    if let Some(action) = outcome.action {
        directory.dispatch(action);
    }
    if let Some(notice) = outcome.notice {
        notify(app, notice);
    }
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let directory = use_reducer(DirectoryStore::default);
    let token = use_selector(AppState::token);
    let app = use_dispatch::<AppState>();
    let latest_generation = use_mut_ref(|| 0_u64);

    {
        let dispatcher = directory.dispatcher();
        let app = app.clone();
        let token = token.clone();
        let latest_generation = latest_generation.clone();
        use_effect_with(directory.page(), move |&page| {
            let generation = {
                let mut latest = latest_generation.borrow_mut();
                *latest += 1;
                *latest
            };
            dispatcher.dispatch(DirectoryAction::FetchStarted { generation });
            spawn_local(async move {
                let client = directory_client(token.as_deref());
                let outcome = workflow::fetch_page(&client, page, generation).await;
                deliver(&dispatcher, &app, outcome);
            });
            || ()
        });
    }

    let on_action = {
        let dispatcher = directory.dispatcher();
        Callback::from(move |action: DirectoryAction| dispatcher.dispatch(action))
    };

    let on_edit = {
        let dispatcher = directory.dispatcher();
        Callback::from(move |id: u64| dispatcher.dispatch(DirectoryAction::BeginEdit(id)))
    };

    let on_delete = {
        let dispatcher = directory.dispatcher();
        let app = app.clone();
        let token = token.clone();
        Callback::from(move |id: u64| {
            let dispatcher = dispatcher.clone();
            let app = app.clone();
            let token = token.clone();
            spawn_local(async move {
                let client = directory_client(token.as_deref());
                let outcome = workflow::delete_user(&client, id).await;
                deliver(&dispatcher, &app, outcome);
            });
        })
    };

    let on_submit = {
        let dispatcher = directory.dispatcher();
        Callback::from(move |draft: EditDraft| {
            let dispatcher = dispatcher.clone();
            let app = app.clone();
            let token = token.clone();
            spawn_local(async move {
                let client = directory_client(token.as_deref());
                let outcome = workflow::submit_edit(&client, &draft).await;
                deliver(&dispatcher, &app, outcome);
            });
        })
    };

    html! {
        <section class="space-y-4">
            <h1 class="text-2xl font-bold">{"Users"}</h1>
            <DirectoryToolbar
                search_query={AttrValue::from(directory.search_query().to_string())}
                filter_letter={directory.filter_letter()}
                letters={directory.letters()}
                on_action={on_action.clone()}
            />
            if directory.is_loading() {
                <Loading />
            } else {
                <UserTable users={directory.filtered_users().to_vec()} {on_edit} {on_delete} />
            }
            <Pagination
                page={directory.page()}
                total_pages={directory.total_pages()}
                can_go_prev={directory.can_go_prev()}
                can_go_next={directory.can_go_next()}
                on_action={on_action.clone()}
            />
            if let Some(draft) = directory.draft() {
                <EditUserModal draft={draft.clone()} {on_action} {on_submit} />
            }
        </section>
    }
}
