use shared::models::DirectoryUser;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct UserTableProps {
    pub users: Vec<DirectoryUser>,
    pub on_edit: Callback<u64>,
    pub on_delete: Callback<u64>,
}

/// The visible slice of the current page.
#[function_component(UserTable)]
pub fn user_table(props: &UserTableProps) -> Html {
    if props.users.is_empty() {
        return html! {
            <p class="text-center opacity-70 py-10">{"No users match the current filters."}</p>
        };
    }

    html! {
        <div class="overflow-x-auto">
            <table class="table">
                <thead>
                    <tr>
                        <th>{"User"}</th>
                        <th>{"Email"}</th>
                        <th class="text-right">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.users.iter().map(|user| {
                        let id = user.id;
                        let on_edit = props.on_edit.reform(move |_: MouseEvent| id);
                        let on_delete = props.on_delete.reform(move |_: MouseEvent| id);
                        html! {
                            <tr key={id}>
                                <td>
                                    <div class="flex items-center gap-3">
                                        if !user.avatar.is_empty() {
                                            <div class="avatar">
                                                <div class="w-10 rounded-full">
                                                    <img src={user.avatar.clone()} alt={user.full_name()} />
                                                </div>
                                            </div>
                                        }
                                        <span class="font-medium">{ user.full_name() }</span>
                                    </div>
                                </td>
                                <td>{ &user.email }</td>
                                <td class="text-right">
                                    <button type="button" class="btn btn-ghost btn-sm" aria-label="Edit" onclick={on_edit}>
                                        <Icon icon_id={IconId::HeroiconsOutlinePencilSquare} class="w-5 h-5" />
                                    </button>
                                    <button type="button" class="btn btn-ghost btn-sm text-error" aria-label="Delete" onclick={on_delete}>
                                        <Icon icon_id={IconId::HeroiconsOutlineTrash} class="w-5 h-5" />
                                    </button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}
