use shared::directory::{DirectoryAction, DraftField, EditDraft};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditUserModalProps {
    pub draft: EditDraft,
    pub on_action: Callback<DirectoryAction>,
    pub on_submit: Callback<EditDraft>,
}

fn field_input(on_action: &Callback<DirectoryAction>, field: DraftField) -> Callback<InputEvent> {
    let on_action = on_action.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            on_action.emit(DirectoryAction::EditField(field, input.value()));
        }
    })
}

#[function_component(EditUserModal)]
pub fn edit_user_modal(props: &EditUserModalProps) -> Html {
    let draft = &props.draft;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let draft = draft.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(draft.clone());
        })
    };
    let on_cancel = props.on_action.reform(|_: MouseEvent| DirectoryAction::CancelEdit);

    html! {
        <div class="modal modal-open" role="dialog">
            <form class="modal-box space-y-3" {onsubmit}>
                <h3 class="text-lg font-bold">{"Edit User"}</h3>
                <input
                    class="input input-bordered w-full"
                    placeholder="First name"
                    value={draft.first_name.clone()}
                    oninput={field_input(&props.on_action, DraftField::FirstName)}
                />
                <input
                    class="input input-bordered w-full"
                    placeholder="Last name"
                    value={draft.last_name.clone()}
                    oninput={field_input(&props.on_action, DraftField::LastName)}
                />
                <input
                    type="email"
                    class="input input-bordered w-full"
                    placeholder="Email"
                    value={draft.email.clone()}
                    oninput={field_input(&props.on_action, DraftField::Email)}
                />
                <div class="modal-action">
                    <button type="button" class="btn" onclick={on_cancel}>{"Cancel"}</button>
                    <button type="submit" class="btn btn-primary">{"Save"}</button>
                </div>
            </form>
        </div>
    }
}
