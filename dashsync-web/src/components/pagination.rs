use shared::directory::DirectoryAction;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: u32,
    pub total_pages: u32,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub on_action: Callback<DirectoryAction>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let on_prev = props.on_action.reform(|_: MouseEvent| DirectoryAction::PrevPage);
    let on_next = props.on_action.reform(|_: MouseEvent| DirectoryAction::NextPage);

    html! {
        <div class="join flex justify-center mt-6">
            <button type="button" class="join-item btn" disabled={!props.can_go_prev} onclick={on_prev}>
                {"Prev"}
            </button>
            <span class="join-item btn btn-disabled">
                { format!("{}/{}", props.page, props.total_pages) }
            </span>
            <button type="button" class="join-item btn" disabled={!props.can_go_next} onclick={on_next}>
                {"Next"}
            </button>
        </div>
    }
}
