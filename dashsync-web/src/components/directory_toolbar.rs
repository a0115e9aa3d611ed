use shared::directory::DirectoryAction;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DirectoryToolbarProps {
    pub search_query: AttrValue,
    pub filter_letter: Option<char>,
    pub letters: Vec<char>,
    pub on_action: Callback<DirectoryAction>,
}

/// Search box and first-letter filter.
#[function_component(DirectoryToolbar)]
pub fn directory_toolbar(props: &DirectoryToolbarProps) -> Html {
    let on_search = {
        let on_action = props.on_action.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_action.emit(DirectoryAction::SetSearch(input.value()));
            }
        })
    };

    let on_letter = {
        let on_action = props.on_action.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                on_action.emit(DirectoryAction::SetLetter(select.value().chars().next()));
            }
        })
    };

    let selected = props.filter_letter.map(String::from).unwrap_or_default();

    html! {
        <div class="flex flex-col gap-3 md:flex-row md:items-center mb-4">
            <input
                type="search"
                class="input input-bordered w-full md:max-w-sm"
                placeholder="Search by name or email"
                value={props.search_query.clone()}
                oninput={on_search}
            />
            <select class="select select-bordered" onchange={on_letter}>
                <option value="" selected={selected.is_empty()}>{"Filter by First Letter"}</option>
                { for props.letters.iter().map(|letter| {
                    let value = letter.to_string();
                    html! {
                        <option value={value.clone()} selected={value == selected}>{ value.clone() }</option>
                    }
                }) }
            </select>
        </div>
    }
}
