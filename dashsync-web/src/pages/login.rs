use crate::api::directory_client;
use crate::models::app_state::{AppState, notify};
use crate::routes::MainRoute;
use shared::models::Notice;
use shared::validation::{LoginField, LoginForm, LoginFormErrors};
use shared::workflow::{LoginOutcome, LoginPhase, authenticate};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_dispatch;

fn on_field_input(
    form: &UseStateHandle<LoginForm>,
    errors: &UseStateHandle<LoginFormErrors>,
    field: LoginField,
) -> Callback<InputEvent> {
    let form = form.clone();
    let errors = errors.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            next.set(field, input.value());
            form.set(next);

            let mut cleared = (*errors).clone();
            cleared.clear(field);
            errors.set(cleared);
        }
    })
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let form = use_state(LoginForm::default);
    let errors = use_state(LoginFormErrors::default);
    let phase = use_state(LoginPhase::default);
    let dispatch = use_dispatch::<AppState>();
    let navigator = use_navigator();

    let onsubmit = {
        let form = form.clone();
        let errors = errors.clone();
        let phase = phase.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if phase.is_busy() {
                return;
            }
            phase.set(LoginPhase::Validating);

            let form = (*form).clone();
            let errors = errors.clone();
            let phase = phase.clone();
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if let Err(invalid) = form.validate() {
                    errors.set(invalid);
                    phase.set(LoginPhase::Idle);
                    return;
                }
                phase.set(LoginPhase::Submitting);

                let client = directory_client(None);
                let outcome = authenticate(&client, &form).await;
                phase.set(outcome.phase());
                match outcome {
                    LoginOutcome::Invalid(invalid) => errors.set(invalid),
                    LoginOutcome::Rejected(notice) => notify(&dispatch, notice),
                    LoginOutcome::Authenticated {
                        token,
                        marker,
                        notice,
                    } => {
                        let mut next = (*dispatch.get()).clone();
                        if let Err(err) = next.session.establish(&token, marker) {
                            phase.set(LoginPhase::Failure);
                            notify(&dispatch, Notice::error(err.to_string()));
                            return;
                        }
                        dispatch.set(next);
                        notify(&dispatch, notice);
                        if let Some(navigator) = navigator {
                            navigator.push(&MainRoute::Users);
                        }
                    }
                }
            });
        })
    };

    let is_busy = phase.is_busy();
    let email_error = errors.get(LoginField::Email).map(str::to_string);
    let password_error = errors.get(LoginField::Password).map(str::to_string);

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" novalidate=true {onsubmit}>
                    <h2 class="card-title text-2xl">{"Sign in to DashSync"}</h2>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class={classes!("input", "input-bordered", email_error.is_some().then_some("input-error"))}
                            type="email"
                            value={form.email.clone()}
                            oninput={on_field_input(&form, &errors, LoginField::Email)}
                        />
                        if let Some(message) = email_error {
                            <span class="label-text-alt text-error mt-1">{ message }</span>
                        }
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class={classes!("input", "input-bordered", password_error.is_some().then_some("input-error"))}
                            type="password"
                            value={form.password.clone()}
                            oninput={on_field_input(&form, &errors, LoginField::Password)}
                        />
                        if let Some(message) = password_error {
                            <span class="label-text-alt text-error mt-1">{ message }</span>
                        }
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            { if is_busy { "Logging in..." } else { "Login" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
