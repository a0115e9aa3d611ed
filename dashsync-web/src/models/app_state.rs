use crate::storage::LocalStorageStore;
use gloo_timers::callback::Timeout;
use shared::models::Notice;
use shared::session::SessionContext;
use uuid::Uuid;
use yewdux::{Dispatch, Store};

/// How long a toast stays on screen.
const TOAST_TIMEOUT_MS: u32 = 3_000;

/// A notice currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

/// Page-wide state: the session context and the toast stack.
#[derive(Debug, Clone, PartialEq, Eq, Store)]
pub struct AppState {
    pub session: SessionContext<LocalStorageStore>,
    pub toasts: Vec<Toast>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionContext::init(LocalStorageStore),
            toasts: Vec::new(),
        }
    }
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }
}

/// Shows `notice` and schedules its removal.
pub fn notify(dispatch: &Dispatch<AppState>, notice: Notice) {
    let id = Uuid::new_v4();
    dispatch.reduce_mut(|state| state.toasts.push(Toast { id, notice }));

    let dispatch = dispatch.clone();
    Timeout::new(TOAST_TIMEOUT_MS, move || dismiss(&dispatch, id)).forget();
}

/// Removes the toast with `id`, if it is still showing.
pub fn dismiss(dispatch: &Dispatch<AppState>, id: Uuid) {
    dispatch.reduce_mut(|state| state.toasts.retain(|toast| toast.id != id));
}

/// Ends the session, leaving the visitor signed out even if storage fails.
pub fn sign_out(dispatch: &Dispatch<AppState>) {
    dispatch.reduce_mut(|state| {
        if let Err(err) = state.session.teardown() {
            web_sys::console::error_1(&format!("logout: {err}").into());
        }
    });
}
