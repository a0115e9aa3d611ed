//! Remote workflows behind the login and directory views.
//!
//! Each function performs at most one API call and reports back what the
//! view should do: a [`DirectoryAction`] to apply and/or a [`Notice`] to show.
//! The functions never touch view state themselves, so the web client can
//! feed the result through its reducer and the terminal client can apply it
//! directly.

use crate::client::UserDirectoryApi;
use crate::directory::{DirectoryAction, DirectoryState, EditDraft};
use crate::models::{Notice, SessionMarker};
use crate::session::{KeyValueStore, SessionContext};
use crate::validation::{LoginForm, LoginFormErrors};
use tracing::{debug, warn};

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const USER_UPDATED: &str = "User updated successfully!";
pub const USER_DELETED: &str = "User deleted successfully!";

/// Where a login attempt currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginPhase {
    /// Waiting for input.
    #[default]
    Idle,
    /// Checking the fields locally.
    Validating,
    /// Waiting on the service.
    Submitting,
    /// A token was issued.
    Success,
    /// The service refused or could not be reached.
    Failure,
}

impl LoginPhase {
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

/// Result of [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Local validation failed; no request was made.
    Invalid(LoginFormErrors),
    /// The service refused, or the request failed.
    Rejected(Notice),
    /// The service issued a token.
    Authenticated {
        token: String,
        marker: SessionMarker,
        notice: Notice,
    },
}

impl LoginOutcome {
    /// The terminal phase this outcome leaves the login form in.
    #[must_use]
    pub const fn phase(&self) -> LoginPhase {
        match self {
            Self::Invalid(_) => LoginPhase::Idle,
            Self::Rejected(_) => LoginPhase::Failure,
            Self::Authenticated { .. } => LoginPhase::Success,
        }
    }
}

/// Validates `form` and, if it passes, exchanges it for a token.
pub async fn authenticate<A>(api: &A, form: &LoginForm) -> LoginOutcome
where
    A: UserDirectoryApi + ?Sized,
{
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return LoginOutcome::Invalid(errors),
    };

    match api.login(&credentials).await {
        Ok(response) => LoginOutcome::Authenticated {
            token: response.token,
            marker: SessionMarker::now(credentials.email),
            notice: Notice::success(LOGIN_SUCCEEDED),
        },
        Err(err) => LoginOutcome::Rejected(Notice::error(err.notice_message())),
    }
}

/// [`authenticate`], then persist the session on success.
pub async fn sign_in<A, S>(
    api: &A,
    session: &mut SessionContext<S>,
    form: &LoginForm,
) -> LoginOutcome
where
    A: UserDirectoryApi + ?Sized,
    S: KeyValueStore,
{
    let outcome = authenticate(api, form).await;
    if let LoginOutcome::Authenticated { token, marker, .. } = &outcome {
        if let Err(err) = session.establish(token, marker.clone()) {
            warn!(error = %err, "could not persist session");
            return LoginOutcome::Rejected(Notice::error(err.to_string()));
        }
    }
    outcome
}

/// What a directory workflow asks the view to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryOutcome {
    pub action: Option<DirectoryAction>,
    pub notice: Option<Notice>,
}

impl DirectoryOutcome {
    /// Applies the action, if any, and hands back the notice.
    pub fn apply_to(self, state: &mut DirectoryState) -> Option<Notice> {
        if let Some(action) = self.action {
            state.apply(action);
        }
        self.notice
    }
}

/// Fetches `page`, tagging the result with `generation`.
pub async fn fetch_page<A>(api: &A, page: u32, generation: u64) -> DirectoryOutcome
where
    A: UserDirectoryApi + ?Sized,
{
    debug!(page, generation, "fetching directory page");
    match api.list_users(page).await {
        Ok(page) => DirectoryOutcome {
            action: Some(DirectoryAction::PageLoaded { generation, page }),
            notice: None,
        },
        Err(err) => DirectoryOutcome {
            action: Some(DirectoryAction::FetchFailed { generation }),
            notice: Some(Notice::error(err.notice_message())),
        },
    }
}

/// Submits the editing draft. On failure the draft stays open.
pub async fn submit_edit<A>(api: &A, draft: &EditDraft) -> DirectoryOutcome
where
    A: UserDirectoryApi + ?Sized,
{
    match api.update_user(draft.id, &draft.to_update()).await {
        Ok(updated) => DirectoryOutcome {
            action: Some(DirectoryAction::UserUpdated {
                id: draft.id,
                updated,
            }),
            notice: Some(Notice::success(USER_UPDATED)),
        },
        Err(err) => DirectoryOutcome {
            action: None,
            notice: Some(Notice::error(err.notice_message())),
        },
    }
}

/// Deletes `id`. The record is only dropped locally once the service agrees.
pub async fn delete_user<A>(api: &A, id: u64) -> DirectoryOutcome
where
    A: UserDirectoryApi + ?Sized,
{
    match api.delete_user(id).await {
        Ok(()) => DirectoryOutcome {
            action: Some(DirectoryAction::UserDeleted(id)),
            notice: Some(Notice::success(USER_DELETED)),
        },
        Err(err) => DirectoryOutcome {
            action: None,
            notice: Some(Notice::error(err.notice_message())),
        },
    }
}
