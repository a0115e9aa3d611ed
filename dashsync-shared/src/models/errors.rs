use thiserror::Error;

/// Message shown when the login endpoint fails without an explanation.
pub const GENERIC_LOGIN_FAILURE: &str = "Something went wrong!";

/// Failures surfaced by the directory API client.
///
/// Every variant is terminal for the attempt that produced it: nothing is
/// retried, and the caller decides whether to re-trigger the action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The service rejected the credentials, or the login request failed.
    #[error("{0}")]
    Auth(String),

    /// Listing a page failed at the network or server level.
    #[error("failed to fetch users page {page}: {reason}")]
    Fetch { page: u32, reason: String },

    /// Updating a record failed.
    #[error("failed to update user {id}: {reason}")]
    Update { id: u64, reason: String },

    /// Deleting a record failed.
    #[error("failed to delete user {id}: {reason}")]
    Delete { id: u64, reason: String },

    /// The client could not be constructed from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The user-facing text for a notification about this failure.
    #[must_use]
    pub fn notice_message(&self) -> String {
        match self {
            Self::Auth(message) => message.clone(),
            Self::Fetch { .. } => "Failed to fetch users. Please try again.".to_string(),
            Self::Update { .. } => "Failed to update user.".to_string(),
            Self::Delete { .. } => "Failed to delete user.".to_string(),
            Self::Config(message) => message.clone(),
        }
    }

    /// Build an [`ClientError::Auth`] from an optional server message.
    pub fn auth(message: Option<String>) -> Self {
        Self::Auth(
            message
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string()),
        )
    }
}
