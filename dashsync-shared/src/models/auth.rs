use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /login`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body returned by the directory service, e.g. `{"error": "user not found"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Locally stored record of who signed in and when.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionMarker {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionMarker {
    /// Stamp a marker for `email` at the current time.
    #[must_use]
    pub fn now(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            signed_in_at: Utc::now(),
        }
    }
}
