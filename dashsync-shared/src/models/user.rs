use serde::{Deserialize, Serialize};

/// A single record in the remote user directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Identifier assigned by the directory service.
    pub id: u64,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Contact email address.
    pub email: String,

    /// Absolute URL of the avatar image.
    #[serde(default)]
    pub avatar: String,
}

impl DirectoryUser {
    /// First character of the given name, used by the letter filter.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.first_name.chars().next()
    }

    /// The text the search box matches against.
    #[must_use]
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.email)
    }

    /// Display name in "First Last" form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Overlay the fields echoed back by an update onto this record.
    pub fn merge(&mut self, updated: &UpdatedUser) {
        if let Some(first_name) = &updated.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &updated.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &updated.email {
            self.email.clone_from(email);
        }
        if let Some(avatar) = &updated.avatar {
            self.avatar.clone_from(avatar);
        }
    }
}

/// One server-paginated batch of users as returned by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPage {
    /// The page number this batch belongs to.
    #[serde(default = "first_page")]
    pub page: u32,

    /// Records per page.
    #[serde(default)]
    pub per_page: u32,

    /// Total number of records across all pages.
    #[serde(default)]
    pub total: u32,

    /// Total number of pages.
    #[serde(default = "first_page")]
    pub total_pages: u32,

    /// The records on this page, in server order.
    pub data: Vec<DirectoryUser>,
}

const fn first_page() -> u32 {
    1
}

/// Fields sent when editing a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields echoed back by `PUT /users/:id`.
///
/// The stub API only echoes what it was sent, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatedUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        default,
        rename = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}
