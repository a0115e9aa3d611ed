pub mod auth;
pub mod errors;
pub mod notice;
pub mod user;

pub use auth::{ApiErrorBody, Credentials, LoginResponse, SessionMarker};
pub use errors::ClientError;
pub use notice::{Notice, NoticeKind};
pub use user::{DirectoryUser, UpdatedUser, UserPage, UserUpdate};
