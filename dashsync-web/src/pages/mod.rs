mod error;
pub mod login;
mod users;

pub use error::ErrorPage;
pub use login::LoginPage;
pub use users::UsersPage;
