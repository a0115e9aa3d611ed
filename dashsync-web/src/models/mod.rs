pub mod app_state;
pub mod directory_store;
