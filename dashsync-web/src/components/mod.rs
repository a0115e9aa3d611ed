pub(crate) mod directory_toolbar;
pub(crate) mod edit_user_modal;
pub(crate) mod loading;
pub(crate) mod navbar;
pub(crate) mod pagination;
pub(crate) mod toast;
pub(crate) mod user_dropdown;
pub(crate) mod user_table;
