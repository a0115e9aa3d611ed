//! Navigation gating.
//!
//! Every view declares an [`Access`] level; [`resolve`] decides whether it
//! renders or where the visitor is sent instead. The only input is the single
//! authentication predicate from [`crate::session::SessionContext`].

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Only visitors without a session (the login view).
    GuestOnly,
    /// Only visitors with a session (the directory view).
    Protected,
}

/// What the router should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Show the requested view.
    Render,
    /// Send the visitor to the login view.
    RedirectToLogin,
    /// Send the visitor to the directory view.
    RedirectToDirectory,
}

/// Decides what happens when a visitor with or without a session asks for a
/// view with the given `access`.
#[must_use]
pub const fn resolve(access: Access, is_authenticated: bool) -> GuardOutcome {
    match (access, is_authenticated) {
        (Access::Protected, false) => GuardOutcome::RedirectToLogin,
        (Access::GuestOnly, true) => GuardOutcome::RedirectToDirectory,
        _ => GuardOutcome::Render,
    }
}
