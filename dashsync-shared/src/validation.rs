//! Validation logic for the login form.
//!
//! Runs before any network call; a form that fails here never reaches the
//! directory service.

use crate::models::Credentials;
use regex::Regex;
use std::sync::LazyLock;

/// Inline text shown under an invalid email field.
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Inline text shown under an empty password field.
pub const PASSWORD_REQUIRED: &str = "Password is required.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Which login field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Raw input from the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginFormErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    /// Drops the message for `field`, as happens when the visitor edits it.
    pub fn clear(&mut self, field: LoginField) {
        match field {
            LoginField::Email => self.email = None,
            LoginField::Password => self.password = None,
        }
    }

    #[must_use]
    pub fn get(&self, field: LoginField) -> Option<&str> {
        match field {
            LoginField::Email => self.email.as_deref(),
            LoginField::Password => self.password.as_deref(),
        }
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Replaces one field's value.
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    /// Checks both fields and returns the credentials to submit.
    ///
    /// # Errors
    /// Returns every field error at once so the form can show them together.
    pub fn validate(&self) -> Result<Credentials, LoginFormErrors> {
        let errors = LoginFormErrors {
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password).err(),
        };

        if errors.is_empty() {
            Ok(Credentials {
                email: self.email.clone(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Validates an email address against `local@domain.tld`.
///
/// # Errors
/// Returns [`INVALID_EMAIL`] when the address is blank or malformed.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() || !EMAIL_PATTERN.is_match(email) {
        return Err(INVALID_EMAIL.to_string());
    }
    Ok(())
}

/// Validates that a password was entered.
///
/// # Errors
/// Returns [`PASSWORD_REQUIRED`] when the password is blank.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        return Err(PASSWORD_REQUIRED.to_string());
    }
    Ok(())
}
