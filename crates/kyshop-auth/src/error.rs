//! Authentication errors.

use crate::credentials::FieldErrors;
use thiserror::Error;

/// Authentication error type.
///
/// The `Display` text is what the sign-in banner shows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Credential input failed field validation.
    #[error("{0}")]
    Validation(FieldErrors),

    /// Wrong email or password.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Sign-up with an email that is already registered.
    #[error("User already registered: {0}")]
    UserAlreadyExists(String),

    /// Operation requires a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,

    /// The identity service could not be reached.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is a field-level validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::Validation(_))
    }

    /// Field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
