//! Sign-in / sign-up dialog state.

use kyshop_auth::{
    AuthError, Credentials, Field, FieldErrors, Registration, SessionOwner, User,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    /// Submit button label while a request is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Signing In...",
            AuthMode::SignUp => "Creating Account...",
        }
    }
}

/// Identifies one submission to the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthTicket(u64);

/// State of the auth dialog.
///
/// Field errors sit next to their inputs; any other failure becomes the
/// single banner and the dialog stays open.
#[derive(Debug, Clone, Default)]
pub struct AuthModal {
    open: bool,
    mode: AuthMode,
    field_errors: FieldErrors,
    banner: Option<String>,
    submitting: bool,
    generation: u64,
}

impl AuthModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Open in `mode` with a clean form.
    pub fn open(&mut self, mode: AuthMode) {
        self.generation += 1;
        self.open = true;
        self.mode = mode;
        self.clear_messages();
        self.submitting = false;
    }

    /// Close. A request still in flight becomes stale.
    pub fn close(&mut self) {
        self.generation += 1;
        self.open = false;
        self.submitting = false;
        self.clear_messages();
    }

    /// Toggle between the sign-in and sign-up forms.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear_messages();
        }
    }

    /// Mark a request as in flight. `None` if one already is.
    pub fn begin_submit(&mut self) -> Option<AuthTicket> {
        if self.submitting {
            return None;
        }
        self.generation += 1;
        self.submitting = true;
        self.clear_messages();
        Some(AuthTicket(self.generation))
    }

    /// Apply the identity service's answer. Success closes the dialog.
    ///
    /// Answers to a request made before the dialog was closed or reopened
    /// are dropped and leave the current form alone.
    pub fn finish_submit(
        &mut self,
        ticket: AuthTicket,
        result: Result<User, AuthError>,
    ) -> Option<User> {
        if ticket.0 != self.generation || !self.submitting {
            tracing::warn!(ticket = ticket.0, current = self.generation, "late auth result ignored");
            return None;
        }
        self.submitting = false;
        match result {
            Ok(user) => {
                self.close();
                Some(user)
            }
            Err(AuthError::Validation(errors)) => {
                self.field_errors = errors;
                None
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                None
            }
        }
    }

    /// Submit the sign-in form through the session owner.
    pub async fn sign_in(&mut self, session: &SessionOwner, credentials: &Credentials) -> Option<User> {
        let ticket = self.begin_submit()?;
        let result = session.sign_in(credentials).await;
        self.finish_submit(ticket, result)
    }

    /// Submit the sign-up form through the session owner.
    pub async fn sign_up(&mut self, session: &SessionOwner, registration: &Registration) -> Option<User> {
        let ticket = self.begin_submit()?;
        let result = session.sign_up(registration).await;
        self.finish_submit(ticket, result)
    }

    fn clear_messages(&mut self) {
        self.field_errors = FieldErrors::default();
        self.banner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyshop_auth::{InMemoryIdentity, PasswordHasher};
    use std::sync::Arc;

    fn session() -> SessionOwner {
        let identity = InMemoryIdentity::new(PasswordHasher::with_params(1024, 1).unwrap())
            .with_account("ky@shop.ph", "secret1", None)
            .unwrap();
        SessionOwner::new(Arc::new(identity))
    }

    #[tokio::test]
    async fn test_successful_sign_in_closes() {
        let session = session();
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignIn);

        let user = modal
            .sign_in(&session, &Credentials::new("ky@shop.ph", "secret1"))
            .await;
        assert!(user.is_some());
        assert!(!modal.is_open());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_password_shows_banner_and_stays_open() {
        let session = session();
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignIn);

        let user = modal
            .sign_in(&session, &Credentials::new("ky@shop.ph", "secret9"))
            .await;
        assert!(user.is_none());
        assert!(modal.is_open());
        assert!(!modal.is_submitting());
        assert_eq!(modal.banner(), Some("Invalid login credentials"));
        assert!(modal.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_field_errors_stay_next_to_fields() {
        let session = session();
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignUp);

        let registration = Registration {
            full_name: "Ky".to_string(),
            email: "ky@shop".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        modal.sign_up(&session, &registration).await;

        assert!(modal.is_open());
        assert_eq!(modal.banner(), None);
        assert_eq!(modal.field_error(Field::Email), Some("Invalid email address"));
        assert_eq!(
            modal.field_error(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_switching_mode_clears_messages() {
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignIn);
        let ticket = modal.begin_submit().unwrap();
        modal.finish_submit(ticket, Err(AuthError::InvalidCredentials));
        assert!(modal.banner().is_some());

        modal.switch_mode(AuthMode::SignUp);
        assert_eq!(modal.mode(), AuthMode::SignUp);
        assert_eq!(modal.banner(), None);
        assert_eq!(modal.mode().title(), "Sign Up");
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignIn);
        assert!(modal.begin_submit().is_some());
        assert!(modal.begin_submit().is_none());
        assert_eq!(modal.mode().busy_label(), "Signing In...");
    }

    #[test]
    fn test_answer_after_reopen_is_dropped() {
        let mut modal = AuthModal::new();
        modal.open(AuthMode::SignIn);
        let abandoned = modal.begin_submit().unwrap();
        modal.close();

        modal.open(AuthMode::SignIn);
        let current = modal.begin_submit().unwrap();
        assert_ne!(abandoned, current);

        assert!(modal
            .finish_submit(abandoned, Err(AuthError::InvalidCredentials))
            .is_none());
        assert!(modal.is_open());
        assert!(modal.is_submitting());
        assert_eq!(modal.banner(), None);

        let user = User::new("ky@shop.ph", None);
        assert!(modal.finish_submit(abandoned, Ok(user.clone())).is_none());
        assert!(modal.is_open());

        assert_eq!(modal.finish_submit(current, Ok(user.clone())), Some(user));
        assert!(!modal.is_open());
        assert!(!modal.is_submitting());
    }
}
