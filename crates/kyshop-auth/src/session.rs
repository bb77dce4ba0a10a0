//! Session ownership.
//!
//! Exactly one [`SessionOwner`] exists per storefront. Components observe the
//! signed-in user through a [`watch::Receiver`] and never hold their own copy.

use crate::credentials::{Credentials, Registration};
use crate::identity::IdentityService;
use crate::user::User;
use crate::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Session lifetime issued by the in-memory identity service.
pub const SESSION_TTL_HOURS: i64 = 24;

/// An authenticated session returned by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// The signed-in user.
    pub user: User,
    /// Opaque bearer token.
    pub access_token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session for `user`.
    pub fn issue(user: User) -> Self {
        Self {
            user,
            access_token: generate_token(),
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Single owner of the signed-in state.
pub struct SessionOwner {
    identity: Arc<dyn IdentityService>,
    user: watch::Sender<Option<User>>,
}

impl SessionOwner {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        let (user, _) = watch::channel(None);
        Self { identity, user }
    }

    /// Observe sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Validate, then sign in. Invalid input never reaches the identity service.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User, AuthError> {
        credentials.validate().map_err(AuthError::Validation)?;
        let session = self.identity.sign_in(credentials).await.map_err(|e| {
            tracing::warn!(error = %e, "Sign-in failed");
            e
        })?;
        Ok(self.install(session))
    }

    /// Validate, then create an account. A successful sign-up is signed in.
    pub async fn sign_up(&self, registration: &Registration) -> Result<User, AuthError> {
        registration.validate().map_err(AuthError::Validation)?;
        let session = self.identity.sign_up(registration).await.map_err(|e| {
            tracing::warn!(error = %e, "Sign-up failed");
            e
        })?;
        Ok(self.install(session))
    }

    /// Clear the local user, then tell the identity service.
    ///
    /// The local state is cleared even when the service call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.user.send_replace(None);
        if let Some(user) = previous {
            tracing::info!(email = %user.email, "Signed out");
        }
        self.identity.sign_out().await
    }

    fn install(&self, session: Session) -> User {
        tracing::info!(email = %session.user.email, "Signed in");
        let user = session.user;
        self.user.send_replace(Some(user.clone()));
        user
    }
}

/// Generate a URL-safe random token.
fn generate_token() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 24] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InMemoryIdentity;
    use crate::password::PasswordHasher;
    use crate::Field;

    fn owner() -> SessionOwner {
        let identity = InMemoryIdentity::new(PasswordHasher::with_params(1024, 1).unwrap())
            .with_account("ky@shop.ph", "secret1", Some("Ky"))
            .unwrap();
        SessionOwner::new(Arc::new(identity))
    }

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        // 24 bytes base64 encoded
        assert_eq!(token.len(), 32);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_issued_session_is_live() {
        let session = Session::issue(User::new("ky@shop.ph", None));
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_sign_in_publishes_user() {
        let owner = owner();
        let mut rx = owner.subscribe();
        assert!(rx.borrow_and_update().is_none());

        let user = owner
            .sign_in(&Credentials::new("ky@shop.ph", "secret1"))
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&user));
        assert!(owner.is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_locally() {
        let owner = owner();
        let err = owner
            .sign_in(&Credentials::new("ky", "123"))
            .await
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get(Field::Email), Some("Invalid email address"));
        assert!(!owner.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_signed_out() {
        let owner = owner();
        let err = owner
            .sign_in(&Credentials::new("ky@shop.ph", "wrong-password"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(owner.current_user().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_signs_in_and_sign_out_clears() {
        let owner = owner();
        let registration = Registration {
            full_name: "New Player".to_string(),
            email: "new@shop.ph".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        let user = owner.sign_up(&registration).await.unwrap();
        assert_eq!(user.display_name(), "New Player");
        assert!(owner.is_authenticated());

        let rx = owner.subscribe();
        owner.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(!owner.is_authenticated());
    }
}
