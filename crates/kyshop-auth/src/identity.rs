//! Identity service boundary.

use crate::credentials::{Credentials, Registration};
use crate::password::PasswordHasher;
use crate::session::Session;
use crate::user::User;
use crate::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// External identity provider.
///
/// Implementations receive input that has already passed field validation.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchange email and password for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError>;

    /// End the current session on the provider side.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

struct Account {
    user: User,
    password_hash: String,
}

/// Process-local identity service backed by argon2 hashes.
///
/// Used by the CLI, the browser demo when no provider is configured, and tests.
pub struct InMemoryIdentity {
    accounts: RwLock<HashMap<String, Account>>,
    hasher: PasswordHasher,
    // Verified against when the email is unknown, so both misses cost one argon2 run.
    dummy_hash: Option<String>,
    available: AtomicBool,
}

impl Default for InMemoryIdentity {
    fn default() -> Self {
        Self::new(PasswordHasher::default())
    }
}

impl InMemoryIdentity {
    pub fn new(hasher: PasswordHasher) -> Self {
        let dummy_hash = match hasher.hash("kyshop-unknown-account") {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "could not prepare placeholder hash");
                None
            }
        };
        Self {
            accounts: RwLock::new(HashMap::new()),
            hasher,
            dummy_hash,
            available: AtomicBool::new(true),
        }
    }

    /// Seed an account. Replaces any account with the same email.
    pub fn with_account(
        mut self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Self, AuthError> {
        let hash = self.hasher.hash(password)?;
        let user = User::new(normalize_email(email), full_name.map(str::to_string));
        self.accounts.get_mut().insert(
            user.email.clone(),
            Account {
                user,
                password_hash: hash,
            },
        );
        Ok(self)
    }

    /// Simulate the provider going offline (or coming back).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), AuthError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuthError::Unavailable("identity service offline".to_string()))
        }
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.ensure_available()?;
        let email = normalize_email(&credentials.email);
        let found = self
            .accounts
            .read()
            .await
            .get(&email)
            .map(|account| (account.user.clone(), account.password_hash.clone()));

        let Some((user, password_hash)) = found else {
            if let Some(dummy) = &self.dummy_hash {
                let _ = self.hasher.verify(&credentials.password, dummy);
            }
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(&credentials.password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session::issue(user))
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError> {
        self.ensure_available()?;
        let email = normalize_email(&registration.email);
        if self.accounts.read().await.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists(email));
        }

        // Hash outside the write lock; the duplicate check is repeated under it.
        let password_hash = self.hasher.hash(&registration.password)?;
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists(email));
        }
        let full_name = Some(registration.full_name.trim().to_string()).filter(|n| !n.is_empty());
        let user = User::new(email.clone(), full_name);
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(Session::issue(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_available()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> InMemoryIdentity {
        InMemoryIdentity::new(PasswordHasher::with_params(1024, 1).unwrap())
            .with_account("ky@shop.ph", "secret1", Some("Ky"))
            .unwrap()
    }

    fn registration(email: &str) -> Registration {
        Registration {
            full_name: "New Player".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_with_seeded_account() {
        let session = identity()
            .sign_in(&Credentials::new(" KY@shop.ph ", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.user.email, "ky@shop.ph");
        assert_eq!(session.user.display_name(), "Ky");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let identity = identity();
        let wrong = identity
            .sign_in(&Credentials::new("ky@shop.ph", "secret2"))
            .await
            .unwrap_err();
        let unknown = identity
            .sign_in(&Credentials::new("nobody@shop.ph", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let identity = identity();
        let session = identity.sign_up(&registration("new@shop.ph")).await.unwrap();
        assert_eq!(session.user.display_name(), "New Player");
        assert_eq!(identity.account_count().await, 2);

        let again = identity
            .sign_in(&registration("new@shop.ph").credentials())
            .await
            .unwrap();
        assert_eq!(again.user.id, session.user.id);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let err = identity()
            .sign_up(&registration("ky@shop.ph"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_is_checked_against_placeholder_hash() {
        let identity = identity();
        let dummy = identity.dummy_hash.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2id$"));
        assert!(!identity.hasher.verify("secret1", dummy).unwrap());

        let err = identity
            .sign_in(&Credentials::new("nobody@shop.ph", "kyshop-unknown-account"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_concurrent_sign_up_creates_one_account() {
        let identity = identity();
        let first = registration("race@shop.ph");
        let second = registration("RACE@shop.ph");
        let (a, b) = tokio::join!(identity.sign_up(&first), identity.sign_up(&second));

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let err = a.err().or(b.err()).unwrap();
        assert_eq!(err, AuthError::UserAlreadyExists("race@shop.ph".to_string()));
        assert_eq!(identity.account_count().await, 2);
    }

    #[tokio::test]
    async fn test_unavailable_provider() {
        let identity = identity();
        identity.set_available(false);
        let err = identity
            .sign_in(&Credentials::new("ky@shop.ph", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unavailable(_)));

        identity.set_available(true);
        assert!(identity.sign_out().await.is_ok());
    }
}
