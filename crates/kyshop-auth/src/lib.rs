//! Authentication for the Ky Shop storefront.
//!
//! The storefront never implements an authentication protocol itself. It
//! validates credential input, hands it to an [`IdentityService`], and keeps
//! the signed-in user in a single [`SessionOwner`] that the rest of the UI
//! observes.

mod credentials;
mod error;
mod identity;
mod password;
mod session;
mod user;

pub use credentials::{Credentials, Field, FieldErrors, Registration};
pub use error::AuthError;
pub use identity::{IdentityService, InMemoryIdentity};
pub use password::PasswordHasher;
pub use session::{Session, SessionOwner};
pub use user::User;
