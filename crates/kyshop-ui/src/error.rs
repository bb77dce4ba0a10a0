//! Storefront state errors.

use kyshop_auth::AuthError;
use kyshop_commerce::CommerceError;
use thiserror::Error;

/// Errors raised by the storefront state layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// `go_to` with an index outside `[0, len)`.
    #[error("Slide {index} out of range (carousel has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    /// A purchase action with no game in the modal.
    #[error("No purchase in progress")]
    PurchaseNotOpen,

    /// Confirm was pressed while a payment is already being processed.
    #[error("Payment already processing")]
    AlreadyProcessing,

    /// Purchase confirmed without a signed-in user.
    #[error("Sign in to purchase")]
    NotSignedIn,

    /// No catalog entry with this ID.
    #[error("Game not found: {0}")]
    GameNotFound(String),

    /// The carousel driver task is gone.
    #[error("Carousel driver stopped")]
    DriverStopped,

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl From<toml::de::Error> for UiError {
    fn from(err: toml::de::Error) -> Self {
        UiError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for UiError {
    fn from(err: toml::ser::Error) -> Self {
        UiError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Config(err.to_string())
    }
}
