//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, pricing and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Discount percentage outside 0..=100.
    #[error("Invalid discount percentage: {0}")]
    InvalidDiscount(i64),

    /// The catalog source could not be reached.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Invalid transaction state transition.
    #[error("Invalid transaction transition from {from} to {to}")]
    InvalidTransactionTransition { from: String, to: String },
}
