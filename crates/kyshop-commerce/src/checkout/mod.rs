//! Checkout module.
//!
//! Contains purchase transactions and the payment collaborator seam.

mod gateway;
mod transaction;

#[cfg(feature = "simulated")]
pub use gateway::SimulatedGateway;
pub use gateway::{PaymentGateway, PaymentOutcome};
pub use transaction::{PaymentMethod, Transaction, TransactionStatus};
