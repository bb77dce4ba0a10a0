//! Payment collaborator seam.

use super::Transaction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of submitting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentOutcome {
    /// Payment captured.
    Approved {
        /// Processor reference.
        reference: String,
    },
    /// Payment refused; the user may retry.
    Declined {
        /// Human-readable reason.
        reason: String,
    },
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentOutcome::Approved { .. })
    }
}

/// Processes purchase transactions.
///
/// Implementations may be remote and slow. Transport failures are reported
/// as [`PaymentOutcome::Declined`] so the caller has one failure path.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(&self, transaction: &Transaction) -> PaymentOutcome;
}

/// Gateway that waits a fixed delay and then answers with a canned outcome.
#[cfg(feature = "simulated")]
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: std::time::Duration,
    decline_reason: Option<String>,
}

#[cfg(feature = "simulated")]
impl SimulatedGateway {
    /// Approve every transaction after `delay`.
    pub fn new(delay: std::time::Duration) -> Self {
        Self {
            delay,
            decline_reason: None,
        }
    }

    /// Decline every transaction after `delay`.
    pub fn declining(delay: std::time::Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            decline_reason: Some(reason.into()),
        }
    }
}

#[cfg(feature = "simulated")]
#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn submit(&self, transaction: &Transaction) -> PaymentOutcome {
        tracing::debug!(
            transaction = %transaction.id,
            game = %transaction.game_id,
            amount = %transaction.amount,
            "simulating payment"
        );
        tokio::time::sleep(self.delay).await;

        match &self.decline_reason {
            Some(reason) => PaymentOutcome::Declined {
                reason: reason.clone(),
            },
            None => PaymentOutcome::Approved {
                reference: format!("sim_{}", transaction.id),
            },
        }
    }
}

#[cfg(all(test, feature = "simulated"))]
mod tests {
    use super::*;
    use crate::ids::{GameId, UserId};
    use crate::money::{Currency, Money};
    use std::time::Duration;

    fn tx() -> Transaction {
        Transaction::pending(
            UserId::new("user-1"),
            GameId::new("4"),
            "Hades",
            Money::new(99960, Currency::PHP),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_gateway_waits_then_approves() {
        let gateway = SimulatedGateway::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let outcome = gateway.submit(&tx()).await;

        assert!(outcome.is_approved());
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_declining_gateway() {
        let gateway = SimulatedGateway::declining(Duration::from_millis(10), "card declined");
        assert_eq!(
            gateway.submit(&tx()).await,
            PaymentOutcome::Declined {
                reason: "card declined".to_string()
            }
        );
    }
}
