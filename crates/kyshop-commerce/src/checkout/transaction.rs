//! Purchase transaction records.

use crate::ids::{GameId, TransactionId, UserId};
use crate::money::Money;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Submitted, awaiting the payment collaborator.
    #[default]
    Pending,
    /// Paid; the game belongs to the user.
    Completed,
    /// Declined or errored.
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Check if the transaction can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// How the user pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

/// A purchase of one game by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// Buyer.
    pub user_id: UserId,
    /// Purchased game.
    pub game_id: GameId,
    /// Game title at purchase time.
    pub game_title: String,
    /// Amount charged (the sale price).
    pub amount: Money,
    /// Current status.
    pub status: TransactionStatus,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a pending credit-card transaction.
    pub fn pending(
        user_id: UserId,
        game_id: GameId,
        game_title: impl Into<String>,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::generate(),
            user_id,
            game_id,
            game_title: game_title.into(),
            amount,
            status: TransactionStatus::Pending,
            payment_method: PaymentMethod::CreditCard,
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a different payment method.
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Mark as paid.
    pub fn complete(&mut self) -> Result<(), CommerceError> {
        self.transition(TransactionStatus::Completed)
    }

    /// Mark as failed.
    pub fn fail(&mut self) -> Result<(), CommerceError> {
        self.transition(TransactionStatus::Failed)
    }

    fn transition(&mut self, to: TransactionStatus) -> Result<(), CommerceError> {
        if self.status.is_terminal() {
            return Err(CommerceError::InvalidTransactionTransition {
                from: self.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn tx() -> Transaction {
        Transaction::pending(
            UserId::new("user-1"),
            GameId::new("3"),
            "Civilization VI",
            Money::new(62488, Currency::PHP),
        )
    }

    #[test]
    fn test_pending_defaults() {
        let tx = tx();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.payment_method, PaymentMethod::CreditCard);
        assert_eq!(tx.created_at, tx.updated_at);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut tx = tx();
        assert!(tx.complete().is_ok());
        assert_eq!(tx.status, TransactionStatus::Completed);
        assert!(tx.fail().is_err());
    }

    #[test]
    fn test_serialized_status_is_snake_case() {
        let json = serde_json::to_value(tx()).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["payment_method"], "credit_card");
    }
}
