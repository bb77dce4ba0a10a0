//! Auth-gated purchase flow.
//!
//! A buy click routes to the auth dialog when nobody is signed in and to the
//! purchase dialog otherwise. The purchase dialog moves through
//! [`PurchasePhase`]s around one call to a
//! [`PaymentGateway`](kyshop_commerce::PaymentGateway). That call cannot be
//! cancelled, so every submission carries a [`PurchaseTicket`]; closing or
//! reopening the dialog invalidates outstanding tickets and their results
//! are dropped.

use kyshop_auth::User;
use kyshop_commerce::{
    CatalogEntry, Discount, GameId, Money, PaymentGateway, PaymentOutcome, PromotedItem,
    Transaction,
};
use serde::{Deserialize, Serialize};

use crate::auth_modal::{AuthMode, AuthModal};
use crate::UiError;

/// Price breakdown shown in the purchase dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    pub game_id: GameId,
    pub title: String,
    pub image_url: String,
    pub platforms: Vec<String>,
    pub original_price: Money,
    pub discount: Discount,
}

impl PurchaseQuote {
    pub fn sale_price(&self) -> Money {
        self.discount.sale_price(self.original_price)
    }

    pub fn savings(&self) -> Money {
        self.discount.savings(self.original_price)
    }

    /// "Discount (33%):"
    pub fn discount_label(&self) -> String {
        format!("Discount ({}):", self.discount)
    }

    /// Confirm button text.
    pub fn confirm_label(&self) -> String {
        format!("Purchase for {}", self.sale_price().display())
    }

    pub fn success_message(&self) -> String {
        format!("{} has been added to your library.", self.title)
    }
}

impl From<&CatalogEntry> for PurchaseQuote {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            game_id: entry.id.clone(),
            title: entry.title.clone(),
            image_url: entry.cover_image.clone(),
            platforms: entry.platforms.clone(),
            original_price: entry.original_price,
            discount: entry.discount,
        }
    }
}

impl From<&PromotedItem> for PurchaseQuote {
    fn from(item: &PromotedItem) -> Self {
        Self {
            game_id: item.id.clone(),
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            platforms: Vec::new(),
            original_price: item.original_price,
            discount: item.discount,
        }
    }
}

/// Which dialog a buy click opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRoute {
    SignIn,
    Purchase,
}

pub fn route_purchase(user: Option<&User>) -> ModalRoute {
    match user {
        Some(_) => ModalRoute::Purchase,
        None => ModalRoute::SignIn,
    }
}

/// Label of the card's buy button.
pub fn buy_button_label(user: Option<&User>) -> &'static str {
    match route_purchase(user) {
        ModalRoute::Purchase => "Buy Now",
        ModalRoute::SignIn => "Sign In to Purchase",
    }
}

/// Handle a buy click: open the auth dialog or the purchase dialog.
pub fn request_purchase(
    user: Option<&User>,
    quote: PurchaseQuote,
    auth: &mut AuthModal,
    purchase: &mut PurchaseModal,
) -> ModalRoute {
    let route = route_purchase(user);
    match route {
        ModalRoute::SignIn => auth.open(AuthMode::SignIn),
        ModalRoute::Purchase => purchase.open(quote),
    }
    route
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PurchasePhase {
    Closed,
    /// Price breakdown and confirm button.
    Review,
    /// Waiting for the payment gateway.
    Processing,
    Complete { reference: String },
    /// Back at review with a banner; confirming again retries.
    Failed { message: String },
}

/// Identifies one submission to the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PurchaseTicket(u64);

/// Purchase dialog state.
#[derive(Debug, Clone)]
pub struct PurchaseModal {
    quote: Option<PurchaseQuote>,
    phase: PurchasePhase,
    transaction: Option<Transaction>,
    generation: u64,
}

impl Default for PurchaseModal {
    fn default() -> Self {
        Self {
            quote: None,
            phase: PurchasePhase::Closed,
            transaction: None,
            generation: 0,
        }
    }
}

impl PurchaseModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.phase != PurchasePhase::Closed
    }

    pub fn phase(&self) -> &PurchasePhase {
        &self.phase
    }

    pub fn quote(&self) -> Option<&PurchaseQuote> {
        self.quote.as_ref()
    }

    /// The transaction of the latest submission.
    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.phase == PurchasePhase::Processing
    }

    /// Retryable error shown above the confirm button.
    pub fn banner(&self) -> Option<&str> {
        match &self.phase {
            PurchasePhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Open for `quote`. Any submission still in flight becomes stale.
    pub fn open(&mut self, quote: PurchaseQuote) {
        self.generation += 1;
        self.quote = Some(quote);
        self.transaction = None;
        self.phase = PurchasePhase::Review;
    }

    /// Close. Any submission still in flight becomes stale.
    pub fn close(&mut self) {
        self.generation += 1;
        self.quote = None;
        self.transaction = None;
        self.phase = PurchasePhase::Closed;
    }

    /// Confirm the purchase: build the pending transaction and enter
    /// `Processing`. Allowed from `Review` and `Failed`.
    pub fn begin(&mut self, user: Option<&User>) -> Result<(PurchaseTicket, Transaction), UiError> {
        let user = user.ok_or(UiError::NotSignedIn)?;
        match self.phase {
            PurchasePhase::Review | PurchasePhase::Failed { .. } => {}
            PurchasePhase::Processing => return Err(UiError::AlreadyProcessing),
            PurchasePhase::Closed | PurchasePhase::Complete { .. } => {
                return Err(UiError::PurchaseNotOpen)
            }
        }
        let quote = self.quote.as_ref().ok_or(UiError::PurchaseNotOpen)?;

        let transaction = Transaction::pending(
            user.id.clone(),
            quote.game_id.clone(),
            quote.title.clone(),
            quote.sale_price(),
        );
        tracing::debug!(
            transaction = %transaction.id,
            game = %quote.game_id,
            amount = %transaction.amount,
            "purchase submitted"
        );

        self.generation += 1;
        self.transaction = Some(transaction.clone());
        self.phase = PurchasePhase::Processing;
        Ok((PurchaseTicket(self.generation), transaction))
    }

    /// Same as [`begin`](Self::begin), from the failed state.
    pub fn retry(&mut self, user: Option<&User>) -> Result<(PurchaseTicket, Transaction), UiError> {
        self.begin(user)
    }

    /// Apply the gateway's answer. Returns false when the ticket is stale
    /// and the result was dropped.
    pub fn resolve(&mut self, ticket: PurchaseTicket, outcome: PaymentOutcome) -> bool {
        if ticket.0 != self.generation || !self.is_processing() {
            tracing::warn!(ticket = ticket.0, current = self.generation, "late purchase result ignored");
            return false;
        }

        let status = match self.transaction.as_mut() {
            Some(transaction) if outcome.is_approved() => transaction.complete(),
            Some(transaction) => transaction.fail(),
            None => Ok(()),
        };
        if let Err(e) = status {
            tracing::warn!(error = %e, "transaction already settled");
        }

        self.phase = match outcome {
            PaymentOutcome::Approved { reference } => {
                tracing::info!(
                    reference = %reference,
                    game = ?self.quote.as_ref().map(|q| q.game_id.as_str()),
                    "purchase completed"
                );
                PurchasePhase::Complete { reference }
            }
            PaymentOutcome::Declined { reason } => {
                tracing::warn!(reason = %reason, "purchase declined");
                PurchasePhase::Failed { message: reason }
            }
        };
        true
    }

    /// Confirm and wait for the gateway in one step.
    ///
    /// The dialog is borrowed for the whole call, so nothing can close it in
    /// between; UIs that must stay responsive use `begin` and `resolve`.
    pub async fn confirm(
        &mut self,
        user: Option<&User>,
        gateway: &dyn PaymentGateway,
    ) -> Result<&PurchasePhase, UiError> {
        let (ticket, transaction) = self.begin(user)?;
        let outcome = gateway.submit(&transaction).await;
        self.resolve(ticket, outcome);
        Ok(&self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyshop_commerce::catalog::default_catalog;
    use kyshop_commerce::{PaymentMethod, TransactionStatus};

    fn user() -> User {
        User::new("ky@shop.ph", None)
    }

    fn quote() -> PurchaseQuote {
        PurchaseQuote::from(&default_catalog()[0])
    }

    fn approved() -> PaymentOutcome {
        PaymentOutcome::Approved {
            reference: "ref_1".to_string(),
        }
    }

    #[test]
    fn test_unauthenticated_buy_opens_sign_in() {
        let mut auth = AuthModal::new();
        let mut purchase = PurchaseModal::new();
        let route = request_purchase(None, quote(), &mut auth, &mut purchase);
        assert_eq!(route, ModalRoute::SignIn);
        assert!(auth.is_open());
        assert_eq!(auth.mode(), AuthMode::SignIn);
        assert!(!purchase.is_open());
        assert_eq!(buy_button_label(None), "Sign In to Purchase");
    }

    #[test]
    fn test_authenticated_buy_opens_purchase() {
        let user = user();
        let mut auth = AuthModal::new();
        let mut purchase = PurchaseModal::new();
        let route = request_purchase(Some(&user), quote(), &mut auth, &mut purchase);
        assert_eq!(route, ModalRoute::Purchase);
        assert!(!auth.is_open());
        assert_eq!(purchase.phase(), &PurchasePhase::Review);
        assert_eq!(buy_button_label(Some(&user)), "Buy Now");
    }

    #[test]
    fn test_begin_builds_pending_transaction() {
        let user = user();
        let mut modal = PurchaseModal::new();
        let quote = quote();
        modal.open(quote.clone());

        let (_, transaction) = modal.begin(Some(&user)).unwrap();
        assert_eq!(transaction.user_id, user.id);
        assert_eq!(transaction.game_id, quote.game_id);
        assert_eq!(transaction.amount, quote.sale_price());
        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert_eq!(transaction.payment_method, PaymentMethod::CreditCard);
        assert!(modal.is_processing());
        assert_eq!(modal.begin(Some(&user)).unwrap_err(), UiError::AlreadyProcessing);
    }

    #[test]
    fn test_begin_requires_user_and_open_modal() {
        let mut modal = PurchaseModal::new();
        assert_eq!(modal.begin(Some(&user())).unwrap_err(), UiError::PurchaseNotOpen);
        modal.open(quote());
        assert_eq!(modal.begin(None).unwrap_err(), UiError::NotSignedIn);
    }

    #[test]
    fn test_approved_completes() {
        let user = user();
        let mut modal = PurchaseModal::new();
        modal.open(quote());
        let (ticket, _) = modal.begin(Some(&user)).unwrap();

        assert!(modal.resolve(ticket, approved()));
        assert_eq!(
            modal.phase(),
            &PurchasePhase::Complete {
                reference: "ref_1".to_string()
            }
        );
        assert_eq!(
            modal.transaction().unwrap().status,
            TransactionStatus::Completed
        );
    }

    #[test]
    fn test_declined_then_retry() {
        let user = user();
        let mut modal = PurchaseModal::new();
        modal.open(quote());
        let (ticket, _) = modal.begin(Some(&user)).unwrap();
        modal.resolve(
            ticket,
            PaymentOutcome::Declined {
                reason: "Card declined".to_string(),
            },
        );
        assert_eq!(modal.banner(), Some("Card declined"));
        assert_eq!(modal.transaction().unwrap().status, TransactionStatus::Failed);

        let (retry, transaction) = modal.retry(Some(&user)).unwrap();
        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert!(modal.banner().is_none());
        assert!(modal.resolve(retry, approved()));
        assert!(matches!(modal.phase(), PurchasePhase::Complete { .. }));
    }

    #[test]
    fn test_result_after_close_is_ignored() {
        let user = user();
        let mut modal = PurchaseModal::new();
        modal.open(quote());
        let (ticket, _) = modal.begin(Some(&user)).unwrap();
        modal.close();

        assert!(!modal.resolve(ticket, approved()));
        assert_eq!(modal.phase(), &PurchasePhase::Closed);
    }

    #[test]
    fn test_result_for_previous_game_is_ignored() {
        let user = user();
        let catalog = default_catalog();
        let mut modal = PurchaseModal::new();
        modal.open(PurchaseQuote::from(&catalog[0]));
        let (stale, _) = modal.begin(Some(&user)).unwrap();

        modal.open(PurchaseQuote::from(&catalog[1]));
        assert!(!modal.resolve(stale, approved()));
        assert_eq!(modal.phase(), &PurchasePhase::Review);
        assert_eq!(modal.quote().unwrap().game_id, catalog[1].id);
    }

    #[test]
    fn test_labels() {
        let quote = PurchaseQuote {
            game_id: GameId::new("g"),
            title: "Cyberpunk 2077".to_string(),
            image_url: String::new(),
            platforms: Vec::new(),
            original_price: Money::from_decimal(2999.50, kyshop_commerce::Currency::PHP),
            discount: Discount::new(33).unwrap(),
        };
        assert_eq!(quote.confirm_label(), "Purchase for \u{20b1}2009.67");
        assert_eq!(quote.discount_label(), "Discount (33%):");
        assert_eq!(
            quote.success_message(),
            "Cyberpunk 2077 has been added to your library."
        );
    }
}
