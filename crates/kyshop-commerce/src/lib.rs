//! Catalog, pricing and checkout types for the Ky Shop storefront.
//!
//! - **Catalog**: promoted items for the hero carousel, catalog entries for
//!   the game grid, the bundled default data and the [`CatalogSource`] seam
//! - **Pricing**: integer [`Money`] and validated [`Discount`] percentages
//! - **Checkout**: purchase [`Transaction`]s and the [`PaymentGateway`] seam
//!
//! # Example
//!
//! ```rust
//! use kyshop_commerce::prelude::*;
//!
//! let price = Money::from_decimal(2999.50, Currency::PHP);
//! let discount = Discount::new(33).unwrap();
//! assert_eq!(discount.sale_price(price).display(), "\u{20b1}2009.67");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod discount;

pub mod catalog;
pub mod checkout;

pub use catalog::{CatalogEntry, CatalogSource, PromotedItem, StaticCatalog};
pub use checkout::{PaymentGateway, PaymentMethod, PaymentOutcome, Transaction, TransactionStatus};
pub use discount::Discount;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::discount::Discount;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        default_catalog, default_categories, default_promotions, load_catalog, load_promotions,
        CatalogEntry, CatalogSource, PromotedItem, StaticCatalog, ALL_CATEGORIES,
    };

    // Checkout
    pub use crate::checkout::{
        PaymentGateway, PaymentMethod, PaymentOutcome, Transaction, TransactionStatus,
    };
    #[cfg(feature = "simulated")]
    pub use crate::checkout::SimulatedGateway;
}
