//! Presentation state for the Ky Shop storefront.
//!
//! Each piece is a plain state machine that a view owns and drives:
//!
//! - [`SlideState`]: hero carousel with auto-play that pauses after manual navigation
//! - [`CategoryFilterState`]: active category and the visible part of the catalog
//! - [`ScrollAffordanceState`]: left/right arrows of the category strip
//! - [`AuthModal`] and [`PurchaseModal`]: the auth-gated purchase flow
//!
//! Nothing here reads a clock. Time enters as `now` (elapsed since mount),
//! which is what lets the same code run under tokio, in the browser, and in
//! tests.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use kyshop_ui::{CarouselTiming, SlideState};
//!
//! let mut carousel = SlideState::new(vec!["a", "b", "c"], CarouselTiming::default(), Duration::ZERO);
//! carousel.go_to(2, Duration::from_secs(1)).unwrap();
//! assert_eq!(carousel.current_item(), Some(&"c"));
//! assert!(!carousel.is_auto());
//! ```

mod auth_modal;
mod carousel;
mod category;
mod config;
mod error;
mod purchase;
mod scroll;

#[cfg(feature = "runtime")]
mod runtime;

pub use auth_modal::{AuthMode, AuthModal, AuthTicket};
pub use carousel::{CarouselTiming, Mode, SlideEvent, SlideState};
pub use category::{CategoryFilterState, GridView, NO_RESULTS_MESSAGE};
pub use config::{
    generate_default_config, CarouselConfig, CheckoutConfig, IdentityConfig, ScrollConfig,
    StorefrontConfig, IDENTITY_KEY_ENV, IDENTITY_URL_ENV,
};
pub use error::UiError;
pub use purchase::{
    buy_button_label, request_purchase, route_purchase, ModalRoute, PurchaseModal, PurchasePhase,
    PurchaseQuote, PurchaseTicket,
};
pub use scroll::{Arrows, Direction, ScrollAffordanceState, ScrollGeometry, ScrollSettings, SmoothScroll};

#[cfg(feature = "runtime")]
pub use runtime::{CarouselHandle, CarouselSnapshot};
