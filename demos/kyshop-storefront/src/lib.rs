//! Ky Shop browser storefront.
//!
//! Thin Leptos views over the `kyshop-ui` state machines:
//! - Hero carousel with auto-advance and a cooldown after manual navigation
//! - Category strip with scroll arrows
//! - Game grid filtered by category
//! - Auth-gated purchase dialog

mod app;
mod browser;
mod hero;
mod modals;
mod shelf;

pub use app::App;
