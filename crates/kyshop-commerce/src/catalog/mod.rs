//! Game catalog module.
//!
//! Contains the promoted items shown by the hero carousel, the entries shown
//! in the game grid, the bundled default data, and the source seam.

mod defaults;
mod item;
mod source;

pub use defaults::{default_catalog, default_categories, default_promotions, ALL_CATEGORIES};
pub use item::{same_label, CatalogEntry, PromotedItem};
pub use source::{load_catalog, load_promotions, CatalogSource, StaticCatalog};
