//! Promoted items and catalog entries.

use crate::discount::Discount;
use crate::ids::GameId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A game featured in the hero carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotedItem {
    /// Unique game identifier.
    pub id: GameId,
    /// Display title.
    pub title: String,
    /// Banner image URL.
    pub image_url: String,
    /// Short pitch shown under the title.
    pub description: String,
    /// Price before discount.
    pub original_price: Money,
    /// Percentage off.
    pub discount: Discount,
}

impl PromotedItem {
    /// Price after discount.
    pub fn sale_price(&self) -> Money {
        self.discount.sale_price(self.original_price)
    }
}

/// A game listed in the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Unique game identifier.
    pub id: GameId,
    /// Display title.
    pub title: String,
    /// Cover image URL.
    pub cover_image: String,
    /// Price before discount.
    pub original_price: Money,
    /// Percentage off.
    pub discount: Discount,
    /// Card description.
    pub description: String,
    /// Platform tags (e.g. "PC", "Switch").
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Genre tag used by the category filter.
    pub genre: String,
}

impl CatalogEntry {
    /// Price after discount.
    pub fn sale_price(&self) -> Money {
        self.discount.sale_price(self.original_price)
    }

    /// Amount saved by the discount.
    pub fn savings(&self) -> Money {
        self.discount.savings(self.original_price)
    }

    /// Case-insensitive genre match.
    pub fn is_genre(&self, genre: &str) -> bool {
        same_label(&self.genre, genre)
    }
}

/// Category and genre labels compare with full Unicode lowercasing.
pub fn same_label(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
