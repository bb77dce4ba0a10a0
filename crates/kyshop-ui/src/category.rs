//! Category filter over the game grid.

use kyshop_commerce::catalog::{default_categories, same_label, ALL_CATEGORIES};
use kyshop_commerce::CatalogEntry;

/// Shown when the active category has no games.
pub const NO_RESULTS_MESSAGE: &str = "No games found in this category.";

/// What the game grid should render.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView<'a> {
    /// Entries have not been loaded yet.
    Loading,
    /// Loaded, but nothing matches `category`.
    Empty { category: &'a str },
    /// Matching entries in catalog order.
    Entries(Vec<&'a CatalogEntry>),
}

/// Active category and the derived visible subset of the catalog.
#[derive(Debug, Clone)]
pub struct CategoryFilterState {
    categories: Vec<String>,
    entries: Option<Vec<CatalogEntry>>,
    active: String,
    visible: Vec<usize>,
}

impl Default for CategoryFilterState {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl CategoryFilterState {
    /// Filter with the given strip labels, nothing loaded, `"All"` active.
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            entries: None,
            active: ALL_CATEGORIES.to_string(),
            visible: Vec::new(),
        }
    }

    /// Filter over an already-loaded catalog.
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut state = Self::default();
        state.load(entries);
        state
    }

    /// Install the catalog and recompute.
    pub fn load(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = Some(entries);
        self.recompute();
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    /// Category strip labels.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active_category(&self) -> &str {
        &self.active
    }

    /// Whether `label` is the highlighted strip button.
    pub fn is_active(&self, label: &str) -> bool {
        same_label(label, &self.active)
    }

    /// Grid heading: "Featured Deals" for all games, else "<Category> Games".
    pub fn heading(&self) -> String {
        if self.shows_all() {
            "Featured Deals".to_string()
        } else {
            format!("{} Games", self.active)
        }
    }

    /// Set the active category and recompute the visible subset.
    pub fn select_category(&mut self, name: &str) {
        self.active = name.trim().to_string();
        self.recompute();
    }

    /// Derive the visible subset. Idempotent.
    pub fn recompute(&mut self) {
        let Some(entries) = &self.entries else {
            self.visible.clear();
            return;
        };

        self.visible = if self.shows_all() {
            (0..entries.len()).collect()
        } else {
            entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.is_genre(&self.active))
                .map(|(i, _)| i)
                .collect()
        };
        tracing::debug!(
            category = %self.active,
            visible = self.visible.len(),
            "category filter recomputed"
        );
    }

    /// Visible entries in catalog order.
    pub fn visible(&self) -> Vec<&CatalogEntry> {
        match &self.entries {
            Some(entries) => self.visible.iter().map(|&i| &entries[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> GridView<'_> {
        if self.entries.is_none() {
            return GridView::Loading;
        }
        let visible = self.visible();
        if visible.is_empty() {
            GridView::Empty {
                category: &self.active,
            }
        } else {
            GridView::Entries(visible)
        }
    }

    fn shows_all(&self) -> bool {
        same_label(&self.active, ALL_CATEGORIES)
    }
}
