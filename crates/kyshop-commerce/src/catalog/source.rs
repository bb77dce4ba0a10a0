//! Catalog data source seam.

use super::defaults::{default_catalog, default_promotions};
use super::{CatalogEntry, PromotedItem};
use crate::CommerceError;
use async_trait::async_trait;

/// Supplies the games shown by the storefront.
///
/// Implementations talk to the hosted database; the storefront only reads.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Entries for the game grid, in display order.
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CommerceError>;

    /// Items for the hero carousel, in display order.
    async fn promotions(&self) -> Result<Vec<PromotedItem>, CommerceError>;
}

/// In-memory catalog. `StaticCatalog::default()` is empty, which makes the
/// loaders fall back to the bundled data.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
    promotions: Vec<PromotedItem>,
}

impl StaticCatalog {
    /// Create a catalog from explicit data.
    pub fn new(entries: Vec<CatalogEntry>, promotions: Vec<PromotedItem>) -> Self {
        Self {
            entries,
            promotions,
        }
    }

    /// The bundled demo data.
    pub fn bundled() -> Self {
        Self::new(default_catalog(), default_promotions())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CommerceError> {
        Ok(self.entries.clone())
    }

    async fn promotions(&self) -> Result<Vec<PromotedItem>, CommerceError> {
        Ok(self.promotions.clone())
    }
}

/// Load grid entries, falling back to the bundled set when the source is
/// empty or unreachable.
pub async fn load_catalog(source: &dyn CatalogSource) -> Vec<CatalogEntry> {
    match source.catalog().await {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            tracing::debug!("catalog source empty, using bundled catalog");
            default_catalog()
        }
        Err(error) => {
            tracing::warn!(%error, "catalog source failed, using bundled catalog");
            default_catalog()
        }
    }
}

/// Load carousel items, falling back to the bundled set when the source is
/// empty or unreachable.
pub async fn load_promotions(source: &dyn CatalogSource) -> Vec<PromotedItem> {
    match source.promotions().await {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            tracing::debug!("promotion source empty, using bundled promotions");
            default_promotions()
        }
        Err(error) => {
            tracing::warn!(%error, "promotion source failed, using bundled promotions");
            default_promotions()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    #[async_trait]
    impl CatalogSource for Unreachable {
        async fn catalog(&self) -> Result<Vec<CatalogEntry>, CommerceError> {
            Err(CommerceError::CatalogUnavailable("offline".to_string()))
        }

        async fn promotions(&self) -> Result<Vec<PromotedItem>, CommerceError> {
            Err(CommerceError::CatalogUnavailable("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_source_falls_back() {
        let source = StaticCatalog::default();
        assert_eq!(load_catalog(&source).await, default_catalog());
        assert_eq!(load_promotions(&source).await, default_promotions());
    }

    #[tokio::test]
    async fn test_failing_source_falls_back() {
        assert_eq!(load_catalog(&Unreachable).await.len(), 13);
        assert_eq!(load_promotions(&Unreachable).await.len(), 3);
    }

    #[tokio::test]
    async fn test_non_empty_source_is_used() {
        let mut entries = default_catalog();
        entries.truncate(2);
        let source = StaticCatalog::new(entries.clone(), Vec::new());
        assert_eq!(load_catalog(&source).await, entries);
    }
}
