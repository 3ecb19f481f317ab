//! Port abstraction for product persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewProduct, Product, ProductPatch};

use super::{Page, ProductSortOrder, RepositoryError};

/// CRUD operations over the product catalogue.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products inside the requested window, optionally restricted to
    /// an exact category match.
    async fn list(
        &self,
        page: Page,
        order: ProductSortOrder,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Fetch a product; `None` when the id is unknown.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;

    /// Create a product. Duplicate names surface as `UniqueViolation`.
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;

    /// Apply a partial update; `None` when the id is unknown.
    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Delete the product. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
