//! Port abstraction for order persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewOrder, OrderWithItems};

use super::RepositoryError;

/// Operations over orders and their line items.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order and all of its line items as a single atomic unit; a
    /// failure partway must leave no partial items behind.
    async fn create(&self, order: &NewOrder) -> Result<OrderWithItems, RepositoryError>;

    /// Fetch an order with its items; `None` when the id is unknown.
    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<OrderWithItems>, RepositoryError>;

    /// Delete the order and, per database policy, its items. Returns whether
    /// a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
