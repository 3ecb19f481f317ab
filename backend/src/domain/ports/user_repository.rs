//! Port abstraction for user persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, Order, Product, User, UserPatch, UserWithPreference};

use super::{Page, RepositoryError, UserSortOrder};

/// CRUD operations over users and their owned relations.
///
/// Reads returning `Option` report a missing record as `None`; the caller
/// decides whether absence is an error. `create` and `update` must apply the
/// user row and its preference row as a single atomic unit.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users inside the requested window, without their preferences.
    async fn list(&self, page: Page, order: UserSortOrder)
    -> Result<Vec<User>, RepositoryError>;

    /// Fetch a user and its preference record.
    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<UserWithPreference>, RepositoryError>;

    /// Create a user and its preference record atomically.
    async fn create(&self, user: &NewUser) -> Result<UserWithPreference, RepositoryError>;

    /// Apply a partial update; a present preference flag is forwarded as a
    /// nested update of the preference record. Returns `None` when the user
    /// does not exist; a missing preference row during a nested update is a
    /// `NotFound` error.
    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserWithPreference>, RepositoryError>;

    /// Delete the user; whether owned relations cascade is the database's
    /// policy. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Products the user has saved, or `None` when the user does not exist.
    async fn saved_products(&self, id: Uuid)
    -> Result<Option<Vec<Product>>, RepositoryError>;

    /// Orders owned by the user, without their items, or `None` when the
    /// user does not exist.
    async fn orders(&self, id: Uuid) -> Result<Option<Vec<Order>>, RepositoryError>;
}
