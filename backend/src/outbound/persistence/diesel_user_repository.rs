//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! The user aggregate spans two tables: `users` and the 1:1
//! `user_preferences` row created alongside it. Create and update run inside
//! a transaction so the pair never diverges.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{Page, RepositoryError, UserRepository, UserSortOrder};
use crate::domain::{NewUser, Order, Product, User, UserPatch, UserPreference, UserWithPreference};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewUserPreferenceRow, NewUserRow, OrderRow, ProductRow, UserChangeset, UserPreferenceRow,
    UserRow,
};
use super::pool::DbPool;
use super::schema::{orders, products, saved_products, user_preferences, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_preference<C>(
    conn: &mut C,
    user_id: Uuid,
) -> Result<Option<UserPreference>, diesel::result::Error>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let row: Option<UserPreferenceRow> = user_preferences::table
        .filter(user_preferences::user_id.eq(user_id))
        .select(UserPreferenceRow::as_select())
        .first(conn)
        .await
        .optional()?;

    Ok(row.map(UserPreference::from))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(
        &self,
        page: Page,
        order: UserSortOrder,
    ) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = users::table.select(UserRow::as_select()).into_boxed();
        query = match order {
            UserSortOrder::Oldest => query.order(users::created_at.asc()),
            UserSortOrder::Newest => query.order(users::created_at.desc()),
        };

        let rows: Vec<UserRow> = query
            .offset(page.offset)
            .limit(page.limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<UserWithPreference>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else { return Ok(None) };
        let preference = load_preference(&mut conn, id)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(UserWithPreference {
            user: row.into(),
            preference,
        }))
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPreference, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_row = NewUserRow {
            id: Uuid::new_v4(),
            name: user.name(),
            email: user.email(),
        };
        let preference_row = NewUserPreferenceRow {
            id: Uuid::new_v4(),
            user_id: user_row.id,
            receive_email: user.receive_email(),
        };

        conn.transaction::<UserWithPreference, RepositoryError, _>(|conn| {
            async move {
                let created: UserRow = diesel::insert_into(users::table)
                    .values(&user_row)
                    .returning(UserRow::as_returning())
                    .get_result(conn)
                    .await?;

                let preference: UserPreferenceRow =
                    diesel::insert_into(user_preferences::table)
                        .values(&preference_row)
                        .returning(UserPreferenceRow::as_returning())
                        .get_result(conn)
                        .await?;

                Ok(UserWithPreference {
                    user: created.into(),
                    preference: Some(preference.into()),
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserWithPreference>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserChangeset {
            name: patch.name(),
            email: patch.email(),
            updated_at: Utc::now(),
        };

        conn.transaction::<Option<UserWithPreference>, RepositoryError, _>(|conn| {
            async move {
                let row: Option<UserRow> = diesel::update(users::table.find(id))
                    .set(&changeset)
                    .returning(UserRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;

                let Some(row) = row else { return Ok(None) };

                if let Some(receive_email) = patch.receive_email() {
                    let updated = diesel::update(
                        user_preferences::table.filter(user_preferences::user_id.eq(id)),
                    )
                    .set(user_preferences::receive_email.eq(receive_email))
                    .execute(conn)
                    .await?;

                    if updated == 0 {
                        return Err(RepositoryError::not_found("user preference not found"));
                    }
                }

                let preference = load_preference(conn, id).await?;
                Ok(Some(UserWithPreference {
                    user: row.into(),
                    preference,
                }))
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn saved_products(
        &self,
        id: Uuid,
    ) -> Result<Option<Vec<Product>>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let exists: Option<Uuid> = users::table
            .find(id)
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows: Vec<ProductRow> = saved_products::table
            .inner_join(products::table)
            .filter(saved_products::user_id.eq(id))
            .order(saved_products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(rows.into_iter().map(Product::from).collect()))
    }

    async fn orders(&self, id: Uuid) -> Result<Option<Vec<Order>>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let exists: Option<Uuid> = users::table
            .find(id)
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(id))
            .order(orders::created_at.desc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(rows.into_iter().map(Order::from).collect()))
    }
}
