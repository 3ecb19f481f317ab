//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{Page, ProductRepository, ProductSortOrder, RepositoryError};
use crate::domain::{NewProduct, Product, ProductPatch};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductChangeset, ProductRow};
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list(
        &self,
        page: Page,
        order: ProductSortOrder,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = products::table.select(ProductRow::as_select()).into_boxed();
        if let Some(category) = category {
            query = query.filter(products::category.eq(category.to_owned()));
        }
        query = match order {
            ProductSortOrder::PriceLowest => query.order(products::price.asc()),
            ProductSortOrder::PriceHighest => query.order(products::price.desc()),
            ProductSortOrder::Oldest => query.order(products::created_at.asc()),
            ProductSortOrder::Newest => query.order(products::created_at.desc()),
        };

        let rows: Vec<ProductRow> = query
            .offset(page.offset)
            .limit(page.limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProductRow> = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Product::from))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewProductRow {
            id: Uuid::new_v4(),
            name: product.name(),
            category: product.category(),
            price: product.price(),
        };

        let created: ProductRow = diesel::insert_into(products::table)
            .values(&new_row)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(created.into())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ProductChangeset {
            name: patch.name(),
            category: patch.category(),
            price: patch.price(),
            updated_at: Utc::now(),
        };

        let row: Option<ProductRow> = diesel::update(products::table.find(id))
            .set(&changeset)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Product::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
