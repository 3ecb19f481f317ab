//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Order creation inserts the order row and every line item inside one
//! transaction; a failure partway leaves no partial items behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{OrderRepository, RepositoryError};
use crate::domain::{NewOrder, OrderItem, OrderWithItems};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};
use super::pool::DbPool;
use super::schema::{order_items, orders};

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<OrderWithItems, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let order_row = NewOrderRow {
            id: Uuid::new_v4(),
            user_id: order.user_id(),
        };
        let item_rows: Vec<NewOrderItemRow> = order
            .items()
            .iter()
            .map(|item| NewOrderItemRow {
                id: Uuid::new_v4(),
                order_id: order_row.id,
                unit_price: item.unit_price(),
                quantity: item.quantity(),
            })
            .collect();

        conn.transaction::<OrderWithItems, RepositoryError, _>(|conn| {
            async move {
                let created: OrderRow = diesel::insert_into(orders::table)
                    .values(&order_row)
                    .returning(OrderRow::as_returning())
                    .get_result(conn)
                    .await?;

                let items: Vec<OrderItemRow> = if item_rows.is_empty() {
                    Vec::new()
                } else {
                    diesel::insert_into(order_items::table)
                        .values(&item_rows)
                        .returning(OrderItemRow::as_returning())
                        .get_results(conn)
                        .await?
                };

                Ok(OrderWithItems {
                    order: created.into(),
                    items: items.into_iter().map(OrderItem::from).collect(),
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OrderRow> = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else { return Ok(None) };

        let items: Vec<OrderItemRow> = order_items::table
            .filter(order_items::order_id.eq(id))
            .select(OrderItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(OrderWithItems {
            order: row.into(),
            items: items.into_iter().map(OrderItem::from).collect(),
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(orders::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
