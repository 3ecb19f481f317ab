//! Order data model.
//!
//! Orders own a collection of line items created atomically with them. The
//! derived `total` is never persisted; it is recomputed from the items on
//! every detail read.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by the order input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    InvalidUnitPrice,
    InvalidQuantity,
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUnitPrice => {
                write!(f, "unit price must be a non-negative finite number")
            }
            Self::InvalidQuantity => write!(f, "quantity must be at least 1"),
        }
    }
}

impl std::error::Error for OrderValidationError {}

/// Persisted order record without its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Persisted order line item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Order together with its line items, as returned by detail reads.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    /// Sum of `unit_price * quantity` over all line items.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.unit_price * f64::from(item.quantity))
            .sum()
    }
}

/// Validated input for creating an order and its items atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    user_id: Uuid,
    items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn new(user_id: Uuid, items: Vec<NewOrderItem>) -> Self {
        Self { user_id, items }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn items(&self) -> &[NewOrderItem] {
        &self.items
    }
}

/// Validated input for a single line item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    unit_price: f64,
    quantity: i32,
}

impl NewOrderItem {
    /// Validate and construct a line item.
    pub fn try_new(unit_price: f64, quantity: i32) -> Result<Self, OrderValidationError> {
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(OrderValidationError::InvalidUnitPrice);
        }
        if quantity < 1 {
            return Err(OrderValidationError::InvalidQuantity);
        }
        Ok(Self {
            unit_price,
            quantity,
        })
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn order_with_items(items: Vec<OrderItem>) -> OrderWithItems {
        OrderWithItems {
            order: Order {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                created_at: Utc::now(),
            },
            items,
        }
    }

    fn item(unit_price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn total_sums_unit_price_times_quantity() {
        let order = order_with_items(vec![item(10.0, 2), item(5.0, 3)]);
        assert_eq!(order.total(), 35.0);
    }

    #[test]
    fn total_of_empty_order_is_zero() {
        let order = order_with_items(Vec::new());
        assert_eq!(order.total(), 0.0);
    }

    #[rstest]
    #[case(f64::NAN, 1, OrderValidationError::InvalidUnitPrice)]
    #[case(-1.0, 1, OrderValidationError::InvalidUnitPrice)]
    #[case(1.0, 0, OrderValidationError::InvalidQuantity)]
    #[case(1.0, -3, OrderValidationError::InvalidQuantity)]
    fn item_constructor_rejects_invalid_input(
        #[case] unit_price: f64,
        #[case] quantity: i32,
        #[case] expected: OrderValidationError,
    ) {
        let err = NewOrderItem::try_new(unit_price, quantity).expect_err("invalid item");
        assert_eq!(err, expected);
    }

    #[test]
    fn order_may_have_no_items() {
        let order = NewOrder::new(Uuid::new_v4(), Vec::new());
        assert!(order.items().is_empty());
    }
}
