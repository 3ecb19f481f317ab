//! List-query parsing: pagination window and sort order parameters.
//!
//! `offset` and `limit` are non-negative integers with defaults of 0 and 10.
//! Unrecognised `order` values deliberately fold into the `newest` case, so
//! `newest`, an unknown string, and an absent parameter all sort descending
//! by creation.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{Page, ProductSortOrder, UserSortOrder};

const DEFAULT_LIMIT: u32 = 10;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Sort orders accepted by `GET /users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum UserOrderParam {
    Oldest,
    #[serde(other)]
    Newest,
}

impl From<UserOrderParam> for UserSortOrder {
    fn from(value: UserOrderParam) -> Self {
        match value {
            UserOrderParam::Oldest => Self::Oldest,
            UserOrderParam::Newest => Self::Newest,
        }
    }
}

/// Sort orders accepted by `GET /products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ProductOrderParam {
    PriceLowest,
    PriceHighest,
    Oldest,
    #[serde(other)]
    Newest,
}

impl From<ProductOrderParam> for ProductSortOrder {
    fn from(value: ProductOrderParam) -> Self {
        match value {
            ProductOrderParam::PriceLowest => Self::PriceLowest,
            ProductOrderParam::PriceHighest => Self::PriceHighest,
            ProductOrderParam::Oldest => Self::Oldest,
            ProductOrderParam::Newest => Self::Newest,
        }
    }
}

/// Query parameters for `GET /users`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Records to skip from the start of the sort order.
    #[serde(default)]
    pub offset: u32,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Sort order; defaults to newest first.
    pub order: Option<UserOrderParam>,
}

impl UserListQuery {
    pub fn page(&self) -> Page {
        Page {
            offset: i64::from(self.offset),
            limit: i64::from(self.limit),
        }
    }

    pub fn sort_order(&self) -> UserSortOrder {
        self.order.map(Into::into).unwrap_or_default()
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Records to skip from the start of the sort order.
    #[serde(default)]
    pub offset: u32,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Sort order; defaults to newest first.
    pub order: Option<ProductOrderParam>,
    /// Exact-match category filter.
    pub category: Option<String>,
}

impl ProductListQuery {
    pub fn page(&self) -> Page {
        Page {
            offset: i64::from(self.offset),
            limit: i64::from(self.limit),
        }
    }

    pub fn sort_order(&self) -> ProductSortOrder {
        self.order.map(Into::into).unwrap_or_default()
    }
}
