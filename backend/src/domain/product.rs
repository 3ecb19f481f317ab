//! Product data model.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors raised by the product input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyCategory,
    InvalidPrice,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::InvalidPrice => write!(f, "price must be a non-negative finite number"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

fn validate_price(price: f64) -> Result<(), ProductValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductValidationError::InvalidPrice);
    }
    Ok(())
}

/// Persisted product record. Product names are unique across the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    category: String,
    price: f64,
}

impl NewProduct {
    /// Validate and construct the create input.
    pub fn try_new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Result<Self, ProductValidationError> {
        let name = name.into();
        let category = category.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        validate_price(price)?;
        Ok(Self {
            name,
            category,
            price,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Validated partial update for a product; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    name: Option<String>,
    category: Option<String>,
    price: Option<f64>,
}

impl ProductPatch {
    /// Validate and construct the patch; present fields obey the same rules
    /// as on create.
    pub fn try_new(
        name: Option<String>,
        category: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, ProductValidationError> {
        if let Some(name) = &name
            && name.trim().is_empty()
        {
            return Err(ProductValidationError::EmptyName);
        }
        if let Some(category) = &category
            && category.trim().is_empty()
        {
            return Err(ProductValidationError::EmptyCategory);
        }
        if let Some(price) = price {
            validate_price(price)?;
        }
        Ok(Self {
            name,
            category,
            price,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }
}
