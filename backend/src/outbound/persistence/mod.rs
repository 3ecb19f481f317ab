//! PostgreSQL-backed repository adapters using Diesel ORM.
//!
//! Adapters are thin translators between domain types and database rows;
//! they contain no business logic. Error classification is centralised in
//! [`error_mapping`] and the connection pool in [`pool`].

mod diesel_order_repository;
mod diesel_product_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
