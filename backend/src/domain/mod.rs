//! Domain entities and ports.
//!
//! Purpose: define the strongly typed entities exchanged between the HTTP
//! adapter and the persistence adapters, the validated input types guarding
//! writes, and the transport-agnostic [`Error`] every handler failure
//! collapses into. Keep types immutable and document invariants in each
//! type's Rustdoc.

pub mod error;
pub mod order;
pub mod ports;
pub mod product;
pub mod user;

pub use self::error::{Error, ErrorKind};
pub use self::order::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderValidationError, OrderWithItems,
};
pub use self::product::{NewProduct, Product, ProductPatch, ProductValidationError};
pub use self::user::{NewUser, User, UserPatch, UserPreference, UserValidationError, UserWithPreference};
