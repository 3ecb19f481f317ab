//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Currently a single concern: PostgreSQL persistence via Diesel, under
//! [`persistence`].

pub mod persistence;
