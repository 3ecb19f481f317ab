//! Actix middleware shared across the HTTP surface.

pub mod access_log;

pub use access_log::AccessLog;
