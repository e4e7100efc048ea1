//! # hourbook-database
//!
//! Persistence for Hourbook. The [`store`] module defines one trait per
//! aggregate; [`repositories`] implements them on PostgreSQL and
//! [`memory`] implements them in process. [`Store`] bundles whichever
//! backend the configuration selects.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Store;
