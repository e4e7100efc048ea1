//! # hourbook-entity
//!
//! Domain entity models for Hourbook. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The [`workflow`] module holds the pure transition rules for
//! registration and hours requests.

pub mod class;
pub mod enrollment;
pub mod hours;
pub mod message;
pub mod notification;
pub mod registration;
pub mod user;
pub mod workflow;
