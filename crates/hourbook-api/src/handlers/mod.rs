//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod class;
pub mod health;
pub mod hours;
pub mod message;
pub mod notification;
pub mod registration;
pub mod user;
pub mod volunteer;
