//! Course class catalog entities.

pub mod model;

pub use model::{Class, CreateClass};
