//! Domain layer for the vehicle catalog.
//!
//! Holds the error taxonomy, field validators, per-entity constants and the
//! search/pagination policy. Nothing in here performs I/O, so it is shared by
//! the repository layer and the HTTP layer alike.

pub mod accessory;
pub mod error;
pub mod manufacturer;
pub mod search;
pub mod types;
pub mod validation;
pub mod vehicle;
