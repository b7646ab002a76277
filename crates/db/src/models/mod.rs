//! Domain model structs and request DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct returned to clients
//! - A `Deserialize` + `Validate` input DTO used for both create and replace

pub mod accessory;
pub mod manufacturer;
pub mod page;
pub mod vehicle;
