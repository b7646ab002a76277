//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open a
//! transaction and commit only once every step has succeeded.

pub mod accessory_repo;
pub mod manufacturer_repo;
pub mod vehicle_repo;

pub use accessory_repo::AccessoryRepo;
pub use manufacturer_repo::ManufacturerRepo;
pub use vehicle_repo::VehicleRepo;
