//! Manufacturer entity model and DTO.

use autocatalog_core::types::DbId;
use autocatalog_core::validation::{no_nul, not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `manufacturers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Manufacturer {
    pub id: DbId,
    pub name: String,
    pub details: Option<String>,
}

/// A manufacturer joined to the accessory that links it.
#[derive(Debug, FromRow)]
pub(crate) struct LinkedManufacturer {
    pub accessory_id: DbId,
    #[sqlx(flatten)]
    pub manufacturer: Manufacturer,
}

/// Body of `POST /manufacturers` and `PUT /manufacturers/{id}`.
///
/// Any `id` in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManufacturerInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 50, message = "must be between 2 and 50 characters")
    )]
    pub name: String,
    #[validate(
        custom(function = "no_nul"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub details: Option<String>,
}
