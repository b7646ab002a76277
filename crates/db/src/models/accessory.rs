//! Accessory entity model and DTO.

use autocatalog_core::accessory;
use autocatalog_core::types::DbId;
use autocatalog_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::manufacturer::Manufacturer;
use crate::models::vehicle::Vehicle;

/// A row from the `accessories` table before its relations are loaded.
#[derive(Debug, FromRow)]
pub(crate) struct AccessoryRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub acquisition_year: i32,
    pub value: f64,
    pub installation_minutes: i32,
    pub vehicle_id: Option<DbId>,
}

/// An accessory with its vehicle and manufacturers fully loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub acquisition_year: i32,
    pub value: f64,
    pub installation_minutes: i32,
    pub vehicle: Option<Vehicle>,
    pub manufacturers: Vec<Manufacturer>,
}

impl Accessory {
    pub(crate) fn assemble(
        row: AccessoryRow,
        vehicle: Option<Vehicle>,
        manufacturers: Vec<Manufacturer>,
    ) -> Self {
        Accessory {
            id: row.id,
            name: row.name,
            description: row.description,
            acquisition_year: row.acquisition_year,
            value: row.value,
            installation_minutes: row.installation_minutes,
            vehicle,
            manufacturers,
        }
    }
}

/// A reference to another record by id, e.g. `{"id": 3}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityRef {
    pub id: Option<DbId>,
}

/// Body of `POST /accessories` and `PUT /accessories/{id}`.
///
/// Missing numeric fields deserialize to zero so they fail their range
/// checks instead of producing a parse error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 1900, message = "must be 1900 or later"))]
    pub acquisition_year: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100000.0, message = "must be between 0 and 100000"))]
    pub value: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub installation_minutes: i32,
    pub vehicle: Option<EntityRef>,
    pub manufacturers: Option<Vec<Option<EntityRef>>>,
}

impl AccessoryInput {
    /// The referenced vehicle, if the body names one.
    pub fn vehicle_id(&self) -> Option<DbId> {
        self.vehicle.as_ref().and_then(|v| v.id)
    }

    /// Distinct manufacturer ids to link, with empty and zero refs dropped.
    pub fn manufacturer_ids(&self) -> Vec<DbId> {
        accessory::manufacturer_ids(
            self.manufacturers
                .iter()
                .flatten()
                .map(|r| r.as_ref().and_then(|r| r.id)),
        )
    }
}
