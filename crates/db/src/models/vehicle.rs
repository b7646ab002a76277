//! Vehicle and technical sheet models and DTOs.

use autocatalog_core::types::DbId;
use autocatalog_core::validation::{in_the_past, no_nul, not_blank};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `technical_sheets` table, owned by exactly one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSheet {
    pub id: DbId,
    pub engine_details: Option<String>,
    pub fuel_type: Option<String>,
    pub factory_options: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    pub model: String,
    pub version_name: Option<String>,
    pub manufacture_date: Option<NaiveDate>,
    pub country_of_assembly: String,
    pub technical_sheet: Option<TechnicalSheet>,
}

/// `vehicles` left-joined with `technical_sheets`.
#[derive(Debug, FromRow)]
pub(crate) struct VehicleRow {
    pub id: DbId,
    pub model: String,
    pub version_name: Option<String>,
    pub manufacture_date: Option<NaiveDate>,
    pub country_of_assembly: String,
    pub sheet_id: Option<DbId>,
    pub engine_details: Option<String>,
    pub fuel_type: Option<String>,
    pub factory_options: Option<String>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            model: row.model,
            version_name: row.version_name,
            manufacture_date: row.manufacture_date,
            country_of_assembly: row.country_of_assembly,
            technical_sheet: row.sheet_id.map(|id| TechnicalSheet {
                id,
                engine_details: row.engine_details,
                fuel_type: row.fuel_type,
                factory_options: row.factory_options,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSheetInput {
    #[validate(
        custom(function = "no_nul"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub engine_details: Option<String>,
    #[validate(
        custom(function = "no_nul"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub fuel_type: Option<String>,
    #[validate(custom(function = "no_nul"))]
    pub factory_options: Option<String>,
}

/// Body of `POST /vehicles` and `PUT /vehicles/{id}`.
///
/// A replace with `technicalSheet` absent or null removes the stored sheet.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 100, message = "must be between 2 and 100 characters")
    )]
    pub model: String,
    #[validate(custom(function = "no_nul"))]
    pub version_name: Option<String>,
    #[validate(custom(function = "in_the_past"))]
    pub manufacture_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 80, message = "must be at most 80 characters")
    )]
    pub country_of_assembly: String,
    #[validate(nested)]
    pub technical_sheet: Option<TechnicalSheetInput>,
}
