//! Repository for the `vehicles` and `technical_sheets` tables.

use std::collections::HashMap;

use autocatalog_core::error::CoreError;
use autocatalog_core::search::{contains_pattern, SearchRequest};
use autocatalog_core::types::DbId;
use autocatalog_core::vehicle::{VehicleSortField, ENTITY};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::page::Page;
use crate::models::vehicle::{TechnicalSheetInput, Vehicle, VehicleInput, VehicleRow};

/// Vehicle columns with the owned technical sheet folded in.
const SELECT: &str = "SELECT v.id, v.model, v.version_name, v.manufacture_date, \
        v.country_of_assembly, ts.id AS sheet_id, ts.engine_details, ts.fuel_type, \
        ts.factory_options \
     FROM vehicles v \
     LEFT JOIN technical_sheets ts ON ts.vehicle_id = v.id";

fn sort_column(field: VehicleSortField) -> &'static str {
    match field {
        VehicleSortField::Id => "v.id",
        VehicleSortField::Model => "v.model",
        VehicleSortField::ManufactureDate => "v.manufacture_date",
        VehicleSortField::CountryOfAssembly => "v.country_of_assembly",
    }
}

/// Provides CRUD and search operations for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// List every vehicle ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY v.id");
        let rows = sqlx::query_as::<_, VehicleRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Vehicle>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{SELECT} WHERE v.id = $1");
        let row = sqlx::query_as::<_, VehicleRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Vehicle::from))
    }

    /// Load the given vehicles keyed by id. Unknown ids are absent from the map.
    pub async fn find_many<'e, E>(
        executor: E,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Vehicle>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("{SELECT} WHERE v.id = ANY($1)");
        let rows = sqlx::query_as::<_, VehicleRow>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, Vehicle::from(row)))
            .collect())
    }

    pub async fn exists<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Substring search on model or country of assembly, sorted and paged.
    pub async fn search(
        pool: &PgPool,
        request: &SearchRequest<VehicleSortField>,
    ) -> Result<Page<Vehicle>, sqlx::Error> {
        let pattern = request.query.as_deref().map(contains_pattern);
        let (where_clause, bind_idx) = match pattern {
            Some(_) => ("WHERE v.model ILIKE $1 OR v.country_of_assembly ILIKE $1", 2),
            None => ("", 1),
        };

        let count_query = format!("SELECT COUNT(*) FROM vehicles v {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = pattern {
            count = count.bind(pattern);
        }
        let total_items = count.fetch_one(pool).await?;

        let query = format!(
            "{SELECT} {where_clause} \
             ORDER BY {column} {direction}, v.id ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            column = sort_column(request.sort),
            direction = request.direction.as_sql(),
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, VehicleRow>(&query);
        if let Some(ref pattern) = pattern {
            q = q.bind(pattern);
        }
        let rows = q
            .bind(request.page.limit())
            .bind(request.page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(Vehicle::from).collect(),
            total_items,
        })
    }

    /// Insert a vehicle and, when supplied, its technical sheet.
    pub async fn create(pool: &PgPool, input: &VehicleInput) -> Result<Vehicle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO vehicles (model, version_name, manufacture_date, country_of_assembly)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.model)
        .bind(&input.version_name)
        .bind(input.manufacture_date)
        .bind(&input.country_of_assembly)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref sheet) = input.technical_sheet {
            Self::upsert_sheet_inner(&mut tx, id, sheet).await?;
        }

        let vehicle = Self::find_by_id(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(vehicle)
    }

    /// Replace a vehicle's fields and reconcile its technical sheet.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &VehicleInput,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE vehicles SET
                model = $2,
                version_name = $3,
                manufacture_date = $4,
                country_of_assembly = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.model)
        .bind(&input.version_name)
        .bind(input.manufacture_date)
        .bind(&input.country_of_assembly)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        match input.technical_sheet {
            Some(ref sheet) => Self::upsert_sheet_inner(&mut tx, id, sheet).await?,
            None => Self::delete_sheet_inner(&mut tx, id).await?,
        }

        let vehicle = Self::find_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(vehicle)
    }

    /// Delete a vehicle and its technical sheet.
    ///
    /// Refused with a conflict while any accessory still points at it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;

        if !Self::exists(&mut *tx, id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }

        let linked: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accessories WHERE vehicle_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if linked > 0 {
            return Err(CoreError::linked_accessories("vehicle", linked).into());
        }

        Self::delete_sheet_inner(&mut tx, id).await?;
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Create the sheet if missing, otherwise overwrite its three fields.
    async fn upsert_sheet_inner(
        tx: &mut Transaction<'_, Postgres>,
        vehicle_id: DbId,
        sheet: &TechnicalSheetInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO technical_sheets (vehicle_id, engine_details, fuel_type, factory_options)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (vehicle_id) DO UPDATE SET
                engine_details = EXCLUDED.engine_details,
                fuel_type = EXCLUDED.fuel_type,
                factory_options = EXCLUDED.factory_options",
        )
        .bind(vehicle_id)
        .bind(&sheet.engine_details)
        .bind(&sheet.fuel_type)
        .bind(&sheet.factory_options)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn delete_sheet_inner(
        tx: &mut Transaction<'_, Postgres>,
        vehicle_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM technical_sheets WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
