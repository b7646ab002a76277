//! Repository for the `accessories` table and its manufacturer links.
//!
//! Accessories are always returned hydrated: the assigned vehicle (with its
//! technical sheet) and every linked manufacturer are loaded alongside.

use autocatalog_core::accessory::{AccessoryFilter, AccessorySortField, ENTITY};
use autocatalog_core::error::CoreError;
use autocatalog_core::search::SearchRequest;
use autocatalog_core::types::DbId;
use autocatalog_core::{manufacturer, vehicle};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::accessory::{Accessory, AccessoryInput, AccessoryRow};
use crate::models::page::Page;
use crate::repositories::{ManufacturerRepo, VehicleRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, acquisition_year, value, installation_minutes, vehicle_id";

fn sort_column(field: AccessorySortField) -> &'static str {
    match field {
        AccessorySortField::Id => "id",
        AccessorySortField::Name => "name",
        AccessorySortField::Description => "description",
        AccessorySortField::AcquisitionYear => "acquisition_year",
        AccessorySortField::Value => "value",
        AccessorySortField::InstallationMinutes => "installation_minutes",
    }
}

/// Provides CRUD and search operations for accessories.
pub struct AccessoryRepo;

impl AccessoryRepo {
    /// List every accessory ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Accessory>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM accessories ORDER BY id");
        let rows = sqlx::query_as::<_, AccessoryRow>(&query)
            .fetch_all(&mut *conn)
            .await?;
        Self::hydrate(&mut conn, rows).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Accessory>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::load(&mut conn, id).await
    }

    /// Search by the accessory matching policy (numeric or name substring).
    pub async fn search(
        pool: &PgPool,
        request: &SearchRequest<AccessorySortField>,
    ) -> Result<Page<Accessory>, sqlx::Error> {
        let filter = AccessoryFilter::from_query(request.query.as_deref());
        let (where_clause, bind_idx) = match filter {
            AccessoryFilter::All => ("", 1),
            AccessoryFilter::Number(_) => (
                "WHERE acquisition_year = $1 OR installation_minutes = $1",
                2,
            ),
            AccessoryFilter::NameContains(_) => ("WHERE name ILIKE $1", 2),
        };

        let mut conn = pool.acquire().await?;

        let count_query = format!("SELECT COUNT(*) FROM accessories {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        match filter {
            AccessoryFilter::All => {}
            AccessoryFilter::Number(number) => count = count.bind(number),
            AccessoryFilter::NameContains(ref pattern) => count = count.bind(pattern),
        }
        let total_items = count.fetch_one(&mut *conn).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM accessories {where_clause} \
             ORDER BY {column} {direction}, id ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            column = sort_column(request.sort),
            direction = request.direction.as_sql(),
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, AccessoryRow>(&query);
        match filter {
            AccessoryFilter::All => {}
            AccessoryFilter::Number(number) => q = q.bind(number),
            AccessoryFilter::NameContains(ref pattern) => q = q.bind(pattern),
        }
        let rows = q
            .bind(request.page.limit())
            .bind(request.page.offset())
            .fetch_all(&mut *conn)
            .await?;

        Ok(Page {
            items: Self::hydrate(&mut conn, rows).await?,
            total_items,
        })
    }

    /// Insert an accessory after resolving its vehicle and manufacturers.
    ///
    /// Any reference to a missing record aborts the transaction with
    /// [`CoreError::DanglingReference`].
    pub async fn create(pool: &PgPool, input: &AccessoryInput) -> Result<Accessory, RepoError> {
        let mut tx = pool.begin().await?;

        let vehicle_id = Self::resolve_vehicle(&mut tx, input.vehicle_id()).await?;
        let manufacturer_ids =
            Self::resolve_manufacturers(&mut tx, &input.manufacturer_ids()).await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO accessories
                (name, description, acquisition_year, value, installation_minutes, vehicle_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.acquisition_year)
        .bind(input.value)
        .bind(input.installation_minutes)
        .bind(vehicle_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_manufacturers_inner(&mut tx, id, &manufacturer_ids).await?;

        let accessory = Self::load(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(accessory)
    }

    /// Replace an accessory's fields, vehicle and manufacturer set.
    ///
    /// An absent vehicle unassigns; absent manufacturers clear the set.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AccessoryInput,
    ) -> Result<Accessory, RepoError> {
        let mut tx = pool.begin().await?;

        if !Self::exists(&mut tx, id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }

        let vehicle_id = Self::resolve_vehicle(&mut tx, input.vehicle_id()).await?;
        let manufacturer_ids =
            Self::resolve_manufacturers(&mut tx, &input.manufacturer_ids()).await?;

        sqlx::query(
            "UPDATE accessories SET
                name = $2,
                description = $3,
                acquisition_year = $4,
                value = $5,
                installation_minutes = $6,
                vehicle_id = $7
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.acquisition_year)
        .bind(input.value)
        .bind(input.installation_minutes)
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        Self::set_manufacturers_inner(&mut tx, id, &manufacturer_ids).await?;

        let accessory = Self::load(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(accessory)
    }

    /// Clear the manufacturer links, then delete the accessory.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;

        if !Self::exists(&mut tx, id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }

        Self::set_manufacturers_inner(&mut tx, id, &[]).await?;
        sqlx::query("DELETE FROM accessories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accessories WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    async fn load(conn: &mut PgConnection, id: DbId) -> Result<Option<Accessory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accessories WHERE id = $1");
        let row = sqlx::query_as::<_, AccessoryRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match row {
            Some(row) => Ok(Self::hydrate(conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Attach vehicles and manufacturers to raw rows, preserving row order.
    async fn hydrate(
        conn: &mut PgConnection,
        rows: Vec<AccessoryRow>,
    ) -> Result<Vec<Accessory>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let accessory_ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut vehicle_ids: Vec<DbId> = rows.iter().filter_map(|row| row.vehicle_id).collect();
        vehicle_ids.sort_unstable();
        vehicle_ids.dedup();

        let vehicles = VehicleRepo::find_many(&mut *conn, &vehicle_ids).await?;
        let mut manufacturers = ManufacturerRepo::linked_to(&mut *conn, &accessory_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let vehicle = row.vehicle_id.and_then(|id| vehicles.get(&id).cloned());
                let linked = manufacturers.remove(&row.id).unwrap_or_default();
                Accessory::assemble(row, vehicle, linked)
            })
            .collect())
    }

    async fn resolve_vehicle(
        conn: &mut PgConnection,
        vehicle_id: Option<DbId>,
    ) -> Result<Option<DbId>, RepoError> {
        let Some(id) = vehicle_id else {
            return Ok(None);
        };
        if !VehicleRepo::exists(&mut *conn, id).await? {
            return Err(CoreError::DanglingReference {
                entity: vehicle::ENTITY,
                id,
            }
            .into());
        }
        Ok(Some(id))
    }

    /// Confirm every id exists, failing on the first one that does not.
    async fn resolve_manufacturers(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, RepoError> {
        let existing = ManufacturerRepo::existing_ids(&mut *conn, ids).await?;
        if let Some(&missing) = ids.iter().find(|id| !existing.contains(id)) {
            return Err(CoreError::DanglingReference {
                entity: manufacturer::ENTITY,
                id: missing,
            }
            .into());
        }
        Ok(ids.to_vec())
    }

    /// Replace manufacturer links within an existing transaction.
    async fn set_manufacturers_inner(
        tx: &mut Transaction<'_, Postgres>,
        accessory_id: DbId,
        manufacturer_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM accessory_manufacturers WHERE accessory_id = $1")
            .bind(accessory_id)
            .execute(&mut **tx)
            .await?;

        for &manufacturer_id in manufacturer_ids {
            sqlx::query(
                "INSERT INTO accessory_manufacturers (accessory_id, manufacturer_id)
                 VALUES ($1, $2)",
            )
            .bind(accessory_id)
            .bind(manufacturer_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
