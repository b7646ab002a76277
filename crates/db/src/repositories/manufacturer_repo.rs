//! Repository for the `manufacturers` table.

use std::collections::HashMap;

use autocatalog_core::error::CoreError;
use autocatalog_core::manufacturer::{ManufacturerSortField, ENTITY};
use autocatalog_core::search::{contains_pattern, SearchRequest};
use autocatalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::RepoError;
use crate::models::manufacturer::{LinkedManufacturer, Manufacturer, ManufacturerInput};
use crate::models::page::Page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, details";

fn sort_column(field: ManufacturerSortField) -> &'static str {
    match field {
        ManufacturerSortField::Id => "id",
        ManufacturerSortField::Name => "name",
        ManufacturerSortField::Details => "details",
    }
}

/// Provides CRUD and search operations for manufacturers.
pub struct ManufacturerRepo;

impl ManufacturerRepo {
    pub async fn create(
        pool: &PgPool,
        input: &ManufacturerInput,
    ) -> Result<Manufacturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO manufacturers (name, details)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers WHERE id = $1");
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every manufacturer ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers ORDER BY id");
        sqlx::query_as::<_, Manufacturer>(&query)
            .fetch_all(pool)
            .await
    }

    /// Substring search on name or details, sorted and paged.
    pub async fn search(
        pool: &PgPool,
        request: &SearchRequest<ManufacturerSortField>,
    ) -> Result<Page<Manufacturer>, sqlx::Error> {
        let pattern = request.query.as_deref().map(contains_pattern);
        let (where_clause, bind_idx) = match pattern {
            Some(_) => ("WHERE name ILIKE $1 OR details ILIKE $1", 2),
            None => ("", 1),
        };

        let count_query = format!("SELECT COUNT(*) FROM manufacturers {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = pattern {
            count = count.bind(pattern);
        }
        let total_items = count.fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM manufacturers {where_clause} \
             ORDER BY {column} {direction}, id ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            column = sort_column(request.sort),
            direction = request.direction.as_sql(),
            next_idx = bind_idx + 1,
        );
        let mut q = sqlx::query_as::<_, Manufacturer>(&query);
        if let Some(ref pattern) = pattern {
            q = q.bind(pattern);
        }
        let items = q
            .bind(request.page.limit())
            .bind(request.page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page { items, total_items })
    }

    /// Overwrite name and details.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ManufacturerInput,
    ) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!(
            "UPDATE manufacturers SET name = $2, details = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.details)
            .fetch_optional(pool)
            .await
    }

    /// Delete a manufacturer no accessory links to.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM manufacturers WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }

        let linked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accessory_manufacturers WHERE manufacturer_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if linked > 0 {
            return Err(CoreError::linked_accessories("manufacturer", linked).into());
        }

        sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// The subset of `ids` that exist.
    pub async fn existing_ids<'e, E>(executor: E, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar("SELECT id FROM manufacturers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// Manufacturers linked to each of the given accessories, ordered by id.
    pub async fn linked_to<'e, E>(
        executor: E,
        accessory_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Manufacturer>>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut linked: HashMap<DbId, Vec<Manufacturer>> = HashMap::new();
        if accessory_ids.is_empty() {
            return Ok(linked);
        }

        let rows = sqlx::query_as::<_, LinkedManufacturer>(
            "SELECT am.accessory_id, m.id, m.name, m.details
             FROM accessory_manufacturers am
             JOIN manufacturers m ON m.id = am.manufacturer_id
             WHERE am.accessory_id = ANY($1)
             ORDER BY m.id",
        )
        .bind(accessory_ids)
        .fetch_all(executor)
        .await?;

        for row in rows {
            linked
                .entry(row.accessory_id)
                .or_default()
                .push(row.manufacturer);
        }
        Ok(linked)
    }
}
