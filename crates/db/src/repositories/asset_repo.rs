//! Repository for the `assets` table.
//!
//! Soft-deleted rows stay in the table. They are visible to `find_by_id` and
//! the export scan, hidden from listing, and still occupy the name/symbol
//! uniqueness namespace.

use assetdesk_core::listing::ListQuery;
use assetdesk_core::types::DbId;
use assetdesk_core::validation::AssetFields;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, symbol, asset_type, decimals, logo, description, \
    website, twitter, discord, telegram, \
    created_at, updated_at, deleted_at";

/// Provides persistence operations for asset records.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset with a freshly generated id, returning the row.
    pub async fn create(
        pool: &PgPool,
        fields: &AssetFields,
        logo: Option<&str>,
    ) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (\
                id, name, symbol, asset_type, decimals, logo, description, \
                website, twitter, discord, telegram\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AssetRow>(&query)
            .bind(DbId::now_v7())
            .bind(&fields.name)
            .bind(&fields.symbol)
            .bind(fields.asset_type.name())
            .bind(fields.decimals)
            .bind(logo)
            .bind(&fields.description)
            .bind(fields.website.as_deref())
            .bind(fields.twitter.as_deref())
            .bind(fields.discord.as_deref())
            .bind(fields.telegram.as_deref())
            .fetch_one(pool)
            .await?;
        Asset::try_from(row)
    }

    /// Find an asset by id, including soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Asset::try_from)
            .transpose()
    }

    /// Find an asset by id. Excludes soft-deleted rows.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Asset::try_from)
            .transpose()
    }

    /// One page of active assets matching `query`, ordered by name, plus the
    /// total number of matches across all pages.
    ///
    /// The three search predicates are grouped before the type filter is
    /// ANDed on, so a type filter always applies to every search hit.
    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<(Vec<Asset>, i64), sqlx::Error> {
        let pattern = query.search_pattern();
        let type_name = query.asset_type.map(|t| t.name());

        let mut conditions = vec!["deleted_at IS NULL".to_string()];
        let mut bind_idx = 1u32;

        if pattern.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR symbol ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if type_name.is_some() {
            conditions.push(format!("asset_type = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM assets WHERE {where_clause}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref p) = pattern {
            count_q = count_q.bind(p);
        }
        if let Some(t) = type_name {
            count_q = count_q.bind(t);
        }
        let total = count_q.fetch_one(pool).await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM assets WHERE {where_clause} \
             ORDER BY name ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut page_q = sqlx::query_as::<_, AssetRow>(&page_query);
        if let Some(ref p) = pattern {
            page_q = page_q.bind(p);
        }
        if let Some(t) = type_name {
            page_q = page_q.bind(t);
        }
        let rows = page_q
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(pool)
            .await?;

        let assets = rows
            .into_iter()
            .map(Asset::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((assets, total))
    }

    /// Every asset, including soft-deleted rows, in table order.
    pub async fn list_all_including_deleted(pool: &PgPool) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets");
        sqlx::query_as::<_, AssetRow>(&query)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(Asset::try_from)
            .collect()
    }

    /// Replace the editable fields of an active asset.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &AssetFields,
        logo: Option<&str>,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                name = $2, \
                symbol = $3, \
                asset_type = $4, \
                decimals = $5, \
                logo = $6, \
                description = $7, \
                website = $8, \
                twitter = $9, \
                discord = $10, \
                telegram = $11 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssetRow>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.symbol)
            .bind(fields.asset_type.name())
            .bind(fields.decimals)
            .bind(logo)
            .bind(&fields.description)
            .bind(fields.website.as_deref())
            .bind(fields.twitter.as_deref())
            .bind(fields.discord.as_deref())
            .bind(fields.telegram.as_deref())
            .fetch_optional(pool)
            .await?
            .map(Asset::try_from)
            .transpose()
    }

    /// Soft-delete an asset by id. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE assets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted asset. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assets SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any row other than `exclude` already uses `name`.
    /// Soft-deleted rows count.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Whether any row other than `exclude` already uses `symbol`.
    /// Soft-deleted rows count.
    pub async fn symbol_taken(
        pool: &PgPool,
        symbol: &str,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE symbol = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(symbol)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Number of active (not soft-deleted) assets.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }
}
