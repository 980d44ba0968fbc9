//! Asset record model.

use assetdesk_core::asset_type::AssetType;
use assetdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `assets` table, with `asset_type` still in stored form.
#[derive(Debug, Clone, FromRow)]
pub struct AssetRow {
    pub id: DbId,
    pub name: String,
    pub symbol: String,
    pub asset_type: String,
    pub decimals: i32,
    pub logo: Option<String>,
    pub description: String,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// An asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub decimals: i32,
    /// Storage-relative path or absolute URL.
    pub logo: Option<String>,
    pub description: String,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Set when the record has been soft-deleted.
    pub deleted_at: Option<Timestamp>,
}

impl TryFrom<AssetRow> for Asset {
    type Error = sqlx::Error;

    /// Rejects rows whose `asset_type` is not in the mapping table.
    fn try_from(row: AssetRow) -> Result<Self, Self::Error> {
        let asset_type =
            AssetType::from_name(&row.asset_type).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            symbol: row.symbol,
            asset_type,
            decimals: row.decimals,
            logo: row.logo,
            description: row.description,
            website: row.website,
            twitter: row.twitter,
            discord: row.discord,
            telegram: row.telegram,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Which of the two unique columns a constraint violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    Name,
    Symbol,
}

impl UniqueColumn {
    /// Form field the column is reported under.
    pub fn field(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Symbol => "symbol",
        }
    }

    /// Map a database constraint name to the column it guards.
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "uq_assets_name" => Some(Self::Name),
            "uq_assets_symbol" => Some(Self::Symbol),
            _ => None,
        }
    }
}

/// If `err` is a unique violation on `name` or `symbol`, say which.
pub fn unique_violation(err: &sqlx::Error) -> Option<UniqueColumn> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            db_err.constraint().and_then(UniqueColumn::from_constraint)
        }
        _ => None,
    }
}
