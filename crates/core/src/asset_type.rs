//! Asset type enumeration and its stored string form.
//!
//! The `assets.asset_type` column holds the lowercase name. Conversion in both
//! directions goes through [`ASSET_TYPE_NAMES`] so a row carrying an unknown
//! value is rejected on read instead of silently coerced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of financial instrument an asset record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Token,
    Fiat,
    Stablecoin,
}

/// Two-way mapping between variants and their stored names.
pub const ASSET_TYPE_NAMES: &[(AssetType, &str)] = &[
    (AssetType::Token, "token"),
    (AssetType::Fiat, "fiat"),
    (AssetType::Stablecoin, "stablecoin"),
];

impl AssetType {
    /// Every variant, in display order.
    pub const ALL: [AssetType; 3] = [AssetType::Token, AssetType::Fiat, AssetType::Stablecoin];

    /// Parse from the stored `name` value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        ASSET_TYPE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(t, _)| *t)
            .ok_or_else(|| CoreError::Validation(format!("Unknown asset type '{name}'")))
    }

    /// Stored name value.
    pub fn name(self) -> &'static str {
        ASSET_TYPE_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, n)| *n)
            .unwrap_or("token")
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Token => "Token",
            Self::Fiat => "Fiat",
            Self::Stablecoin => "Stablecoin",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
