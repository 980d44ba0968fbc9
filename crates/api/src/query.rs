//! Query parameter types for API handlers.

use assetdesk_core::asset_type::AssetType;
use assetdesk_core::error::CoreError;
use assetdesk_core::listing::ListQuery;
use serde::Deserialize;

/// `GET /api/v1/assets?search=&type=&page=&page_size=`
///
/// Paging values are clamped by [`ListQuery::new`]; a blank `type` means no
/// filter.
#[derive(Debug, Default, Deserialize)]
pub struct AssetListParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl AssetListParams {
    /// Normalise into a [`ListQuery`]. Unknown type names are rejected.
    pub fn into_query(self) -> Result<ListQuery, CoreError> {
        let asset_type = match self.asset_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(AssetType::from_name(name)?),
        };
        Ok(ListQuery::new(
            self.search.as_deref(),
            asset_type,
            self.page,
            self.page_size,
        ))
    }
}
