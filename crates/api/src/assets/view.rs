use assetdesk_db::models::asset::Asset;
use serde::Serialize;

/// An asset as returned by the API: the record plus a loadable logo URL.
#[derive(Debug, Serialize)]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: Asset,
    /// `logo` itself when it is an absolute URL, otherwise the logo disk's
    /// public URL for the stored path.
    pub logo_url: Option<String>,
}
