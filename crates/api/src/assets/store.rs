//! Asset write orchestration: validation, uniqueness, logo files and the
//! record write, in that order.
//!
//! Ordering on every write that carries a logo upload:
//!
//! 1. all rules run and every violation is reported together
//! 2. the new logo file is stored
//! 3. the record is written; on failure the new file is discarded
//! 4. the replaced file, if any, is removed (failures only logged)

use assetdesk_core::error::CoreError;
use assetdesk_core::listing::{ListQuery, Page};
use assetdesk_core::logo::{inspect_upload, LogoImage, LogoUpload};
use assetdesk_core::types::DbId;
use assetdesk_core::validation::{
    check_form, taken_message, AssetFields, AssetForm, ValidationMode,
};
use assetdesk_db::models::asset::Asset;
use assetdesk_db::repositories::AssetRepo;
use assetdesk_storage::logo::LogoManager;
use sqlx::PgPool;

use crate::assets::view::AssetView;
use crate::error::{AppError, AppResult};

const ENTITY: &str = "Asset";

/// Create, update, delete and read assets.
#[derive(Clone)]
pub struct AssetStore {
    pool: PgPool,
    logos: LogoManager,
}

impl AssetStore {
    pub fn new(pool: PgPool, logos: LogoManager) -> Self {
        Self { pool, logos }
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Validate and insert a new asset, storing its logo upload if given.
    pub async fn create(&self, form: &AssetForm, upload: Option<LogoUpload>) -> AppResult<Asset> {
        let (fields, image) = self.validate(form, upload, ValidationMode::Create).await?;

        let logo = self.logos.attach(image).await?;

        match AssetRepo::create(&self.pool, &fields, logo.as_deref()).await {
            Ok(asset) => Ok(asset),
            Err(e) => {
                if let Some(path) = &logo {
                    self.logos.discard(path).await;
                }
                Err(e.into())
            }
        }
    }

    /// Validate and replace the editable fields of an active asset.
    ///
    /// Without an upload the stored `logo` value is kept unchanged. With one,
    /// the new file replaces it and the previous stored file is removed after
    /// the record is written.
    pub async fn update(
        &self,
        id: DbId,
        form: &AssetForm,
        upload: Option<LogoUpload>,
    ) -> AppResult<Asset> {
        let existing = AssetRepo::find_active_by_id(&self.pool, id)
            .await?
            .ok_or(not_found(id))?;

        let (fields, image) = self
            .validate(form, upload, ValidationMode::Update { exclude: id })
            .await?;

        let staged = self.logos.attach(image).await?;
        let logo = staged.as_deref().or(existing.logo.as_deref());

        let written = AssetRepo::update(&self.pool, id, &fields, logo).await;
        let asset = match written {
            Ok(Some(asset)) => asset,
            Ok(None) => {
                if let Some(path) = &staged {
                    self.logos.discard(path).await;
                }
                return Err(not_found(id));
            }
            Err(e) => {
                if let Some(path) = &staged {
                    self.logos.discard(path).await;
                }
                return Err(e.into());
            }
        };

        if staged.is_some() {
            self.logos.retire(existing.logo.as_deref()).await;
        }

        Ok(asset)
    }

    /// Soft-delete an active asset. The row and its logo file are kept.
    pub async fn soft_delete(&self, id: DbId) -> AppResult<()> {
        if AssetRepo::soft_delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    /// Clear `deleted_at` on a soft-deleted asset.
    pub async fn restore(&self, id: DbId) -> AppResult<Asset> {
        if !AssetRepo::restore(&self.pool, id).await? {
            return Err(not_found(id));
        }
        self.get(id).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fetch an asset by id, including soft-deleted ones.
    pub async fn get(&self, id: DbId) -> AppResult<Asset> {
        AssetRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(not_found(id))
    }

    /// One page of active assets.
    pub async fn list(&self, query: &ListQuery) -> AppResult<Page<AssetView>> {
        let (assets, total) = AssetRepo::list(&self.pool, query).await?;
        Ok(Page::new(assets, total, query).map(|a| self.view(a)))
    }

    /// Attach the browser-facing logo URL.
    pub fn view(&self, asset: Asset) -> AssetView {
        let logo_url = asset.logo.as_deref().map(|logo| self.logos.url(logo));
        AssetView { asset, logo_url }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Run every rule and return the normalised fields and accepted image,
    /// or all violations at once.
    async fn validate(
        &self,
        form: &AssetForm,
        upload: Option<LogoUpload>,
        mode: ValidationMode,
    ) -> AppResult<(AssetFields, Option<LogoImage>)> {
        let (draft, mut errors) = check_form(form);
        let image = upload.and_then(|u| inspect_upload(u, &mut errors));

        let exclude = mode.excluded_id();
        if !errors.contains("name")
            && AssetRepo::name_taken(&self.pool, &draft.name, exclude).await?
        {
            errors.add("name", taken_message("name"));
        }
        if !errors.contains("symbol")
            && AssetRepo::symbol_taken(&self.pool, &draft.symbol, exclude).await?
        {
            errors.add("symbol", taken_message("symbol"));
        }

        if !errors.is_empty() {
            return Err(CoreError::InvalidFields(errors).into());
        }

        let fields = draft
            .into_fields()
            .ok_or_else(|| AppError::InternalError("Validated asset form is incomplete".into()))?;
        Ok((fields, image))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}
