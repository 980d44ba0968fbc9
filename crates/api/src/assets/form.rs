//! Multipart form decoding for the create and update endpoints.

use assetdesk_core::logo::LogoUpload;
use assetdesk_core::validation::AssetForm;
use axum::extract::Multipart;

use crate::error::AppError;

/// Multipart field carrying the logo file.
const LOGO_FIELD: &str = "logo";

/// Read every part of a create/edit submission.
///
/// Text parts fill the [`AssetForm`]; the `logo` part becomes the upload. A
/// `logo` part with no content (an untouched file input) counts as no upload.
pub async fn read_asset_form(
    mut multipart: Multipart,
) -> Result<(AssetForm, Option<LogoUpload>), AppError> {
    let mut form = AssetForm::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == LOGO_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if !data.is_empty() {
                upload = Some(LogoUpload {
                    file_name,
                    bytes: data.to_vec(),
                });
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.set(&name, text);
        }
    }

    Ok((form, upload))
}
