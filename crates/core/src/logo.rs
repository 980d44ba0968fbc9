//! Logo upload rules and logo value classification.
//!
//! A stored `logo` value is either a storage-relative path written by the
//! logo lifecycle (`logos/<id>.<ext>`) or an absolute URL supplied from
//! elsewhere. Only the former is ever deleted from storage.

use image::ImageFormat;

use crate::validation::FieldErrors;

/// Storage namespace (directory) for uploaded logos.
pub const LOGO_NAMESPACE: &str = "logos";

/// Maximum accepted logo size (2 MiB).
pub const LOGO_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Image formats accepted for logos.
const ACCEPTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// A file received from the form's `logo` field, not yet inspected.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// An upload that passed inspection and is ready to be stored.
#[derive(Debug, Clone)]
pub struct LogoImage {
    /// File extension derived from the detected format.
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Check an upload against the logo rules, recording violations under the
/// `logo` field. Returns the accepted image only when every rule passed.
pub fn inspect_upload(upload: LogoUpload, errors: &mut FieldErrors) -> Option<LogoImage> {
    let mut ok = true;

    if upload.bytes.len() > LOGO_MAX_BYTES {
        errors.add(
            "logo",
            format!(
                "The logo field must not be greater than {} kilobytes.",
                LOGO_MAX_BYTES / 1024
            ),
        );
        ok = false;
    }

    let format = image::guess_format(&upload.bytes)
        .ok()
        .filter(|f| ACCEPTED_FORMATS.contains(f));

    let Some(format) = format else {
        errors.add("logo", "The logo field must be an image.");
        return None;
    };

    if !ok {
        return None;
    }

    Some(LogoImage {
        extension: format.extensions_str().first().copied().unwrap_or("img"),
        bytes: upload.bytes,
    })
}

/// Whether a stored logo value is an absolute URL rather than a storage path.
///
/// Any `scheme://` prefix counts, as does a protocol-relative `//host/...`.
pub fn is_external_url(logo: &str) -> bool {
    let logo = logo.trim_start();
    if logo.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = logo.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Fresh storage path for a logo with the given extension.
pub fn generate_logo_path(extension: &str) -> String {
    format!("{LOGO_NAMESPACE}/{}.{extension}", uuid::Uuid::new_v4().simple())
}
