//! Asset form validation rules.
//!
//! Validation runs in two phases that both write into one [`FieldErrors`]:
//!
//! 1. [`AssetForm::parse`] normalises the raw text fields (trim, empty to
//!    absent) and records presence and parse failures for `type` and
//!    `decimals`.
//! 2. The `validator` derive on [`AssetDraft`] checks lengths, ranges and URLs.
//!
//! Uniqueness and logo checks need the database and the upload, so callers add
//! those to the same map before deciding whether to write. Nothing here stops
//! at the first failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::asset_type::AssetType;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Field name -> human-readable reasons, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reason against `field`.
    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one reason.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fold `validator` derive output into this map, keeping the custom
    /// message when one was declared and the rule code otherwise.
    pub fn absorb(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid ({}).", err.code));
                self.add(&field.to_string(), reason);
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.0 {
            for reason in reasons {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {reason}")?;
                first = false;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Whether a form is validated for a new record or for an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    /// The record being edited is excluded from uniqueness checks.
    Update { exclude: DbId },
}

impl ValidationMode {
    /// The id to leave out of uniqueness lookups, if any.
    pub fn excluded_id(self) -> Option<DbId> {
        match self {
            Self::Create => None,
            Self::Update { exclude } => Some(exclude),
        }
    }
}

/// Reason recorded when `field` collides with another record.
pub fn taken_message(field: &str) -> String {
    format!("The {field} has already been taken.")
}

// ---------------------------------------------------------------------------
// Raw form input
// ---------------------------------------------------------------------------

/// Raw text fields as submitted by the create/edit form.
///
/// Everything is optional text so that missing and malformed values can be
/// reported per field instead of failing parsing as a whole.
#[derive(Debug, Clone, Default)]
pub struct AssetForm {
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Submitted as `type`.
    pub asset_type: Option<String>,
    pub decimals: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
}

impl AssetForm {
    /// Set a field by its form name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "symbol" => &mut self.symbol,
            "type" => &mut self.asset_type,
            "decimals" => &mut self.decimals,
            "description" => &mut self.description,
            "website" => &mut self.website,
            "twitter" => &mut self.twitter,
            "discord" => &mut self.discord,
            "telegram" => &mut self.telegram,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Normalise into an [`AssetDraft`], recording presence and parse
    /// failures in `errors`.
    pub fn parse(&self, errors: &mut FieldErrors) -> AssetDraft {
        let name = required_text(&self.name, "name", errors);
        let symbol = required_text(&self.symbol, "symbol", errors);
        let description = required_text(&self.description, "description", errors);

        let asset_type = match normalize(&self.asset_type) {
            None => {
                errors.add("type", required_message("type"));
                None
            }
            Some(raw) => match AssetType::from_name(&raw) {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.add("type", "The selected type is invalid.");
                    None
                }
            },
        };

        let decimals = match normalize(&self.decimals) {
            None => {
                errors.add("decimals", required_message("decimals"));
                None
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("decimals", "The decimals field must be an integer.");
                    None
                }
            },
        };

        AssetDraft {
            name,
            symbol,
            asset_type,
            decimals,
            description,
            website: normalize(&self.website),
            twitter: normalize(&self.twitter),
            discord: normalize(&self.discord),
            telegram: normalize(&self.telegram),
        }
    }
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

fn required_text(value: &Option<String>, field: &str, errors: &mut FieldErrors) -> String {
    match normalize(value) {
        Some(v) => v,
        None => {
            errors.add(field, required_message(field));
            String::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Draft and validated fields
// ---------------------------------------------------------------------------

/// Normalised form, not yet known to be valid.
#[derive(Debug, Clone, Validate)]
pub struct AssetDraft {
    #[validate(length(
        max = 255,
        message = "The name field must not be greater than 255 characters."
    ))]
    pub name: String,

    #[validate(length(
        max = 10,
        message = "The symbol field must not be greater than 10 characters."
    ))]
    pub symbol: String,

    pub asset_type: Option<AssetType>,

    #[validate(range(
        min = 0,
        max = 255,
        message = "The decimals field must be between 0 and 255."
    ))]
    pub decimals: Option<i64>,

    pub description: String,

    #[validate(url(message = "The website field must be a valid URL."))]
    pub website: Option<String>,

    #[validate(url(message = "The twitter field must be a valid URL."))]
    pub twitter: Option<String>,

    #[validate(url(message = "The discord field must be a valid URL."))]
    pub discord: Option<String>,

    #[validate(url(message = "The telegram field must be a valid URL."))]
    pub telegram: Option<String>,
}

impl AssetDraft {
    /// Convert into validated fields. Returns `None` while `type` or
    /// `decimals` is still missing, which `parse` has already reported.
    pub fn into_fields(self) -> Option<AssetFields> {
        let asset_type = self.asset_type?;
        let decimals = i32::try_from(self.decimals?).ok()?;
        Some(AssetFields {
            name: self.name,
            symbol: self.symbol,
            asset_type,
            decimals,
            description: self.description,
            website: self.website,
            twitter: self.twitter,
            discord: self.discord,
            telegram: self.telegram,
        })
    }
}

/// Validated, normalised asset attributes (everything except `logo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetFields {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub decimals: i32,
    pub description: String,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
}

/// Run every rule that needs no I/O.
///
/// Returns the draft (so callers can run uniqueness checks on the normalised
/// name and symbol) together with every violation found so far.
pub fn check_form(form: &AssetForm) -> (AssetDraft, FieldErrors) {
    let mut errors = FieldErrors::new();
    let draft = form.parse(&mut errors);
    if let Err(e) = draft.validate() {
        errors.absorb(&e);
    }
    (draft, errors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
