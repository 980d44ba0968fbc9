use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more form fields failed their rules. Every violation found is
    /// carried, not only the first.
    #[error("Invalid fields: {0}")]
    InvalidFields(FieldErrors),
}
