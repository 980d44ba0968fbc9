//! Asset desk domain logic.
//!
//! Pure types and rules shared by the persistence, storage, export and HTTP
//! crates. Nothing in here performs I/O.

pub mod asset_type;
pub mod error;
pub mod export;
pub mod listing;
pub mod logo;
pub mod types;
pub mod validation;
