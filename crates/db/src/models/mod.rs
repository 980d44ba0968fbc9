//! Row models and write DTOs.

pub mod asset;
