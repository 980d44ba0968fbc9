//! Named-disk file storage and the logo lifecycle built on top of it.
//!
//! A [`Disk`] is addressed by name through the [`DiskRegistry`]: `public` and
//! `local` are filesystem disks, `cloud` is an S3-compatible bucket registered
//! only when configured.

pub mod cloud;
pub mod config;
pub mod disk;
pub mod error;
pub mod local;
pub mod logo;
pub mod registry;

pub use disk::Disk;
pub use error::StorageError;
pub use registry::DiskRegistry;
