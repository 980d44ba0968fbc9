//! Asset orchestration shared by the HTTP handlers.

pub mod form;
pub mod store;
pub mod view;

pub use store::AssetStore;
pub use view::AssetView;
