//! Catalog content loading for the inventory core.
//!
//! Converts RON/TOML data files into the [`armory_core::CatalogOracle`]
//! implementation that stores consume. The catalog itself is produced by an
//! offline generation pipeline; this crate only reads its output.
pub mod catalog;
pub mod loaders;

pub use catalog::Catalog;
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
