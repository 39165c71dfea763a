//! Read-only seam to the static item catalog.
//!
//! The catalog is produced by an offline pipeline and owned externally; the
//! core only requires [`CatalogOracle::definition`]. A shared, immutable
//! catalog handle is threaded into each store at construction so independent
//! stores (one per player session) can run against possibly different catalog
//! versions without any global state.
mod capability;
mod def;
mod oracle;

pub use capability::Capabilities;
pub use def::{ItemDefinition, ItemId, ItemType, Rarity, ToolKind};
pub use oracle::CatalogOracle;
