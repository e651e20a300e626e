pub mod loader;
pub mod store;

pub use store::{CatalogEntry, CatalogStore, EntryId};
