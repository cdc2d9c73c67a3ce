//! Persistence: named JSON collections plus whole-state export

pub mod export;
pub mod store;

pub use export::{ExportPayload, EXPORT_VERSION};
pub use store::{JsonStore, StorageError};
