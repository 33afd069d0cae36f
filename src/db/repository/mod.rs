//! Repository layer: table-scoped database operations.
//!
//! Free functions over a borrowed `Connection`; locking and sharing are the
//! caller's concern (see `SqliteStore`).

mod assessment_log;
mod config_document;

pub use assessment_log::*;
pub use config_document::*;
