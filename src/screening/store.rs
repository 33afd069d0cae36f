//! Narrow interfaces to the configuration store and the assessment log.
//!
//! Implemented by `crate::db::SqliteStore`; callers hold them as
//! `Option<Arc<dyn ...>>`, where `None` means the capability is not configured.

use super::types::{Assessment, StoreError};

/// Opaque id of a persisted assessment record.
pub type RecordId = String;

/// Read side of the document store holding catalogs.
pub trait CatalogSource: Send + Sync {
    /// Fetch a raw document. `Ok(None)` means "not found".
    fn get_document(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;
}

/// Write side of the document store.
pub trait CatalogSink: Send + Sync {
    fn set_document(&self, key: &str, document: &serde_json::Value) -> Result<(), StoreError>;
}

/// Durable log of assessments.
pub trait AssessmentRecorder: Send + Sync {
    fn log(&self, user_id: &str, input_text: &str, assessment: &Assessment) -> Result<RecordId, StoreError>;
}
