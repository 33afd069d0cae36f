//! SQLite-backed configuration store and assessment log.
//!
//! One connection behind a mutex; the repository functions do the SQL.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use super::repository::{get_config_document, insert_assessment_record, put_config_document, AssessmentRecord};
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::screening::{Assessment, AssessmentRecorder, CatalogSink, CatalogSource, RecordId, StoreError};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and run migrations.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = open_database(path)?;
        tracing::debug!(path = %path.display(), "Screening store opened");
        Ok(Self::from_connection(conn))
    }

    /// In-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(open_memory_database()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Borrow the connection for direct repository calls.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockFailed)
    }
}

impl CatalogSource for SqliteStore {
    fn get_document(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let conn = self.connection()?;
        Ok(get_config_document(&conn, key)?)
    }
}

impl CatalogSink for SqliteStore {
    fn set_document(&self, key: &str, document: &serde_json::Value) -> Result<(), StoreError> {
        let conn = self.connection()?;
        put_config_document(&conn, key, document)?;
        Ok(())
    }
}

impl AssessmentRecorder for SqliteStore {
    fn log(&self, user_id: &str, input_text: &str, assessment: &Assessment) -> Result<RecordId, StoreError> {
        let record = AssessmentRecord::new(user_id, input_text, assessment);
        let conn = self.connection()?;
        insert_assessment_record(&conn, &record)?;
        Ok(record.id.to_string())
    }
}
