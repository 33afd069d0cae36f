use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;

/// Fetch a keyed JSON document. `Ok(None)` when the key is absent.
pub fn get_config_document(conn: &Connection, key: &str) -> Result<Option<serde_json::Value>, DatabaseError> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM config_documents WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    body.map(|text| {
        serde_json::from_str(&text).map_err(|e| DatabaseError::InvalidValue {
            field: format!("config_documents.{key}"),
            reason: e.to_string(),
        })
    })
    .transpose()
}

/// Insert or replace a keyed JSON document.
pub fn put_config_document(conn: &Connection, key: &str, body: &serde_json::Value) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO config_documents (key, body, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        params![key, body.to_string(), chrono::Utc::now()],
    )?;
    Ok(())
}

/// Remove a document. Returns whether a row was deleted.
pub fn delete_config_document(conn: &Connection, key: &str) -> Result<bool, DatabaseError> {
    let deleted = conn.execute("DELETE FROM config_documents WHERE key = ?1", params![key])?;
    Ok(deleted > 0)
}
