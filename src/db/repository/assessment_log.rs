use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::screening::Assessment;

/// A logged assessment with the text it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub input_text: String,
    pub assessment: Assessment,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn new(user_id: &str, input_text: &str, assessment: &Assessment) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            input_text: input_text.to_string(),
            assessment: assessment.clone(),
            created_at: Utc::now(),
        }
    }
}

pub fn insert_assessment_record(conn: &Connection, record: &AssessmentRecord) -> Result<(), DatabaseError> {
    let assessment = serde_json::to_string(&record.assessment).map_err(|e| DatabaseError::InvalidValue {
        field: "emergency_assessments.assessment".into(),
        reason: e.to_string(),
    })?;

    conn.execute(
        "INSERT INTO emergency_assessments (id, user_id, input_text, assessment, is_emergency, risk, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.to_string(),
            record.user_id,
            record.input_text,
            assessment,
            record.assessment.is_emergency as i32,
            record.assessment.score,
            record.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_assessment_record(conn: &Connection, id: &Uuid) -> Result<Option<AssessmentRecord>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, user_id, input_text, assessment, created_at
             FROM emergency_assessments WHERE id = ?1",
            params![id.to_string()],
            read_row,
        )
        .optional()?;

    row.map(row_to_record).transpose()
}

/// Most recent records of a user, newest first.
pub fn list_assessment_records(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<AssessmentRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, input_text, assessment, created_at
         FROM emergency_assessments WHERE user_id = ?1
         ORDER BY created_at DESC LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(params![user_id, limit], read_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(row_to_record).collect()
}

/// Number of logged assessments of a user that were emergencies.
pub fn count_emergency_records(conn: &Connection, user_id: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM emergency_assessments WHERE user_id = ?1 AND is_emergency = 1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

type RecordRow = (String, String, String, String, DateTime<Utc>);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn row_to_record((id, user_id, input_text, assessment, created_at): RecordRow) -> Result<AssessmentRecord, DatabaseError> {
    let id = Uuid::parse_str(&id).map_err(|e| DatabaseError::InvalidValue {
        field: "emergency_assessments.id".into(),
        reason: e.to_string(),
    })?;
    let assessment = serde_json::from_str(&assessment).map_err(|e| DatabaseError::InvalidValue {
        field: "emergency_assessments.assessment".into(),
        reason: e.to_string(),
    })?;

    Ok(AssessmentRecord {
        id,
        user_id,
        input_text,
        assessment,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::screening::AssessmentEngine;

    fn assessment(text: &str) -> Assessment {
        AssessmentEngine::builtin().assess(Some(text), 70)
    }

    #[test]
    fn insert_and_get() {
        let conn = open_memory_database().unwrap();
        let record = AssessmentRecord::new("user-1", "vomiting blood", &assessment("vomiting blood"));
        insert_assessment_record(&conn, &record).unwrap();

        let loaded = get_assessment_record(&conn, &record.id).unwrap().unwrap();
        assert_eq!(loaded.user_id, "user-1");
        assert_eq!(loaded.input_text, "vomiting blood");
        assert_eq!(loaded.assessment, record.assessment);
        assert_eq!(loaded.created_at.timestamp(), record.created_at.timestamp());
    }

    #[test]
    fn get_unknown_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_assessment_record(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_is_scoped_and_limited() {
        let conn = open_memory_database().unwrap();
        for text in ["chest pain", "stroke", "gunshot"] {
            insert_assessment_record(&conn, &AssessmentRecord::new("a", text, &assessment(text))).unwrap();
        }
        insert_assessment_record(&conn, &AssessmentRecord::new("b", "stroke", &assessment("stroke"))).unwrap();

        assert_eq!(list_assessment_records(&conn, "a", 10).unwrap().len(), 3);
        assert_eq!(list_assessment_records(&conn, "a", 2).unwrap().len(), 2);
        assert_eq!(list_assessment_records(&conn, "b", 10).unwrap().len(), 1);
        assert!(list_assessment_records(&conn, "c", 10).unwrap().is_empty());
    }

    #[test]
    fn counts_only_emergencies() {
        let conn = open_memory_database().unwrap();
        for text in ["chest pain", "stroke", "gunshot"] {
            insert_assessment_record(&conn, &AssessmentRecord::new("a", text, &assessment(text))).unwrap();
        }
        // chest pain alone (60) is below the threshold.
        assert_eq!(count_emergency_records(&conn, "a").unwrap(), 2);
    }

    #[test]
    fn decision_columns_match_assessment() {
        let conn = open_memory_database().unwrap();
        let record = AssessmentRecord::new("a", "gunshot", &assessment("gunshot"));
        insert_assessment_record(&conn, &record).unwrap();
        let (flag, risk): (i32, i64) = conn
            .query_row(
                "SELECT is_emergency, risk FROM emergency_assessments WHERE id = ?1",
                params![record.id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!((flag, risk), (1, 80));
    }
}
