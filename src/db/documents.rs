use crate::db::connection::Database;
use crate::domain::PipelineError;
use crate::source::RawRecord;
use chrono::Utc;
use rusqlite::params;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

fn storage(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Storage(e.to_string())
}

/// Insert documents into `collection` inside a single transaction. Returns how many were written.
pub fn insert_documents(
    db: &Database,
    collection: &str,
    documents: &[RawRecord],
) -> Result<usize, PipelineError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn.transaction().map_err(storage)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO documents (collection, body, imported_at) VALUES (?1, ?2, ?3)",
                )
                .map_err(storage)?;

            for doc in documents {
                let body = serde_json::to_string(doc).map_err(storage)?;
                stmt.execute(params![collection, body, now]).map_err(storage)?;
            }
        }
        tx.commit().map_err(storage)?;
        Ok(documents.len())
    })
}

/// Load a JSON array of documents (e.g. `mongoexport --jsonArray`) into `collection`.
pub fn import_documents(
    db: &Database,
    collection: &str,
    path: &Path,
) -> Result<usize, PipelineError> {
    let file = File::open(path)
        .map_err(|e| PipelineError::Storage(format!("Failed to open {}: {e}", path.display())))?;

    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        PipelineError::Storage(format!("Failed to parse {}: {e}", path.display()))
    })?;

    let Value::Array(documents) = value else {
        return Err(PipelineError::Storage(format!(
            "{} does not contain a JSON array",
            path.display()
        )));
    };

    let written = insert_documents(db, collection, &documents)?;
    info!(collection, written, path = %path.display(), "imported documents");
    Ok(written)
}

pub fn count_documents(db: &Database, collection: &str) -> Result<i64, PipelineError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .map_err(storage)
    })
}

/// Every document in `collection`, in insertion order.
pub fn scan_documents(db: &Database, collection: &str) -> Result<Vec<RawRecord>, PipelineError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY seq")
            .map_err(storage)?;

        let rows = stmt
            .query_map(params![collection], |row| row.get::<_, String>(0))
            .map_err(storage)?;

        let mut out = Vec::new();
        for body in rows {
            let body = body.map_err(storage)?;
            let doc: Value = serde_json::from_str(&body)
                .map_err(|e| PipelineError::Storage(format!("Corrupt document: {e}")))?;
            out.push(doc);
        }
        Ok(out)
    })
}
