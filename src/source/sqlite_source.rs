use crate::db::connection::Database;
use crate::db::documents::scan_documents;
use crate::domain::PipelineError;
use crate::source::{DocumentSource, Projection, RawRecord};

/// Reads a collection out of the embedded SQLite document store.
pub struct SqliteDocumentSource {
    db: Database,
    collection: String,
}

impl SqliteDocumentSource {
    pub fn new(db: Database, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }
}

impl DocumentSource for SqliteDocumentSource {
    fn fetch(&self, projection: &Projection) -> Result<Vec<RawRecord>, PipelineError> {
        let docs = scan_documents(&self.db, &self.collection).map_err(|e| match e {
            PipelineError::Storage(msg) => PipelineError::SourceUnavailable(msg),
            other => other,
        })?;

        Ok(docs.iter().map(|d| projection.apply(d)).collect())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.db.path().display(), self.collection)
    }
}
