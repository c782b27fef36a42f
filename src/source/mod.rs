mod data_api;
mod projection;
mod sqlite_source;

pub use data_api::{DataApiConfig, DataApiSource};
pub use projection::Projection;
pub use sqlite_source::SqliteDocumentSource;

use crate::domain::PipelineError;

/// A fetched document: heterogeneous, nested, with no key guaranteed present.
pub type RawRecord = serde_json::Value;

/// Where listing documents come from. A full result set is returned in one call.
pub trait DocumentSource {
    fn fetch(&self, projection: &Projection) -> Result<Vec<RawRecord>, PipelineError>;

    /// Short human-readable name for logs.
    fn describe(&self) -> String;
}
