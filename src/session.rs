use crate::domain::{normalize, ListingTable, PipelineError};
use crate::source::{DocumentSource, Projection};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// What one dashboard session works from: the normalized table, or the reason there is none.
///
/// Built once at startup and only read afterwards.
#[derive(Debug)]
pub struct Session {
    data: Result<ListingTable, PipelineError>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Session {
    /// Fetch with the fixed projection and normalize. Failures are kept, not raised.
    pub fn load(source: &dyn DocumentSource) -> Self {
        let described = source.describe();
        info!(source = %described, "loading listings");

        let data = source
            .fetch(&Projection::listing_fields())
            .and_then(|raw| normalize(&raw))
            .map(ListingTable::new);

        match &data {
            Ok(table) => info!(rows = table.len(), "listing table ready"),
            Err(e) => error!(error = %e, "listing table unavailable"),
        }

        Self {
            data,
            source: described,
            loaded_at: Utc::now(),
        }
    }

    pub fn from_table(table: ListingTable) -> Self {
        Self {
            data: Ok(table),
            source: "in-memory".into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn from_error(err: PipelineError) -> Self {
        Self {
            data: Err(err),
            source: "in-memory".into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn table(&self) -> Result<&ListingTable, &PipelineError> {
        self.data.as_ref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawRecord;
    use serde_json::json;

    struct FixedSource(Result<Vec<RawRecord>, PipelineError>);

    impl DocumentSource for FixedSource {
        fn fetch(&self, projection: &Projection) -> Result<Vec<RawRecord>, PipelineError> {
            self.0
                .clone()
                .map(|docs| docs.iter().map(|d| projection.apply(d)).collect())
        }

        fn describe(&self) -> String {
            "fixed".into()
        }
    }

    #[test]
    fn load_builds_table_from_source() {
        let source = FixedSource(Ok(vec![json!({
            "_id": "1",
            "price": "50.00",
            "availability": { "availability_365": 10 }
        })]));

        let session = Session::load(&source);
        let table = session.table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].price, 50);
        assert_eq!(session.source(), "fixed");
    }

    #[test]
    fn load_keeps_source_failure() {
        let source = FixedSource(Err(PipelineError::SourceUnavailable("auth failed".into())));

        let session = Session::load(&source);
        assert_eq!(
            session.table().unwrap_err(),
            &PipelineError::SourceUnavailable("auth failed".into())
        );
    }

    #[test]
    fn load_keeps_schema_mismatch() {
        let source = FixedSource(Ok(vec![json!({ "_id": "1" })]));

        assert!(matches!(
            Session::load(&source).table(),
            Err(PipelineError::SchemaMismatch(_))
        ));
    }
}
