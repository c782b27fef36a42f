use thiserror::Error;

/// Failures that prevent the listing table from being built.
///
/// None of these are recovered from: a session either owns a complete table
/// or owns the error that stopped it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A structural assumption about the fetched documents does not hold.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A present field could not be coerced to its column type.
    #[error("Parse failure in listing {listing_id}: field '{field}' has value {value}")]
    ParseFailure {
        listing_id: String,
        field: &'static str,
        value: String,
    },

    /// The document store could not be reached or answered with garbage.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The embedded document store failed locally.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PipelineError {
    pub fn parse(listing_id: &str, field: &'static str, value: impl ToString) -> Self {
        PipelineError::ParseFailure {
            listing_id: listing_id.to_string(),
            field,
            value: value.to_string(),
        }
    }
}
