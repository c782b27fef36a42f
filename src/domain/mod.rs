pub mod aggregate;
pub mod filter;
pub mod listing;
pub mod normalize;
mod pipeline_error;

pub use filter::FilterSelection;
pub use listing::{CleaningFee, Facet, ListingRecord, ListingTable};
pub use normalize::normalize;
pub use pipeline_error::PipelineError;
