pub mod card;
pub mod chart;
pub mod error;
pub mod sidebar;

pub use card::card;
pub use chart::chart_card;
pub use error::html_error_response;
pub use sidebar::filter_sidebar;
