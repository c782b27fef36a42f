pub mod css;
pub mod html;
pub mod xlsx;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use css::{css_response, MAIN_CSS};
pub use html::{html_response, html_response_with_status};
pub use xlsx::xlsx_response;
