pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, chart_card, filter_sidebar, html_error_response};
pub use layouts::desktop::{desktop_layout, NavPage};
