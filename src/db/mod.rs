pub mod connection;
pub mod documents;
