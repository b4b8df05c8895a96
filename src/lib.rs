pub mod api;
pub mod error;
pub mod models;
pub mod query;
pub mod sort;
pub mod ui;
