//! Data schemes module
//!
//! Each scheme owns its ingestion and the in-memory representation of one
//! data source.

pub mod ds01_superstore_sales;
