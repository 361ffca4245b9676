//! Input helpers.
//!
//! - city CSV ingest, validation and month/day filtering (`ingest`)

pub mod ingest;

pub use ingest::*;
