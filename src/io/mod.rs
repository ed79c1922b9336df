//! Input/output helpers.
//!
//! - fixed-width rating-list ingest + lazy queries (`ingest`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
