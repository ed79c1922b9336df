//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - typed rating-list records (`RatingRecord`, `SexCode`)
//! - per-country population statistics (`CountryProfile`, `CensusRow`)
//! - simulation inputs/outputs (`GapParams`, `GapDistributionFit`)
//! - sweep experiment results (`SweepKind`, `SweepPoint`, fits)

pub mod types;

pub use types::*;
