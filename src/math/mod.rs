//! Numeric kernels shared across the pipeline.
//!
//! - moment estimation and the top-K mean utility (`moments`)
//! - least-squares line and power-law fits (`ols`)

pub mod moments;
pub mod ols;

pub use moments::*;
pub use ols::*;
