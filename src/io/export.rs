//! One-way result exports (CSV for sweep steps, JSON for summaries).
//!
//! Exports carry summary statistics only — gap sample collections are
//! recomputed per run and never persisted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::SweepResult;
use crate::error::AppError;

/// Write sweep steps to a CSV file, one row per step.
pub fn write_sweep_csv(path: &Path, result: &SweepResult) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create sweep CSV '{}': {e}", path.display())))?;

    writeln!(file, "x,mean,std_err")
        .map_err(|e| AppError::io(format!("Failed to write sweep CSV header: {e}")))?;
    for p in &result.points {
        writeln!(file, "{:.10},{:.10},{:.10}", p.x, p.mean, p.std_err)
            .map_err(|e| AppError::io(format!("Failed to write sweep CSV row: {e}")))?;
    }

    Ok(())
}

/// Serialize any summary value to pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create JSON export '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::io(format!("Failed to write JSON export: {e}")))?;
    Ok(())
}
