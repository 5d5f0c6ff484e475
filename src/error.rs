//! Error taxonomy for the pipeline
//!
//! Functions return `anyhow::Result` with context attached; these variants are
//! the root causes callers can match on via `downcast_ref::<PipelineError>()`.
//! Cell-level parse failures are not errors: they are coerced to missing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A required column is absent from a table
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// A column was selected both as an amount and as a purchase count
    #[error("column '{column}' selected as both amount and purchase count")]
    ColumnCollision { column: String },

    /// File has no header row
    #[error("input file has no header row: {}", path.display())]
    EmptyInput { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_names_file_and_column() {
        let err = PipelineError::MissingColumn {
            file: "reviews.csv".to_string(),
            column: "Review".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("reviews.csv"));
        assert!(msg.contains("'Review'"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = PipelineError::ColumnCollision {
            column: "NumSpent".to_string(),
        }
        .into();
        let err = err.context("KPI stage");
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ColumnCollision { .. })
        ));
    }
}
