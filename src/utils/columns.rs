//! Column validation and aggregate column selection
//!
//! Provides explicit checks so a renamed or missing column fails loudly
//! instead of silently dropping out of an aggregate.

use polars::prelude::*;
use anyhow::Result;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::ColumnSelection;
use crate::error::PipelineError;
use crate::schema::DERIVED_PROFILE_COLS;

/// Check that every column in `required` is present
///
/// # Errors
/// `PipelineError::MissingColumn` naming `file` and the first absent column.
pub fn require_columns(df: &DataFrame, required: &[&str], file: &str) -> Result<()> {
    let actual: FxHashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in required {
        if !actual.contains(expected) {
            return Err(PipelineError::MissingColumn {
                file: file.to_string(),
                column: expected.to_string(),
            }
            .into());
        }
    }

    Ok(())
}

/// Amount and purchase-count columns feeding `Total_Spent` / `Total_Purchases`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateColumns {
    pub amount: Vec<String>,
    pub purchase: Vec<String>,
}

/// Resolve a `ColumnSelection` against the profile table
///
/// Declared lists are validated for presence; convention markers are matched
/// as case-sensitive substrings of column names, in table order. Derived
/// total columns are never candidates. A column in both sets is an error.
pub fn select_aggregate_columns(
    df: &DataFrame,
    selection: &ColumnSelection,
    file: &str,
) -> Result<AggregateColumns> {
    let columns = match selection {
        ColumnSelection::Declared { amount_columns, purchase_columns } => {
            let declared: Vec<&str> = amount_columns
                .iter()
                .chain(purchase_columns.iter())
                .map(|s| s.as_str())
                .collect();
            require_columns(df, &declared, file)?;

            AggregateColumns {
                amount: amount_columns.clone(),
                purchase: purchase_columns.clone(),
            }
        }
        ColumnSelection::Convention { amount_markers, purchase_markers } => {
            let names: Vec<String> = df
                .get_column_names()
                .into_iter()
                .map(|s| s.to_string())
                .filter(|name| !DERIVED_PROFILE_COLS.contains(&name.as_str()))
                .collect();

            let matching = |markers: &[String]| -> Vec<String> {
                names
                    .iter()
                    .filter(|name| markers.iter().any(|m| name.contains(m.as_str())))
                    .cloned()
                    .collect()
            };

            AggregateColumns {
                amount: matching(amount_markers),
                purchase: matching(purchase_markers),
            }
        }
    };

    let amount_set: FxHashSet<&String> = columns.amount.iter().collect();
    if let Some(collision) = columns.purchase.iter().find(|c| amount_set.contains(c)) {
        return Err(PipelineError::ColumnCollision { column: collision.clone() }.into());
    }

    debug!("Amount columns: {:?}", columns.amount);
    debug!("Purchase columns: {:?}", columns.purchase);

    Ok(columns)
}
