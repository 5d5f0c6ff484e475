//! Cleaning stage
//!
//! Turns the two raw datasets into typed, deduplicated, outlier-filtered
//! tables under the processed directory.

pub mod reviews;
pub mod profiles;

pub use reviews::{clean_customer_review, normalize_reviews, prepare_customer_review};
pub use profiles::{
    clean_marketing_campaign, normalize_profiles, parse_customer_date, prepare_marketing_campaign,
};

use polars::prelude::*;
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

/// Keep the first row for each distinct key
///
/// The key is the listed columns, or every column when `key_columns` is
/// `None`. Values are compared by their string rendering, with missing
/// values equal to each other.
pub fn keep_first_occurrence(df: &DataFrame, key_columns: Option<&[&str]>) -> Result<DataFrame> {
    let columns: Vec<&Column> = match key_columns {
        Some(keys) => keys
            .iter()
            .map(|&k| df.column(k))
            .collect::<PolarsResult<_>>()
            .context("Dedup key column missing")?,
        None => df.get_columns().iter().collect(),
    };

    let rendered: Vec<Column> = columns
        .iter()
        .map(|c| c.cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;
    let rendered: Vec<&StringChunked> = rendered
        .iter()
        .map(|c| c.str())
        .collect::<PolarsResult<_>>()?;

    let mut seen: FxHashSet<Vec<Option<&str>>> = FxHashSet::default();
    let keep: Vec<bool> = (0..df.height())
        .map(|idx| {
            let key: Vec<Option<&str>> = rendered.iter().map(|ca| ca.get(idx)).collect();
            seen.insert(key)
        })
        .collect();

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    df.filter(&mask).context("Failed to drop duplicate rows")
}

/// Categorical dtype used for the review's categorical columns
pub(crate) fn categorical() -> DataType {
    DataType::Categorical(None, CategoricalOrdering::Physical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_row_dedup_keeps_first() {
        let df = df![
            "a" => &[Some(1), Some(1), Some(2), None, None],
            "b" => &["x", "x", "x", "y", "y"],
        ]
        .unwrap();

        let deduped = keep_first_occurrence(&df, None).unwrap();
        assert_eq!(deduped.height(), 3);
    }

    #[test]
    fn test_keyed_dedup_ignores_other_columns() {
        let df = df![
            "ID" => &[7, 8, 7],
            "Income" => &[100.0, 200.0, 999.0],
        ]
        .unwrap();

        let deduped = keep_first_occurrence(&df, Some(&["ID"][..])).unwrap();
        assert_eq!(deduped.height(), 2);

        let incomes: Vec<Option<f64>> = deduped.column("Income").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(incomes, vec![Some(100.0), Some(200.0)]);
    }
}
