//! Customer review cleaner
//!
//! Steps, in order:
//!   1. Cast Gender, Education, Purchased to categorical
//!   2. Drop fully duplicate rows
//!   3. Gender: trim + capitalise; Education: trim + title-case
//!
//! Row numbering is dense by construction (DataFrames carry no index).

use polars::prelude::*;
use std::path::Path;
use std::time::Instant;
use anyhow::{Context, Result};
use tracing::info;

use super::{categorical, keep_first_occurrence};
use crate::data::{load_csv, write_csv};
use crate::schema::{EDUCATION, GENDER, PURCHASED, REQUIRED_REVIEW_COLS};
use crate::utils::{capitalize, title_case};

/// Columns cast to categorical
pub const CATEGORICAL_COLS: &[&str] = &[GENDER, EDUCATION, PURCHASED];

/// Clean the customer review table and write it to `output`
///
/// # Errors
/// `MissingFile` if `input` does not exist, `MissingColumn` if any of
/// Gender, Education, Purchased, Review is absent. Nothing is written on error.
pub fn clean_customer_review(input: &Path, output: &Path) -> Result<DataFrame> {
    let start = Instant::now();
    info!("Cleaning customer reviews: {:?}", input);

    let mut df = prepare_customer_review(input)?;

    write_csv(&mut df, output, None)?;

    info!(
        "Customer reviews cleaned: {} rows → {:?} ({:.1} ms)",
        df.height(),
        output,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(df)
}

/// Load and clean the customer review table without writing it
pub fn prepare_customer_review(input: &Path) -> Result<DataFrame> {
    let raw = load_csv(input, REQUIRED_REVIEW_COLS)?;
    normalize_reviews(raw)
}

/// In-memory part of `clean_customer_review`
pub fn normalize_reviews(mut df: DataFrame) -> Result<DataFrame> {
    let rows_in = df.height();

    // Numeric indicators (0/1) have no direct categorical cast
    for &name in CATEGORICAL_COLS {
        let cast = df
            .column(name)?
            .cast(&DataType::String)?
            .cast(&categorical())
            .with_context(|| format!("Failed to cast '{}' to categorical", name))?;
        df.with_column(cast)?;
    }

    let mut df = keep_first_occurrence(&df, None)?;
    info!("  Dropped {} duplicate review rows", rows_in - df.height());

    normalize_text_column(&mut df, GENDER, capitalize)?;
    normalize_text_column(&mut df, EDUCATION, title_case)?;

    Ok(df)
}

/// Trim, apply `normalize`, keep the column categorical; missing stays missing
fn normalize_text_column(
    df: &mut DataFrame,
    name: &str,
    normalize: fn(&str) -> String,
) -> Result<()> {
    let as_text = df.column(name)?.cast(&DataType::String)?;
    let values: Vec<Option<String>> = as_text
        .str()?
        .into_iter()
        .map(|v| v.map(|s| normalize(s.trim())))
        .collect();

    let normalized = Series::new(name.into(), values)
        .cast(&categorical())
        .with_context(|| format!("Failed to re-cast '{}' to categorical", name))?;
    df.with_column(normalized)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_reviews() {
        let df = df![
            "Gender" => &[Some(" male"), Some("FEMALE "), Some(" male"), None],
            "Education" => &[Some("high school"), Some(" MASTER degree"), Some("high school"), Some("phd")],
            "Purchased" => &["Yes", "No", "Yes", "No"],
            "Review" => &["Good", "Bad", "Good", "Fine"],
        ]
        .unwrap();

        let cleaned = normalize_reviews(df).unwrap();

        // Row 3 duplicates row 1 before normalisation
        assert_eq!(cleaned.height(), 3);
        assert_eq!(
            text_values(&cleaned, "Gender"),
            vec![Some("Male".to_string()), Some("Female".to_string()), None]
        );
        assert_eq!(
            text_values(&cleaned, "Education"),
            vec![
                Some("High School".to_string()),
                Some("Master Degree".to_string()),
                Some("Phd".to_string()),
            ]
        );
        assert!(matches!(
            cleaned.column("Purchased").unwrap().dtype(),
            DataType::Categorical(_, _)
        ));
    }

    #[test]
    fn test_numeric_purchase_column_is_categorical() {
        let df = df![
            "Gender" => &["male", "female"],
            "Education" => &["phd", "master"],
            "Purchased" => &[1, 0],
            "Review" => &["Great", "Bad"],
        ]
        .unwrap();

        let cleaned = normalize_reviews(df).unwrap();

        assert!(matches!(
            cleaned.column("Purchased").unwrap().dtype(),
            DataType::Categorical(_, _)
        ));
        assert_eq!(
            text_values(&cleaned, "Purchased"),
            vec![Some("1".to_string()), Some("0".to_string())]
        );
    }

    #[test]
    fn test_rows_differing_only_in_case_are_kept() {
        // Dedup runs before text normalisation
        let df = df![
            "Gender" => &["male", "Male"],
            "Education" => &["phd", "phd"],
            "Purchased" => &["Yes", "Yes"],
            "Review" => &["ok", "ok"],
        ]
        .unwrap();

        let cleaned = normalize_reviews(df).unwrap();
        assert_eq!(cleaned.height(), 2);
    }
}
