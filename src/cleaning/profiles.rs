//! Marketing campaign (customer profile) cleaner
//!
//! Steps, in this exact order (each step's output is the next step's
//! population):
//!   1. Coerce numeric columns; unparseable cells → missing
//!   2. Parse Dt_Customer; unparseable cells → missing
//!   3. Drop rows repeating an earlier ID
//!   4. Impute Income (median of remaining), Teenhome (0), Response (0),
//!      forward-fill Dt_Customer
//!   5. Filter Year_Birth ∉ [1900, 2025], Income < 0, Recency < 0
//!   6. Marital_Status → closed set or "Other"
//!   7. Teenhome → integer
//!
//! Imputation runs before the outlier filter, so the median is taken over
//! rows the filter may later drop.

use polars::prelude::*;
use chrono::NaiveDate;
use std::path::Path;
use std::time::Instant;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::keep_first_occurrence;
use crate::data::{load_whitespace_table, write_csv};
use crate::schema::{
    DT_CUSTOMER, ID, INCOME, MARITAL_STATUS, MAX_BIRTH_YEAR, MIN_BIRTH_YEAR, OTHER_MARITAL_STATUS,
    RECENCY, REQUIRED_PROFILE_COLS, RESPONSE, TEENHOME, VALID_MARITAL_STATUS, YEAR_BIRTH,
};
use crate::utils::{forward_fill, median};

/// Columns coerced to numeric in step 1
const NUMERIC_COLS: &[&str] = &[INCOME, TEENHOME, YEAR_BIRTH, RECENCY, RESPONSE];

/// Accepted Dt_Customer formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Clean the marketing campaign table and write it to `output`
///
/// The input is whitespace-delimited; lines with more fields than the header
/// are skipped.
///
/// # Errors
/// `MissingFile` if `input` does not exist, `MissingColumn` if a required
/// column is absent. Nothing is written on error.
pub fn clean_marketing_campaign(input: &Path, output: &Path) -> Result<DataFrame> {
    let start = Instant::now();
    info!("Cleaning marketing campaign: {:?}", input);

    let mut df = prepare_marketing_campaign(input)?;

    write_csv(&mut df, output, None)?;

    info!(
        "Marketing campaign cleaned: {} rows → {:?} ({:.1} ms)",
        df.height(),
        output,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(df)
}

/// Load and clean the marketing campaign table without writing it
pub fn prepare_marketing_campaign(input: &Path) -> Result<DataFrame> {
    let table = load_whitespace_table(input, REQUIRED_PROFILE_COLS)?;
    info!(
        "  Read {} rows ({} malformed lines skipped)",
        table.frame.height(),
        table.skipped_lines
    );

    normalize_profiles(table.frame)
}

/// In-memory part of `clean_marketing_campaign`
pub fn normalize_profiles(mut df: DataFrame) -> Result<DataFrame> {
    let integer_source: Vec<bool> = [YEAR_BIRTH, RECENCY, RESPONSE]
        .iter()
        .map(|&name| df.column(name).map(|c| c.dtype().is_integer()))
        .collect::<PolarsResult<_>>()?;

    // STEP 1: numeric coercion
    for &name in NUMERIC_COLS {
        coerce_numeric(&mut df, name)?;
    }

    // STEP 2: dates
    parse_date_column(&mut df)?;

    // STEP 3: dedup on ID
    let rows_before = df.height();
    let mut df = keep_first_occurrence(&df, Some(&[ID][..]))?;
    info!("  Dropped {} rows with repeated {}", rows_before - df.height(), ID);

    // STEP 4: imputation
    let incomes: Vec<Option<f64>> = df.column(INCOME)?.f64()?.into_iter().collect();
    match median(incomes.iter().copied()) {
        Some(income_median) => {
            let missing = incomes.iter().filter(|v| v.is_none()).count();
            info!("  Imputed {} missing incomes with median {:.2}", missing, income_median);
            fill_missing(&mut df, INCOME, income_median)?;
        }
        None => warn!("  No income values present; missing incomes left for the outlier filter"),
    }
    fill_missing(&mut df, TEENHOME, 0.0)?;
    fill_missing(&mut df, RESPONSE, 0.0)?;
    forward_fill_dates(&mut df)?;

    // STEP 5: outlier filter (after imputation)
    let rows_before = df.height();
    let df = df
        .lazy()
        .filter(
            col(YEAR_BIRTH)
                .gt_eq(lit(MIN_BIRTH_YEAR))
                .and(col(YEAR_BIRTH).lt_eq(lit(MAX_BIRTH_YEAR)))
                .and(col(INCOME).gt_eq(lit(0.0)))
                .and(col(RECENCY).gt_eq(lit(0.0))),
        )
        .collect()
        .context("Failed to filter profile outliers")?;
    info!("  Dropped {} outlier rows", rows_before - df.height());

    let mut df = df;

    // STEP 6: marital status
    map_marital_status(&mut df)?;

    // STEP 7: integer casts
    let teens = df.column(TEENHOME)?.cast(&DataType::Int64)?;
    df.with_column(teens)?;
    for (&name, was_integer) in [YEAR_BIRTH, RECENCY, RESPONSE].iter().zip(integer_source) {
        if was_integer {
            let restored = df.column(name)?.cast(&DataType::Int64)?;
            df.with_column(restored)?;
        }
    }

    Ok(df)
}

/// Cast a column to Float64; unparseable cells become missing
fn coerce_numeric(df: &mut DataFrame, name: &str) -> Result<()> {
    let column = df.column(name)?;
    let nulls_before = column.null_count();

    let coerced = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Failed to coerce '{}' to numeric", name))?;

    let coerced_away = coerced.null_count() - nulls_before;
    if coerced_away > 0 {
        warn!("  '{}': {} unparseable values set to missing", name, coerced_away);
    }

    df.with_column(coerced)?;
    Ok(())
}

fn fill_missing(df: &mut DataFrame, name: &str, value: f64) -> Result<()> {
    let filled: Vec<f64> = df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(value))
        .collect();
    df.with_column(Series::new(name.into(), filled))?;
    Ok(())
}

/// Parse a customer-since date
///
/// Tries `DATE_FORMATS` in order on the date part (anything after a `T` is
/// ignored).
pub fn parse_customer_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn days_since_epoch(date: NaiveDate) -> Option<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from((date - epoch).num_days()).ok()
}

fn parse_date_column(df: &mut DataFrame) -> Result<()> {
    let as_text = df.column(DT_CUSTOMER)?.cast(&DataType::String)?;
    let text = as_text.str()?;

    let days: Vec<Option<i32>> = text
        .into_iter()
        .map(|v| v.and_then(parse_customer_date).and_then(days_since_epoch))
        .collect();

    let unparsed = text
        .into_iter()
        .zip(&days)
        .filter(|(raw, parsed)| raw.is_some() && parsed.is_none())
        .count();
    if unparsed > 0 {
        warn!("  '{}': {} unparseable dates set to missing", DT_CUSTOMER, unparsed);
    }

    let dates = Series::new(DT_CUSTOMER.into(), days).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(())
}

fn forward_fill_dates(df: &mut DataFrame) -> Result<()> {
    let physical = df.column(DT_CUSTOMER)?.cast(&DataType::Int32)?;
    let days: Vec<Option<i32>> = physical.i32()?.into_iter().collect();
    let filled = forward_fill(&days);

    debug!(
        "  Forward-filled {} missing dates",
        days.iter().zip(&filled).filter(|(a, b)| a.is_none() && b.is_some()).count()
    );

    let dates = Series::new(DT_CUSTOMER.into(), filled).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(())
}

fn map_marital_status(df: &mut DataFrame) -> Result<()> {
    let as_text = df.column(MARITAL_STATUS)?.cast(&DataType::String)?;
    let mapped: Vec<&str> = as_text
        .str()?
        .into_iter()
        .map(|v| match v {
            Some(status) if VALID_MARITAL_STATUS.contains(&status) => status,
            _ => OTHER_MARITAL_STATUS,
        })
        .collect();

    let mapped = Series::new(MARITAL_STATUS.into(), mapped);
    df.with_column(mapped)?;
    Ok(())
}
