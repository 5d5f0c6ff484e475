//! Profile aggregates: Total_Spent and Total_Purchases
//!
//! Row-wise sums over the selected columns. Cells are coerced to numeric and
//! missing cells count as 0, so a row always gets a total.

use polars::prelude::*;
use anyhow::{Context, Result};

use crate::schema::{TOTAL_PURCHASES, TOTAL_SPENT};
use crate::utils::AggregateColumns;

/// Attach `Total_Spent` and `Total_Purchases` to the profile table
pub fn add_profile_totals(df: &mut DataFrame, columns: &AggregateColumns) -> Result<()> {
    let spent = row_sum(df, &columns.amount).context("Failed to sum amount columns")?;
    let purchases = row_sum(df, &columns.purchase).context("Failed to sum purchase columns")?;

    df.with_column(Series::new(TOTAL_SPENT.into(), spent))?;
    df.with_column(Series::new(TOTAL_PURCHASES.into(), purchases))?;
    Ok(())
}

/// Sum `columns` per row; an empty column list gives all zeros
pub fn row_sum(df: &DataFrame, columns: &[String]) -> Result<Vec<f64>> {
    let mut totals = vec![0.0; df.height()];

    for name in columns {
        let values = df
            .column(name)
            .with_context(|| format!("Missing column '{}'", name))?
            .cast(&DataType::Float64)?;

        for (total, value) in totals.iter_mut().zip(values.f64()?.into_iter()) {
            *total += value.unwrap_or(0.0);
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_from_amount_and_purchase_columns() {
        let mut df = df![
            "MntWines" => &[100, 0],
            "MntFruits" => &[50, 0],
            "NumWebPurchases" => &[Some(3), None],
            "NumStorePurchases" => &[2, 4],
        ]
        .unwrap();

        let columns = AggregateColumns {
            amount: vec!["MntWines".to_string(), "MntFruits".to_string()],
            purchase: vec!["NumWebPurchases".to_string(), "NumStorePurchases".to_string()],
        };
        add_profile_totals(&mut df, &columns).unwrap();

        let spent: Vec<Option<f64>> = df.column("Total_Spent").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(spent, vec![Some(150.0), Some(0.0)]);

        let purchases: Vec<Option<f64>> =
            df.column("Total_Purchases").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(purchases, vec![Some(5.0), Some(4.0)]);
    }

    #[test]
    fn test_row_sum_without_columns() {
        let df = df![
            "ID" => &[1, 2, 3],
        ]
        .unwrap();
        assert_eq!(row_sum(&df, &[]).unwrap(), vec![0.0, 0.0, 0.0]);
    }
}
