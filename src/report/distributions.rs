//! Distribution data behind the dashboard charts
//!
//! Histograms use equal-width bins over [min, max] with the maximum counted
//! in the last bin. Values that are missing or NaN are not counted.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use anyhow::Result;

use crate::kpi::ScoredTables;
use crate::schema::{POSITIVE_REVIEW, PURCHASED, RECENCY, SENTIMENT, TOTAL_PURCHASES, TOTAL_SPENT};
use crate::utils::mean;

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width intervals
    ///
    /// A constant input gives a single bin holding every value; no values
    /// gives an empty histogram.
    pub fn from_values<I>(values: I, bins: usize) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
        if values.is_empty() {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                bins: vec![Bin { lower: min, upper: max, count: values.len() }],
            };
        }

        let n_bins = bins.max(1);
        let width = (max - min) / n_bins as f64;
        let mut counts = vec![0usize; n_bins];

        for v in values {
            let idx = (((v - min) / width).floor() as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == n_bins { max } else { min + width * (i + 1) as f64 },
                count,
            })
            .collect();

        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Purchase rate (%) for positive reviews vs. negative/neutral reviews
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversionComparison {
    pub positive_rate: Option<f64>,
    pub other_rate: Option<f64>,
}

impl ConversionComparison {
    pub fn from_reviews(reviews: &DataFrame) -> Result<Self> {
        let positive = reviews.column(POSITIVE_REVIEW)?.bool()?;
        let purchased = reviews.column(PURCHASED)?.bool()?;

        let rate_where = |want: bool| {
            mean(
                positive
                    .into_iter()
                    .zip(purchased.into_iter())
                    .filter(|(p, _)| p.unwrap_or(false) == want)
                    .map(|(_, bought)| Some(if bought == Some(true) { 100.0 } else { 0.0 })),
            )
        };

        Ok(Self {
            positive_rate: rate_where(true),
            other_rate: rate_where(false),
        })
    }
}

/// Everything the dashboard plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributions {
    pub spend: Histogram,
    pub recency: Histogram,
    pub purchases: Histogram,
    pub sentiment: Histogram,
    pub conversion: ConversionComparison,
}

impl Distributions {
    pub fn from_tables(tables: &ScoredTables, bins: usize) -> Result<Self> {
        let profiles = &tables.profiles;

        let float_column = |df: &DataFrame, name: &str| -> Result<Vec<Option<f64>>> {
            let column = df.column(name)?.cast(&DataType::Float64)?;
            Ok(column.f64()?.into_iter().collect())
        };

        Ok(Self {
            spend: Histogram::from_values(float_column(profiles, TOTAL_SPENT)?, bins),
            recency: Histogram::from_values(float_column(profiles, RECENCY)?, bins),
            purchases: Histogram::from_values(float_column(profiles, TOTAL_PURCHASES)?, bins),
            sentiment: Histogram::from_values(float_column(&tables.reviews, SENTIMENT)?, bins),
            conversion: ConversionComparison::from_reviews(&tables.reviews)?,
        })
    }
}
