//! KPI stage
//!
//! Loads the cleaned (or previously scored) tables, re-derives every derived
//! column, computes the five KPIs and persists the scored tables plus the
//! KPI summary. Running the stage on its own output gives the same result.

pub mod aggregates;
pub mod reviews;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{ColumnSelection, KPI_SUMMARY_FILE, SCORED_PROFILES_FILE, SCORED_REVIEWS_FILE};
use crate::data::{load_csv, write_csv};
use crate::schema::{
    DERIVED_PROFILE_COLS, DERIVED_REVIEW_COLS, KPI_PROFILE_COLS, KPI_REVIEW_COLS, POSITIVE_REVIEW,
    PURCHASED, RECENCY, SENTIMENT, TOTAL_PURCHASES, TOTAL_SPENT,
};
use crate::sentiment::{LexiconScorer, PolarityScorer};
use crate::utils::{mean, select_aggregate_columns};

pub use aggregates::add_profile_totals;
pub use reviews::{add_review_scores, is_positive};

/// Literal written to `kpis.csv` for a KPI whose population was empty
pub const UNDEFINED: &str = "undefined";

/// The five KPIs, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kpi {
    AverageSpend,
    ConversionRate,
    RecencyMean,
    AveragePurchases,
    AverageSentiment,
}

impl Kpi {
    pub const ALL: [Kpi; 5] = [
        Kpi::AverageSpend,
        Kpi::ConversionRate,
        Kpi::RecencyMean,
        Kpi::AveragePurchases,
        Kpi::AverageSentiment,
    ];

    /// Metric name used in `kpis.csv` and the in-memory mapping
    pub fn name(self) -> &'static str {
        match self {
            Kpi::AverageSpend => "Average_Spend",
            Kpi::ConversionRate => "Conversion_Rate",
            Kpi::RecencyMean => "Recency_Mean",
            Kpi::AveragePurchases => "Average_Purchases",
            Kpi::AverageSentiment => "Average_Sentiment",
        }
    }

    /// Human-readable card title
    pub fn title(self) -> &'static str {
        match self {
            Kpi::AverageSpend => "Average spend",
            Kpi::ConversionRate => "Purchase rate after positive review",
            Kpi::RecencyMean => "Mean recency",
            Kpi::AveragePurchases => "Average purchases per customer",
            Kpi::AverageSentiment => "Average customer sentiment",
        }
    }

    /// Format a value with its unit
    pub fn format_value(self, value: f64) -> String {
        match self {
            Kpi::ConversionRate => format!("{:.2}%", value),
            Kpi::RecencyMean => format!("{:.2} days", value),
            _ => format!("{:.2}", value),
        }
    }
}

/// KPI snapshot; `None` marks a KPI whose source population was empty
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiRecord {
    #[serde(rename = "Average_Spend")]
    pub average_spend: Option<f64>,
    #[serde(rename = "Conversion_Rate")]
    pub conversion_rate: Option<f64>,
    #[serde(rename = "Recency_Mean")]
    pub recency_mean: Option<f64>,
    #[serde(rename = "Average_Purchases")]
    pub average_purchases: Option<f64>,
    #[serde(rename = "Average_Sentiment")]
    pub average_sentiment: Option<f64>,
}

impl KpiRecord {
    /// Compute the KPIs from scored tables
    ///
    /// Conversion rate is the mean purchase flag over positive reviews × 100;
    /// average sentiment is over all reviews.
    pub fn from_tables(tables: &ScoredTables) -> Result<Self> {
        let profiles = &tables.profiles;
        let reviews = &tables.reviews;

        let average_spend = mean(profiles.column(TOTAL_SPENT)?.f64()?.into_iter());
        let average_purchases = mean(profiles.column(TOTAL_PURCHASES)?.f64()?.into_iter());

        let recency = profiles.column(RECENCY)?.cast(&DataType::Float64)?;
        let recency_mean = mean(recency.f64()?.into_iter());

        let positive = reviews.column(POSITIVE_REVIEW)?.bool()?;
        let purchased = reviews.column(PURCHASED)?.bool()?;
        let conversion_rate = mean(
            positive
                .into_iter()
                .zip(purchased.into_iter())
                .filter(|(is_positive, _)| *is_positive == Some(true))
                .map(|(_, bought)| Some(if bought == Some(true) { 1.0 } else { 0.0 })),
        )
        .map(|rate| rate * 100.0);

        let average_sentiment = mean(reviews.column(SENTIMENT)?.f64()?.into_iter());

        Ok(Self {
            average_spend,
            conversion_rate,
            recency_mean,
            average_purchases,
            average_sentiment,
        })
    }

    pub fn get(&self, kpi: Kpi) -> Option<f64> {
        match kpi {
            Kpi::AverageSpend => self.average_spend,
            Kpi::ConversionRate => self.conversion_rate,
            Kpi::RecencyMean => self.recency_mean,
            Kpi::AveragePurchases => self.average_purchases,
            Kpi::AverageSentiment => self.average_sentiment,
        }
    }

    /// KPIs in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Kpi, Option<f64>)> + '_ {
        Kpi::ALL.into_iter().map(move |kpi| (kpi, self.get(kpi)))
    }

    /// Metric name → value mapping
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<f64>> {
        self.iter().map(|(kpi, value)| (kpi.name(), value)).collect()
    }

    /// KPIs with an empty source population
    pub fn undefined(&self) -> Vec<Kpi> {
        self.iter().filter(|(_, v)| v.is_none()).map(|(k, _)| k).collect()
    }

    /// Two-column (metric, value) summary table
    pub fn summary_frame(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.iter().map(|(kpi, _)| kpi.name()).collect();
        let values: Vec<Option<f64>> = self.iter().map(|(_, value)| value).collect();

        DataFrame::new(vec![
            Series::new("metric".into(), names).into(),
            Series::new("value".into(), values).into(),
        ])
        .context("Failed to build KPI summary table")
    }
}

/// Input and output locations for the KPI stage
#[derive(Debug, Clone)]
pub struct KpiPaths {
    pub reviews: PathBuf,
    pub profiles: PathBuf,
    pub output_dir: PathBuf,
}

impl KpiPaths {
    pub fn scored_reviews(&self) -> PathBuf {
        self.output_dir.join(SCORED_REVIEWS_FILE)
    }

    pub fn scored_profiles(&self) -> PathBuf {
        self.output_dir.join(SCORED_PROFILES_FILE)
    }

    pub fn summary(&self) -> PathBuf {
        self.output_dir.join(KPI_SUMMARY_FILE)
    }
}

/// Review and profile tables with derived columns attached
#[derive(Debug, Clone)]
pub struct ScoredTables {
    pub reviews: DataFrame,
    pub profiles: DataFrame,
}

/// Result of a full KPI stage run
#[derive(Debug, Clone)]
pub struct KpiRun {
    pub record: KpiRecord,
    pub tables: ScoredTables,
    pub written: Vec<PathBuf>,
}

/// Derive every KPI input column on the two tables
///
/// Previously derived columns are dropped first, so scored tables can be fed
/// back in.
pub fn score_tables(
    reviews: DataFrame,
    profiles: DataFrame,
    columns: &ColumnSelection,
    scorer: &dyn PolarityScorer,
) -> Result<ScoredTables> {
    let mut reviews = drop_if_present(reviews, DERIVED_REVIEW_COLS)?;
    let mut profiles = drop_if_present(profiles, DERIVED_PROFILE_COLS)?;

    let aggregate_columns = select_aggregate_columns(&profiles, columns, "profile table")?;
    info!(
        "  Aggregating {} amount and {} purchase columns",
        aggregate_columns.amount.len(),
        aggregate_columns.purchase.len()
    );

    add_profile_totals(&mut profiles, &aggregate_columns)?;
    add_review_scores(&mut reviews, scorer)?;

    Ok(ScoredTables { reviews, profiles })
}

/// Run the KPI stage with the default lexical scorer
///
/// # Errors
/// `MissingFile` if either input is absent; `MissingColumn` if Review,
/// Purchased, ID, Recency or a declared aggregate column is absent;
/// `ColumnCollision` if a column is both an amount and a purchase count.
/// Nothing is written on error.
pub fn compute_kpis(paths: &KpiPaths, columns: &ColumnSelection) -> Result<KpiRecord> {
    let run = run_kpi_stage(paths, columns, &LexiconScorer::new())?;
    Ok(run.record)
}

/// Run the KPI stage, returning the scored tables alongside the record
pub fn run_kpi_stage(
    paths: &KpiPaths,
    columns: &ColumnSelection,
    scorer: &dyn PolarityScorer,
) -> Result<KpiRun> {
    let start = Instant::now();
    info!("Computing KPIs from {:?} and {:?}", paths.reviews, paths.profiles);

    let reviews = load_csv(&paths.reviews, KPI_REVIEW_COLS)?;
    let profiles = load_csv(&paths.profiles, KPI_PROFILE_COLS)?;

    let tables = score_tables(reviews, profiles, columns, scorer)?;
    let record = KpiRecord::from_tables(&tables)?;

    for (kpi, value) in record.iter() {
        match value {
            Some(v) => info!("  {}: {}", kpi.name(), kpi.format_value(v)),
            None => warn!("  {}: {} (empty population)", kpi.name(), UNDEFINED),
        }
    }

    let written = write_outputs(&tables, &record, paths)?;

    info!(
        "KPI stage complete: {} files written ({:.1} ms)",
        written.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(KpiRun { record, tables, written })
}

fn write_outputs(tables: &ScoredTables, record: &KpiRecord, paths: &KpiPaths) -> Result<Vec<PathBuf>> {
    let mut profiles = tables.profiles.clone();
    let mut reviews = flags_as_integers(&tables.reviews)?;
    let mut summary = record.summary_frame()?;

    let profiles_path = paths.scored_profiles();
    let reviews_path = paths.scored_reviews();
    let summary_path = paths.summary();

    write_csv(&mut profiles, &profiles_path, None)?;
    write_csv(&mut reviews, &reviews_path, None)?;
    write_csv(&mut summary, &summary_path, Some(UNDEFINED))?;

    Ok(vec![profiles_path, reviews_path, summary_path])
}

/// Boolean flags as 0/1 so a re-run parses them back to the same values
fn flags_as_integers(reviews: &DataFrame) -> Result<DataFrame> {
    let mut out = reviews.clone();
    for name in [POSITIVE_REVIEW, PURCHASED] {
        let as_int = out.column(name)?.cast(&DataType::Int32)?;
        out.with_column(as_int)?;
    }
    Ok(out)
}

fn drop_if_present(mut df: DataFrame, names: &[&str]) -> Result<DataFrame> {
    for &name in names {
        if df.get_column_index(name).is_some() {
            df = df.drop(name)?;
        }
    }
    Ok(df)
}

/// Paths of a KPI run rooted in one directory (used for re-scoring scored output)
pub fn scored_dir_paths(dir: &Path) -> KpiPaths {
    KpiPaths {
        reviews: dir.join(SCORED_REVIEWS_FILE),
        profiles: dir.join(SCORED_PROFILES_FILE),
        output_dir: dir.to_path_buf(),
    }
}
