//! Pipeline configuration
//!
//! All paths are explicit values; nothing is resolved at load time of the
//! crate. Defaults mirror the `data/raw`, `data/processed`, `data/scored`
//! layout of the original project.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

pub const CLEANED_REVIEWS_FILE: &str = "customer_reviews_cleaned.csv";
pub const CLEANED_PROFILES_FILE: &str = "marketing_campaign_cleaned.csv";
pub const SCORED_REVIEWS_FILE: &str = "customer_reviews_scored.csv";
pub const SCORED_PROFILES_FILE: &str = "marketing_campaign_scored.csv";
pub const KPI_SUMMARY_FILE: &str = "kpis.csv";
pub const REPORT_MARKDOWN_FILE: &str = "report.md";
pub const REPORT_JSON_FILE: &str = "report.json";

/// How the KPI stage picks the amount and purchase-count columns
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Explicit column lists, validated against the profile table
    Declared {
        amount_columns: Vec<String>,
        purchase_columns: Vec<String>,
    },
    /// Any column whose name contains one of the markers (case-sensitive)
    Convention {
        amount_markers: Vec<String>,
        purchase_markers: Vec<String>,
    },
}

impl ColumnSelection {
    /// Marker-based discovery with the marketing campaign naming convention
    pub fn convention() -> Self {
        ColumnSelection::Convention {
            amount_markers: to_strings(&["Mnt", "Amount", "Spent"]),
            purchase_markers: to_strings(&["Num", "Purchases"]),
        }
    }
}

impl Default for ColumnSelection {
    /// Declared lists matching what the convention picks on the standard schema
    fn default() -> Self {
        ColumnSelection::Declared {
            amount_columns: to_strings(&[
                "MntWines",
                "MntFruits",
                "MntMeatProducts",
                "MntFishProducts",
                "MntSweetProducts",
                "MntGoldProds",
            ]),
            purchase_columns: to_strings(&[
                "NumDealsPurchases",
                "NumWebPurchases",
                "NumCatalogPurchases",
                "NumStorePurchases",
                "NumWebVisitsMonth",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Full pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base directory; relative paths below resolve against it
    pub data_dir: PathBuf,
    pub raw_reviews: PathBuf,
    pub raw_profiles: PathBuf,
    pub processed_dir: PathBuf,
    pub scored_dir: PathBuf,
    pub columns: ColumnSelection,
    pub histogram_bins: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            raw_reviews: PathBuf::from("raw/Customer_Review.csv"),
            raw_profiles: PathBuf::from("raw/marketing_campaign.csv"),
            processed_dir: PathBuf::from("processed"),
            scored_dir: PathBuf::from("scored"),
            columns: ColumnSelection::default(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl PipelineConfig {
    /// Default layout rooted at `data_dir`
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config: {:?}", path))?;

        let config: PipelineConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse pipeline config: {:?}", path))?;

        if config.histogram_bins == 0 {
            anyhow::bail!("histogram_bins must be at least 1");
        }

        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn raw_reviews_path(&self) -> PathBuf {
        self.resolve(&self.raw_reviews)
    }

    pub fn raw_profiles_path(&self) -> PathBuf {
        self.resolve(&self.raw_profiles)
    }

    pub fn processed_dir_path(&self) -> PathBuf {
        self.resolve(&self.processed_dir)
    }

    pub fn scored_dir_path(&self) -> PathBuf {
        self.resolve(&self.scored_dir)
    }

    pub fn cleaned_reviews_path(&self) -> PathBuf {
        self.processed_dir_path().join(CLEANED_REVIEWS_FILE)
    }

    pub fn cleaned_profiles_path(&self) -> PathBuf {
        self.processed_dir_path().join(CLEANED_PROFILES_FILE)
    }

    pub fn scored_reviews_path(&self) -> PathBuf {
        self.scored_dir_path().join(SCORED_REVIEWS_FILE)
    }

    pub fn scored_profiles_path(&self) -> PathBuf {
        self.scored_dir_path().join(SCORED_PROFILES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::from_data_dir("/srv/data");
        assert_eq!(
            config.raw_profiles_path(),
            PathBuf::from("/srv/data/raw/marketing_campaign.csv")
        );
        assert_eq!(
            config.cleaned_reviews_path(),
            PathBuf::from("/srv/data/processed/customer_reviews_cleaned.csv")
        );
        assert_eq!(
            config.scored_profiles_path(),
            PathBuf::from("/srv/data/scored/marketing_campaign_scored.csv")
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut config = PipelineConfig::from_data_dir("data");
        config.scored_dir = PathBuf::from("/tmp/scored");
        assert_eq!(config.scored_dir_path(), PathBuf::from("/tmp/scored"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "data_dir": "/srv/data",
            "columns": {
                "mode": "convention",
                "amount_markers": ["Mnt"],
                "purchase_markers": ["Num"]
            }
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.histogram_bins, DEFAULT_HISTOGRAM_BINS);
        assert_eq!(config.processed_dir, PathBuf::from("processed"));
        assert!(matches!(config.columns, ColumnSelection::Convention { .. }));
    }

    #[test]
    fn test_default_selection_is_declared() {
        match ColumnSelection::default() {
            ColumnSelection::Declared { amount_columns, purchase_columns } => {
                assert_eq!(amount_columns.len(), 6);
                assert_eq!(purchase_columns.len(), 5);
                assert!(purchase_columns.contains(&"NumWebVisitsMonth".to_string()));
            }
            other => panic!("unexpected default: {:?}", other),
        }
    }
}
