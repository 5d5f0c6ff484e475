//! Dashboard report
//!
//! Everything a dashboard needs from one pipeline run: KPI cards, chart
//! distributions and the narrative, rendered as Markdown and JSON.

pub mod distributions;
pub mod formatters;
pub mod narrative;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::info;

use crate::config::{REPORT_JSON_FILE, REPORT_MARKDOWN_FILE};
use crate::kpi::{Kpi, KpiRecord, ScoredTables};

pub use distributions::{Bin, ConversionComparison, Distributions, Histogram};
pub use formatters::{JsonFormatter, MarkdownFormatter};
pub use narrative::{Narrative, NarrativeLine};

/// One KPI card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub metric: Kpi,
    pub name: String,
    pub title: String,
    pub value: Option<f64>,
    /// Value with unit, or "undefined"
    pub display: String,
}

impl KpiCard {
    fn new(metric: Kpi, value: Option<f64>) -> Self {
        Self {
            metric,
            name: metric.name().to_string(),
            title: metric.title().to_string(),
            value,
            display: value.map_or_else(|| crate::kpi::UNDEFINED.to_string(), |v| metric.format_value(v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub kpis: KpiRecord,
    pub cards: Vec<KpiCard>,
    pub distributions: Distributions,
    pub narrative: Narrative,
}

impl DashboardReport {
    pub fn build(tables: &ScoredTables, kpis: &KpiRecord, bins: usize) -> Result<Self> {
        let cards = kpis.iter().map(|(kpi, value)| KpiCard::new(kpi, value)).collect();
        let distributions = Distributions::from_tables(tables, bins)?;
        let narrative = Narrative::from_record(kpis);

        Ok(Self {
            kpis: *kpis,
            cards,
            distributions,
            narrative,
        })
    }

    /// Write `report.md` and `report.json` into `dir`
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;

        let markdown_path = dir.join(REPORT_MARKDOWN_FILE);
        fs::write(&markdown_path, MarkdownFormatter::format(self))
            .with_context(|| format!("Failed to write {:?}", markdown_path))?;

        let json_path = dir.join(REPORT_JSON_FILE);
        let json = JsonFormatter::format(self).context("Failed to serialise report")?;
        fs::write(&json_path, json).with_context(|| format!("Failed to write {:?}", json_path))?;

        info!("Report written to {:?} and {:?}", markdown_path, json_path);
        Ok(vec![markdown_path, json_path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    pub(crate) fn sample_report() -> DashboardReport {
        let tables = ScoredTables {
            reviews: df![
                "Sentiment" => &[0.4, -0.2],
                "Positive_Review" => &[true, false],
                "Purchased" => &[true, false],
            ]
            .unwrap(),
            profiles: df![
                "Recency" => &[10, 30],
                "Total_Spent" => &[150.0, 0.0],
                "Total_Purchases" => &[6.0, 2.0],
            ]
            .unwrap(),
        };
        let kpis = KpiRecord::from_tables(&tables).unwrap();
        DashboardReport::build(&tables, &kpis, 30).unwrap()
    }

    #[test]
    fn test_build_report() {
        let report = sample_report();

        assert_eq!(report.cards.len(), 5);
        assert_eq!(report.cards[1].name, "Conversion_Rate");
        assert_eq!(report.cards[1].display, "100.00%");
        assert_eq!(report.distributions.spend.total(), 2);
        assert_eq!(report.distributions.sentiment.bins.len(), 30);
        assert_eq!(report.narrative.lines.len(), 4);
    }

    #[test]
    fn test_undefined_card_display() {
        let card = KpiCard::new(Kpi::ConversionRate, None);
        assert_eq!(card.display, "undefined");
    }

    #[test]
    fn test_write_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = sample_report().write(dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }
}
