//! Customer KPI pipeline
//!
//! Cleans the customer review and marketing campaign datasets, scores them,
//! computes five business KPIs and prepares the dashboard report.
//!
//! Module layout:
//! - `cleaning/`: Review and profile cleaners (raw → processed)
//! - `kpi/`: Derived columns and KPI aggregation (processed → scored)
//! - `sentiment/`: Lexical polarity scoring for review text
//! - `report/`: Distributions, threshold narrative and formatters
//! - `utils/`: Text normalization, statistics and column helpers
//! - `pipeline`: Stage orchestration

pub mod error;
pub mod schema;
pub mod config;
pub mod data;
pub mod utils;
pub mod cleaning;
pub mod sentiment;
pub mod kpi;
pub mod report;
pub mod pipeline;

// Re-export commonly used types
pub use error::PipelineError;
pub use config::{ColumnSelection, PipelineConfig};
pub use cleaning::{clean_customer_review, clean_marketing_campaign};
pub use kpi::{compute_kpis, score_tables, Kpi, KpiPaths, KpiRecord, ScoredTables};
pub use sentiment::{LexiconScorer, PolarityScorer};
pub use report::{DashboardReport, JsonFormatter, MarkdownFormatter};
pub use pipeline::{run_pipeline, PipelineOutcome, Stage};
