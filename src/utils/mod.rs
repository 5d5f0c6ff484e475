//! Utility modules shared by the cleaning and KPI stages
//!
//! - Text: Capitalisation rules and purchase flag parsing
//! - Stats: Null-aware mean, median and forward fill
//! - Columns: Required-column validation and amount/purchase column selection

pub mod text;
pub mod stats;
pub mod columns;

// Re-export commonly used helpers
pub use text::{capitalize, title_case, is_purchase};
pub use stats::{mean, median, forward_fill};
pub use columns::{require_columns, select_aggregate_columns, AggregateColumns};
