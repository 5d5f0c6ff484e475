use serde_json::{json, Value};

use crate::kpi::KpiRecord;
use crate::report::DashboardReport;

/// JSON formatter for dashboard reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Pretty-printed JSON
    pub fn format(report: &DashboardReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Compact JSON (no whitespace)
    pub fn format_compact(report: &DashboardReport) -> Result<String, serde_json::Error> {
        serde_json::to_string(report)
    }

    /// KPI summary only: metric name → value, with the KPIs whose
    /// population was empty listed under `undefined`
    pub fn format_kpis(kpis: &KpiRecord) -> Value {
        let undefined: Vec<&str> = kpis.undefined().into_iter().map(|k| k.name()).collect();
        json!({
            "metrics": kpis.to_map(),
            "undefined": undefined,
        })
    }
}
