use crate::report::{DashboardReport, Histogram};

/// Markdown formatter for dashboard reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn format(report: &DashboardReport) -> String {
        let mut md = String::with_capacity(4096);

        md.push_str("# Customer Behaviour Dashboard\n\n");

        // KPI cards
        md.push_str("## Key Performance Indicators\n\n");
        md.push_str("| KPI | Value |\n");
        md.push_str("|-----|-------|\n");
        for card in &report.cards {
            md.push_str(&format!("| {} | {} |\n", card.title, card.display));
        }
        md.push('\n');

        // Review impact
        let conversion = &report.distributions.conversion;
        md.push_str("## Purchase Rate by Review Type\n\n");
        md.push_str("| Review type | Purchase rate |\n");
        md.push_str("|-------------|---------------|\n");
        md.push_str(&format!("| Positive | {} |\n", percent(conversion.positive_rate)));
        md.push_str(&format!("| Negative / neutral | {} |\n\n", percent(conversion.other_rate)));

        Self::format_histogram(&mut md, "Customer Spend", &report.distributions.spend);
        Self::format_histogram(&mut md, "Recency (days)", &report.distributions.recency);
        Self::format_histogram(&mut md, "Purchases per Customer", &report.distributions.purchases);
        Self::format_histogram(&mut md, "Review Sentiment", &report.distributions.sentiment);

        md.push_str("## Summary\n\n");
        for line in &report.narrative.lines {
            md.push_str(&format!("- {}\n", line.message));
        }

        md
    }

    fn format_histogram(md: &mut String, title: &str, histogram: &Histogram) {
        md.push_str(&format!("### {}\n\n", title));

        if histogram.is_empty() {
            md.push_str("*No data.*\n\n");
            return;
        }

        md.push_str("| Range | Count |\n");
        md.push_str("|-------|-------|\n");
        for bin in &histogram.bins {
            md.push_str(&format!("| {:.2} to {:.2} | {} |\n", bin.lower, bin.upper, bin.count));
        }
        md.push('\n');
    }
}

fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| "undefined".to_string(), |r| format!("{:.2}%", r))
}
