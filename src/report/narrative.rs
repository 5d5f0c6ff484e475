//! Threshold-driven narrative
//!
//! Each KPI maps to one bucket; thresholds are exclusive as written
//! (spend exactly 600 is "upsell potential").

use serde::{Deserialize, Serialize};

use crate::kpi::{Kpi, KpiRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendTier {
    HighValue,
    UpsellPotential,
    Occasional,
}

impl SpendTier {
    pub fn from_value(average_spend: f64) -> Self {
        if average_spend > 600.0 {
            Self::HighValue
        } else if average_spend > 300.0 {
            Self::UpsellPotential
        } else {
            Self::Occasional
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::HighValue => "High average basket: high-value customers.",
            Self::UpsellPotential => "Moderate average basket: upsell potential.",
            Self::Occasional => "Low average basket: mostly occasional buyers.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyTier {
    Active,
    ModeratelyActive,
    ChurnRisk,
}

impl RecencyTier {
    pub fn from_value(recency_days: f64) -> Self {
        if recency_days < 30.0 {
            Self::Active
        } else if recency_days < 90.0 {
            Self::ModeratelyActive
        } else {
            Self::ChurnRisk
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Active => "Customers are active.",
            Self::ModeratelyActive => "Customers are moderately active.",
            Self::ChurnRisk => "Long time since last purchase: churn risk.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTier {
    Positive,
    Neutral,
    Negative,
}

impl SentimentTier {
    pub fn from_value(sentiment: f64) -> Self {
        if sentiment > 0.1 {
            Self::Positive
        } else if sentiment > -0.05 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Positive => "Reviews are broadly positive.",
            Self::Neutral => "Reviews are broadly neutral or mixed.",
            Self::Negative => "Reviews lean negative.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionTier {
    Strong,
    Moderate,
    Limited,
}

impl ConversionTier {
    pub fn from_value(conversion_rate: f64) -> Self {
        if conversion_rate > 50.0 {
            Self::Strong
        } else if conversion_rate > 30.0 {
            Self::Moderate
        } else {
            Self::Limited
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Strong => "Reviews strongly influence purchases.",
            Self::Moderate => "Reviews moderately influence purchases.",
            Self::Limited => "Reviews have limited influence on purchases.",
        }
    }
}

/// One narrative line; `bucket` is `None` when the KPI is undefined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeLine {
    pub metric: Kpi,
    pub bucket: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub lines: Vec<NarrativeLine>,
}

impl Narrative {
    pub fn from_record(record: &KpiRecord) -> Self {
        let spend = line(Kpi::AverageSpend, record.average_spend, |v| {
            let tier = SpendTier::from_value(v);
            (bucket_name(&tier), tier.message())
        });
        let recency = line(Kpi::RecencyMean, record.recency_mean, |v| {
            let tier = RecencyTier::from_value(v);
            (bucket_name(&tier), tier.message())
        });
        let sentiment = line(Kpi::AverageSentiment, record.average_sentiment, |v| {
            let tier = SentimentTier::from_value(v);
            (bucket_name(&tier), tier.message())
        });
        let conversion = line(Kpi::ConversionRate, record.conversion_rate, |v| {
            let tier = ConversionTier::from_value(v);
            (bucket_name(&tier), tier.message())
        });

        Self {
            lines: vec![spend, recency, sentiment, conversion],
        }
    }
}

fn line<F>(metric: Kpi, value: Option<f64>, classify: F) -> NarrativeLine
where
    F: FnOnce(f64) -> (String, &'static str),
{
    match value {
        Some(v) => {
            let (bucket, message) = classify(v);
            NarrativeLine {
                metric,
                bucket: Some(bucket),
                message: message.to_string(),
            }
        }
        None => NarrativeLine {
            metric,
            bucket: None,
            message: format!("{}: insufficient data.", metric.title()),
        },
    }
}

/// Serialized snake_case name of a tier
fn bucket_name<T: Serialize>(tier: &T) -> String {
    serde_json::to_value(tier)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
