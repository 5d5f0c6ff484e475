//! Review scores: Sentiment, Positive_Review and the boolean purchase flag

use polars::prelude::*;
use anyhow::Result;

use crate::schema::{POSITIVE_REVIEW, PURCHASED, REVIEW, SENTIMENT};
use crate::sentiment::PolarityScorer;
use crate::utils::is_purchase;

/// Attach `Sentiment` and `Positive_Review`, and normalise `Purchased` to boolean
///
/// A missing review text scores 0.0 (not positive).
pub fn add_review_scores(df: &mut DataFrame, scorer: &dyn PolarityScorer) -> Result<()> {
    let text = df.column(REVIEW)?.cast(&DataType::String)?;
    let sentiment: Vec<f64> = text
        .str()?
        .into_iter()
        .map(|review| review.map_or(0.0, |t| scorer.polarity(t)))
        .collect();

    let positive: Vec<bool> = sentiment.iter().map(|&s| is_positive(s)).collect();

    let purchased_text = df.column(PURCHASED)?.cast(&DataType::String)?;
    let purchased: Vec<bool> = purchased_text.str()?.into_iter().map(is_purchase).collect();

    df.with_column(Series::new(SENTIMENT.into(), sentiment))?;
    df.with_column(Series::new(POSITIVE_REVIEW.into(), positive))?;
    df.with_column(Series::new(PURCHASED.into(), purchased))?;
    Ok(())
}

/// Positive review iff polarity is strictly above zero
pub fn is_positive(sentiment: f64) -> bool {
    sentiment > 0.0
}
