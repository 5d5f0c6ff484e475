//! Review sentiment scoring
//!
//! Contract: a continuous polarity in [-1, 1], deterministic for a given
//! text. Only the sign is load-bearing downstream (positive review flag,
//! narrative thresholds), so scorers are interchangeable behind
//! `PolarityScorer`.

pub mod lexicon;
pub mod scorer;

pub use scorer::LexiconScorer;

/// Text → polarity in [-1, 1]; positive sign means positive tone
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}
