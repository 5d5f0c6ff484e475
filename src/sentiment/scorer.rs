//! Lexical polarity scorer
//!
//! Algorithm:
//! 1. Lowercase and split into words and clause breaks (`. , ; : ! ?`)
//! 2. Each lexicon word is one assessment: polarity × pending modifiers,
//!    × -0.5 if a negator appeared earlier in the clause
//! 3. `!` boosts the clause's last assessment by 10%
//! 4. Score = mean of assessments, clamped to [-1, 1]; 0.0 with none

use rustc_hash::{FxHashMap, FxHashSet};

use super::lexicon::{MODIFIERS, NEGATORS, POLARITY};
use super::PolarityScorer;

const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_BOOST: f64 = 1.1;

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Break(char),
}

/// Lexicon-based polarity scorer
pub struct LexiconScorer {
    polarity: FxHashMap<&'static str, f64>,
    modifiers: FxHashMap<&'static str, f64>,
    negators: FxHashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer over the embedded lexicon
    pub fn new() -> Self {
        Self {
            polarity: POLARITY.iter().copied().collect(),
            modifiers: MODIFIERS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    fn is_negator(&self, word: &str) -> bool {
        self.negators.contains(word) || word.ends_with("n't")
    }

    /// Individual assessments, in text order
    fn assessments(&self, text: &str) -> Vec<f64> {
        let mut assessments = Vec::new();
        let mut clause_start = 0;
        let mut multiplier = 1.0;
        let mut negated = false;

        for token in tokenize(text) {
            match token {
                Token::Break(c) => {
                    if c == '!' && assessments.len() > clause_start {
                        if let Some(last) = assessments.last_mut() {
                            *last *= EXCLAMATION_BOOST;
                        }
                    }
                    clause_start = assessments.len();
                    multiplier = 1.0;
                    negated = false;
                }
                Token::Word(word) => {
                    if self.is_negator(&word) {
                        negated = true;
                    } else if let Some(&m) = self.modifiers.get(word.as_str()) {
                        multiplier *= m;
                    } else if let Some(&p) = self.polarity.get(word.as_str()) {
                        let mut score = p * multiplier;
                        if negated {
                            score *= NEGATION_FACTOR;
                        }
                        assessments.push(score);
                        multiplier = 1.0;
                        negated = false;
                    } else {
                        multiplier = 1.0;
                    }
                }
            }
        }

        assessments
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let assessments = self.assessments(text);
        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '\'' {
            word.push(c);
        } else if c == '’' {
            word.push('\'');
        } else {
            flush(&mut word, &mut tokens);
            if matches!(c, '.' | ',' | ';' | ':' | '!' | '?') {
                tokens.push(Token::Break(c));
            }
        }
    }
    flush(&mut word, &mut tokens);

    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<Token>) {
    let trimmed = word.trim_matches('\'');
    if !trimmed.is_empty() {
        tokens.push(Token::Word(trimmed.to_string()));
    }
    word.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Isn't it GOOD, really?");
        assert_eq!(
            tokens,
            vec![
                Token::Word("isn't".to_string()),
                Token::Word("it".to_string()),
                Token::Word("good".to_string()),
                Token::Break(','),
                Token::Word("really".to_string()),
                Token::Break('?'),
            ]
        );
    }

    #[test]
    fn test_neutral_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.polarity(""), 0.0);
        assert_eq!(scorer.polarity("the package arrived on tuesday"), 0.0);
    }

    #[test]
    fn test_sign_of_simple_reviews() {
        let scorer = LexiconScorer::new();
        assert!(scorer.polarity("Great product, I love it") > 0.0);
        assert!(scorer.polarity("Terrible quality") < 0.0);
        assert!(scorer.polarity("The worst purchase, broken on arrival") < 0.0);
    }

    #[test]
    fn test_modifiers() {
        let scorer = LexiconScorer::new();
        assert_relative_eq!(scorer.polarity("good"), 0.7);
        assert_relative_eq!(scorer.polarity("very good"), 0.91, epsilon = 1e-9);
        assert_relative_eq!(scorer.polarity("not good"), -0.35, epsilon = 1e-9);
        assert_relative_eq!(scorer.polarity("wasn't good"), -0.35, epsilon = 1e-9);
        assert_relative_eq!(scorer.polarity("good!"), 0.77, epsilon = 1e-9);
    }

    #[test]
    fn test_negation_ends_at_clause_break() {
        let scorer = LexiconScorer::new();
        // "not" does not reach past the comma
        assert_relative_eq!(scorer.polarity("not cheap, good"), (-0.2 + 0.7) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(scorer.polarity("not. good"), 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_score_is_clamped() {
        let scorer = LexiconScorer::new();
        assert_relative_eq!(scorer.polarity("extremely extremely excellent"), 1.0);
        assert_relative_eq!(scorer.polarity("absolutely terrible!"), -1.0);
    }

    #[test]
    fn test_deterministic() {
        let scorer = LexiconScorer::new();
        let text = "Pretty good value but the delivery was slow and the box was dirty.";
        let first = scorer.polarity(text);
        for _ in 0..5 {
            assert_eq!(scorer.polarity(text), first);
        }
        assert_eq!(LexiconScorer::new().polarity(text), first);
    }
}
