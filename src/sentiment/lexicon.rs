//! Embedded polarity lexicon
//!
//! Adjective-heavy English lexicon in the style of pattern/TextBlob: each
//! word carries a polarity in [-1, 1]. Modifiers scale the next lexicon word.

/// Word → polarity
pub static POLARITY: &[(&str, f64)] = &[
    // Positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("loves", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("happy", 0.8),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("fine", 0.4),
    ("easy", 0.4),
    ("fast", 0.2),
    ("quick", 0.3),
    ("comfortable", 0.4),
    ("beautiful", 0.85),
    ("reliable", 0.5),
    ("durable", 0.4),
    ("useful", 0.3),
    ("helpful", 0.4),
    ("friendly", 0.4),
    ("worth", 0.3),
    ("affordable", 0.3),
    ("cheap", 0.4),
    ("fresh", 0.3),
    ("delicious", 1.0),
    ("tasty", 0.5),
    ("superb", 1.0),
    ("outstanding", 0.5),
    ("impressive", 1.0),
    ("solid", 0.3),
    ("decent", 0.2),
    ("smooth", 0.4),
    ("clean", 0.37),
    ("enjoyed", 0.4),
    ("enjoy", 0.4),
    ("glad", 0.5),
    ("positive", 0.23),
    ("high", 0.16),
    ("quality", 0.1),
    ("well", 0.2),
    // Negative
    ("bad", -0.7),
    ("poor", -0.4),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("useless", -0.5),
    ("broken", -0.4),
    ("broke", -0.4),
    ("defective", -0.5),
    ("slow", -0.3),
    ("late", -0.3),
    ("expensive", -0.5),
    ("overpriced", -0.5),
    ("difficult", -0.5),
    ("hard", -0.3),
    ("uncomfortable", -0.5),
    ("cheaply", -0.3),
    ("flimsy", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("unhappy", -0.6),
    ("unsatisfied", -0.5),
    ("dissatisfied", -0.5),
    ("annoying", -0.8),
    ("angry", -0.5),
    ("rude", -0.3),
    ("dirty", -0.6),
    ("waste", -0.2),
    ("wrong", -0.5),
    ("fake", -0.5),
    ("unreliable", -0.5),
    ("mediocre", -0.3),
    ("boring", -1.0),
    ("noisy", -0.3),
    ("small", -0.25),
    ("problem", -0.2),
    ("issue", -0.1),
    ("negative", -0.3),
    ("low", -0.1),
    ("sad", -0.5),
    ("ugly", -0.7),
    ("stale", -0.5),
];

/// Word → multiplier applied to the next lexicon word's polarity
pub static MODIFIERS: &[(&str, f64)] = &[
    // Intensifiers
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("super", 1.4),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("most", 1.2),
    // Downtoners
    ("slightly", 0.5),
    ("somewhat", 0.6),
    ("fairly", 0.8),
    ("rather", 0.8),
    ("quite", 0.9),
    ("pretty", 0.9),
    ("bit", 0.6),
    ("little", 0.7),
];

/// Words that flip the next lexicon word in the same clause
pub static NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "neither", "nor", "without", "hardly", "barely",
    "cannot",
];
