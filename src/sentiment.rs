//! Sentiment scoring
//!
//! Free-text fields are reduced to a single compound polarity in [-1, 1].
//! The scorer is a seam: any implementation of [`SentimentScorer`] can be
//! plugged into the engine. [`VaderSentiment`] is the default and reproduces
//! the VADER compound score the models were trained on. [`LexiconSentiment`]
//! applies the same rules over a caller-supplied VADER-format lexicon.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::ComputeError;
use crate::types::SentimentTriple;

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Valence added or removed by booster words
const BOOSTER_INCREMENT: f64 = 0.293;

/// Valence added for ALL-CAPS emphasis in mixed-case text
const CAPS_INCREMENT: f64 = 0.733;

/// Valence multiplier applied after a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Booster dampening by distance (1, 2, 3 tokens back)
const DISTANCE_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Maps free text to a compound polarity score
pub trait SentimentScorer {
    /// Compound polarity of non-empty text, in [-1, 1]
    fn polarity(&self, text: &str) -> f64;
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for Box<S> {
    fn polarity(&self, text: &str) -> f64 {
        (**self).polarity(text)
    }
}

/// Score text, returning exactly 0 for empty or whitespace-only input.
///
/// The underlying scorer is never invoked for blank text.
pub fn compound_score<S: SentimentScorer + ?Sized>(scorer: &S, text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    scorer.polarity(text).clamp(-1.0, 1.0)
}

/// Score the three free-text fields of a submission
pub fn score_triple<S: SentimentScorer + ?Sized>(
    scorer: &S,
    posts: &str,
    comments: &str,
    status: &str,
) -> SentimentTriple {
    SentimentTriple {
        post: compound_score(scorer, posts),
        comment: compound_score(scorer, comments),
        status: compound_score(scorer, status),
    }
}

/// VADER compound scorer
pub struct VaderSentiment {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl Default for VaderSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderSentiment {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl SentimentScorer for VaderSentiment {
    fn polarity(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

/// Rule-based scorer over a VADER-format lexicon loaded at startup
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    lexicon: HashMap<String, f64>,
}

impl LexiconSentiment {
    /// Parse a VADER-format lexicon (`token<TAB>mean<TAB>...` per line)
    pub fn from_lexicon_str(content: &str) -> Result<Self, ComputeError> {
        let mut lexicon = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split('\t');
            let token = parts.next().unwrap_or_default().trim();
            let valence = parts
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| {
                    ComputeError::InvalidArtifact(format!(
                        "lexicon line {}: expected token and numeric valence",
                        line_no + 1
                    ))
                })?;
            lexicon.insert(token.to_lowercase(), valence);
        }

        if lexicon.is_empty() {
            return Err(ComputeError::InvalidArtifact(
                "lexicon contains no entries".to_string(),
            ));
        }

        Ok(Self { lexicon })
    }

    /// Load a VADER-format lexicon file
    pub fn from_lexicon_file<P: AsRef<Path>>(path: P) -> Result<Self, ComputeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ComputeError::ArtifactLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let scorer = Self::from_lexicon_str(&content)?;
        tracing::info!(path = %path.display(), entries = scorer.len(), "Loaded sentiment lexicon");
        Ok(scorer)
    }

    /// Add or replace a lexicon entry
    pub fn with_entry(mut self, word: &str, valence: f64) -> Self {
        self.lexicon.insert(word.to_lowercase(), valence);
        self
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn token_valence(&self, tokens: &[Token], idx: usize, caps_differ: bool) -> f64 {
        let token = &tokens[idx];
        if booster_scalar(&token.lower).is_some() {
            return 0.0;
        }
        let Some(&base) = self.lexicon.get(&token.lower) else {
            return 0.0;
        };

        let mut valence = base;
        if caps_differ && token.is_all_caps() {
            valence += CAPS_INCREMENT * valence.signum();
        }

        for distance in 1..=3 {
            if idx < distance {
                break;
            }
            let prev = &tokens[idx - distance];

            if let Some(scalar) = booster_scalar(&prev.lower) {
                let mut boost = scalar;
                if caps_differ && prev.is_all_caps() {
                    boost += CAPS_INCREMENT * boost.signum();
                }
                if valence < 0.0 {
                    boost = -boost;
                }
                valence += boost * DISTANCE_DAMPING[distance - 1];
            }

            if is_negation(&prev.lower) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let caps_differ = {
            let lettered: Vec<&Token> = tokens.iter().filter(|t| t.has_letters()).collect();
            let caps = lettered.iter().filter(|t| t.is_all_caps()).count();
            caps > 0 && caps < lettered.len()
        };

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|idx| self.token_valence(&tokens, idx, caps_differ))
            .collect();

        // Contrastive "but": what follows outweighs what precedes
        if let Some(but_idx) = tokens.iter().position(|t| t.lower == "but") {
            for (idx, valence) in valences.iter_mut().enumerate() {
                if idx < but_idx {
                    *valence *= 0.5;
                } else if idx > but_idx {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        normalize(sum)
    }
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };

    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

#[derive(Debug)]
struct Token {
    raw: String,
    lower: String,
}

impl Token {
    fn has_letters(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic)
    }

    fn is_all_caps(&self) -> bool {
        self.has_letters() && self.raw.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .map(|word| Token {
            raw: word.to_string(),
            lower: word.to_lowercase(),
        })
        .collect()
}

fn booster_scalar(word: &str) -> Option<f64> {
    const INCREASE: &[&str] = &[
        "absolutely", "amazingly", "completely", "deeply", "enormously", "entirely",
        "especially", "exceptionally", "extremely", "highly", "hugely", "incredibly",
        "intensely", "most", "particularly", "purely", "quite", "really", "so",
        "substantially", "super", "thoroughly", "totally", "tremendously", "truly",
        "unbelievably", "utterly", "very",
    ];
    const DECREASE: &[&str] = &[
        "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
        "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
    ];

    if INCREASE.contains(&word) {
        Some(BOOSTER_INCREMENT)
    } else if DECREASE.contains(&word) {
        Some(-BOOSTER_INCREMENT)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    const NEGATIONS: &[&str] = &[
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
        "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
        "never", "no", "nobody", "none", "nope", "nor", "not", "nothing", "nowhere",
        "shant", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
    ];
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_LEXICON: &str = "\
good\t1.9\t0.9\t[2, 2]
great\t3.1\t0.7\t[3, 3]
happy\t2.7\t0.8\t[3, 2]
relaxed\t2.2\t0.6\t[2, 2]
love\t3.2\t0.4\t[3, 3]
friends\t2.1\t0.5\t[2, 2]
sad\t-2.1\t0.7\t[-2, -2]
lonely\t-1.5\t0.5\t[-1, -2]
awful\t-2.0\t0.8\t[-2, -2]
";

    fn lexicon() -> LexiconSentiment {
        LexiconSentiment::from_lexicon_str(TEST_LEXICON).unwrap()
    }

    struct PanickingScorer;

    impl SentimentScorer for PanickingScorer {
        fn polarity(&self, _text: &str) -> f64 {
            panic!("scorer must not be invoked for blank text");
        }
    }

    struct FixedScorer(f64);

    impl SentimentScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_blank_text_is_neutral_without_invoking_scorer() {
        for text in ["", " ", "\t\n  ", "\u{3000}"] {
            assert_eq!(compound_score(&PanickingScorer, text), 0.0);
        }
    }

    #[test]
    fn test_compound_score_is_clamped() {
        assert_eq!(compound_score(&FixedScorer(3.0), "text"), 1.0);
        assert_eq!(compound_score(&FixedScorer(-3.0), "text"), -1.0);
    }

    #[test]
    fn test_vader_scores_common_affect_words() {
        let scorer = VaderSentiment::new();

        let disappointed = scorer.polarity("I am disappointed");
        assert!((disappointed - -0.4767).abs() < 1e-3, "got {disappointed}");

        let sucks = scorer.polarity("this sucks");
        assert!((sucks - -0.3612).abs() < 1e-3, "got {sucks}");

        assert!(scorer.polarity("I love my friends") > 0.5);
        assert_eq!(scorer.polarity("the meeting is at noon"), 0.0);
    }

    #[test]
    fn test_vader_score_triple() {
        let scorer = VaderSentiment::new();
        let triple = score_triple(&scorer, "Great day with friends!", "", "   ");

        assert!(triple.post > 0.0);
        assert_eq!(triple.comment, 0.0);
        assert_eq!(triple.status, 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let scorer = lexicon();

        assert!(scorer.polarity("I feel happy and relaxed") > 0.0);
        assert!(scorer.polarity("I feel sad and lonely") < 0.0);
        assert_eq!(scorer.polarity("the meeting is at noon"), 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = lexicon();

        assert!(scorer.polarity("I am happy") > 0.0);
        assert!(scorer.polarity("I am not happy") < 0.0);
        assert!(scorer.polarity("I don't feel good") < 0.0);
    }

    #[test]
    fn test_boosters_and_emphasis_intensify() {
        let scorer = lexicon();
        let plain = scorer.polarity("I am happy");

        assert!(scorer.polarity("I am very happy") > plain);
        assert!(scorer.polarity("I am happy!!!") > plain);
        assert!(scorer.polarity("I am HAPPY today") > plain);
        assert!(scorer.polarity("I am slightly happy") < plain);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let score = lexicon().polarity("The day was good but I feel awful and sad");
        assert!(score < 0.0);
    }

    #[test]
    fn test_compound_stays_bounded() {
        let text = "great love happy good ".repeat(50);
        let score = lexicon().polarity(&text);
        assert!(score > 0.99 && score <= 1.0);
    }

    #[test]
    fn test_from_lexicon_str() {
        let content = "calm\t2.0\t0.5\t[2, 2]\nugh\t-1.5\t0.4\t[-1, -2]\n";
        let scorer = LexiconSentiment::from_lexicon_str(content).unwrap();

        assert_eq!(scorer.len(), 2);
        assert!(scorer.polarity("so calm") > 0.0);
        assert!(scorer.polarity("ugh") < 0.0);
        // Words outside the loaded lexicon carry no valence
        assert_eq!(scorer.polarity("happy"), 0.0);
    }

    #[test]
    fn test_from_lexicon_str_rejects_bad_lines() {
        let result = LexiconSentiment::from_lexicon_str("calm\tnot-a-number\n");
        assert!(matches!(result, Err(ComputeError::InvalidArtifact(_))));

        let result = LexiconSentiment::from_lexicon_str("\n\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_entry() {
        let scorer = lexicon().with_entry("meh", -0.5);
        assert!(scorer.polarity("meh") < 0.0);
    }
}
