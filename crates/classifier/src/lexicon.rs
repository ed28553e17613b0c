use async_trait::async_trait;

use crate::softmax::softmax;
use crate::{ClassifierError, EmotionModel, Probabilities};

/// Class order of the keyword model.
pub const LEXICON_LABELS: [&str; 8] = [
    "anger", "disgust", "fear", "joy", "neutral", "sadness", "shame", "surprise",
];

const NEUTRAL_PRIOR: f32 = 0.5;
const HIT_WEIGHT: f32 = 2.0;

const KEYWORDS: [(&str, &[&str]); 8] = [
    (
        "anger",
        &[
            "angry", "furious", "rage", "mad", "annoyed", "irritated", "hate", "outraged",
            "livid", "frustrated",
        ],
    ),
    (
        "disgust",
        &[
            "disgusted", "disgusting", "gross", "revolting", "nasty", "sick", "vile", "yuck",
        ],
    ),
    (
        "fear",
        &[
            "afraid", "scared", "terrified", "fear", "anxious", "nervous", "worried", "panic",
            "frightened",
        ],
    ),
    (
        "joy",
        &[
            "happy", "joy", "glad", "delighted", "love", "great", "wonderful", "excited",
            "cheerful", "awesome",
        ],
    ),
    ("neutral", &["okay", "fine", "normal", "usual", "whatever"]),
    (
        "sadness",
        &[
            "sad", "unhappy", "depressed", "miserable", "cry", "crying", "lonely", "heartbroken",
            "grief", "gloomy",
        ],
    ),
    (
        "shame",
        &["ashamed", "shame", "embarrassed", "humiliated", "guilty", "regret"],
    ),
    (
        "surprise",
        &[
            "surprised", "shocked", "amazed", "astonished", "unexpected", "wow", "stunned",
        ],
    ),
];

/// Deterministic keyword model.
///
/// Every label starts from a zero logit (neutral gets a small prior), each keyword
/// hit adds a fixed weight, and softmax turns the logits into a distribution. No
/// artifact is needed, which makes it the backend of choice for tests and local
/// development.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    name: String,
    labels: Vec<String>,
}

impl LexiconClassifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: LEXICON_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn logits(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        KEYWORDS
            .iter()
            .map(|(label, words)| {
                let hits = tokens.iter().filter(|t| words.contains(*t)).count() as f32;
                let prior = if *label == "neutral" { NEUTRAL_PRIOR } else { 0.0 };
                prior + hits * HIT_WEIGHT
            })
            .collect()
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new("lexicon")
    }
}

#[async_trait]
impl EmotionModel for LexiconClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    async fn classify_probabilities(&self, text: &str) -> Result<Probabilities, ClassifierError> {
        Probabilities::from_scores(&self.labels, softmax(&self.logits(text)))
    }
}
