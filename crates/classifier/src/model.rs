use async_trait::async_trait;

use crate::{ClassifierError, Prediction, Probabilities};

/// Black-box emotion classifier.
///
/// Implementations are loaded once and shared read-only across requests, so every
/// method takes `&self`. Backends whose runtime needs exclusive access serialize
/// internally.
#[async_trait]
pub trait EmotionModel: Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Fixed class set in model order.
    fn labels(&self) -> &[String];

    /// Probability for every label in [`labels`](Self::labels) order.
    async fn classify_probabilities(&self, text: &str) -> Result<Probabilities, ClassifierError>;

    /// Label and distribution from a single inference pass.
    async fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let probabilities = self.classify_probabilities(text).await?;
        Prediction::from_probabilities(probabilities)
    }

    /// Most likely label for `text`.
    async fn classify(&self, text: &str) -> Result<String, ClassifierError> {
        Ok(self.predict(text).await?.label)
    }
}
