//! Workspace umbrella crate for emotext.
//!
//! This crate stitches the emotion model and the chart renderer together so the
//! web layer (and anything else) can go from raw text to a display-ready result
//! with two calls: [`analyze`] runs the model once and derives the confidence and
//! emoji, [`present`] adds the chart for the HTML view.

pub mod emoji;

pub use chart::{BarChart, ChartConfig, ChartError};
pub use classifier::{
    load_model, ClassifierConfig, ClassifierError, ClassifierMode, EmotionModel,
    LexiconClassifier, Prediction, Probabilities, LEXICON_LABELS, SUM_TOLERANCE,
};
pub use emoji::emoji_for;

/// Errors that can occur while turning text into a displayable result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("chart rendering failed: {0}")]
    Chart(#[from] ChartError),
}

/// Model output for one input, plus the values derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub text: String,
    pub prediction: Prediction,
    /// Maximum probability across the mapping.
    pub confidence: f32,
    /// Glyph for the predicted label; empty for labels without one.
    pub emoji: &'static str,
}

impl Analysis {
    pub fn label(&self) -> &str {
        &self.prediction.label
    }

    pub fn probabilities(&self) -> &Probabilities {
        &self.prediction.probabilities
    }
}

/// Everything the HTML view shows for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    pub text: String,
    pub label: String,
    pub emoji: &'static str,
    pub confidence: f32,
    /// Embeddable chart markup.
    pub chart_html: String,
}

/// Runs `model` over `text` in a single inference pass.
pub async fn analyze(model: &dyn EmotionModel, text: &str) -> Result<Analysis, PipelineError> {
    let prediction = model.predict(text).await?;
    let confidence = prediction.confidence();
    let emoji = emoji_for(&prediction.label);

    tracing::debug!(
        model = model.name(),
        label = %prediction.label,
        confidence,
        "analyzed text"
    );

    Ok(Analysis {
        text: text.to_string(),
        prediction,
        confidence,
        emoji,
    })
}

/// Charts the full distribution of `analysis` and bundles it for display.
pub fn present(analysis: Analysis, chart: &BarChart) -> Result<DisplayPayload, PipelineError> {
    let chart_html = chart.render(analysis.probabilities().iter())?;
    Ok(DisplayPayload {
        label: analysis.prediction.label,
        text: analysis.text,
        emoji: analysis.emoji,
        confidence: analysis.confidence,
        chart_html,
    })
}
